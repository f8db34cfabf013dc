//! Core game logic module for Rival Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! It can be driven by the terminal front-end or directly from tests.

pub mod action;
pub mod ai;
pub mod collision;
pub mod config;
pub mod engine;
pub mod food;
pub mod grid;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use collision::CollisionType;
pub use config::{GameConfig, MIN_GRID_SIZE};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use grid::Grid;
pub use session::{DEFAULT_PLAYER_NAME, GameSession, Phase, ScoreSubmission, Snapshot};
pub use state::{GameState, Position, Snake};
