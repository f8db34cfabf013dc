//! Rival Snake - a terminal Snake game against a greedy AI opponent
//!
//! This library provides:
//! - Core game logic and the game lifecycle (game module)
//! - A JSON-file leaderboard (leaderboard module)
//! - TUI rendering and keyboard mapping (render, input modules)
//! - Execution modes (play, leaderboard)

pub mod game;
pub mod input;
pub mod leaderboard;
pub mod modes;
pub mod render;
