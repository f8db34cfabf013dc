//! Persistent top-score list fed by finished games.

pub mod error;
pub mod store;

pub use error::LeaderboardError;
pub use store::{Leaderboard, MAX_ENTRIES, MAX_NAME_CHARS, ScoreEntry};
