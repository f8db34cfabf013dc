use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("name is required")]
    NameRequired,

    #[error("leaderboard file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize leaderboard: {0}")]
    Serialize(#[from] serde_json::Error),
}
