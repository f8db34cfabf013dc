pub mod leaderboard;
pub mod play;

pub use leaderboard::LeaderboardMode;
pub use play::PlayMode;
