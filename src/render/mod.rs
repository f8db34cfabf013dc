pub mod renderer;

pub use renderer::{LeaderboardView, Renderer};
