use serde::{Deserialize, Serialize};

/// Smallest grid side that fits the player snake centred on the board
pub const MIN_GRID_SIZE: u16 = 5;

/// Configuration for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: u16,
    /// Height of the game grid
    pub grid_height: u16,
    /// Initial length of the player snake
    pub initial_snake_length: usize,
    /// Length of the AI snake when it (re)spawns
    pub ai_initial_length: usize,
    /// Distance from the walls the AI head must keep when spawning
    pub ai_spawn_margin: usize,

    // Retry caps for random placement
    /// Attempts to find a free cell for food before taking the last sample
    pub food_placement_attempts: u32,
    /// Attempts to place the AI before deferring its respawn
    pub ai_spawn_attempts: u32,

    /// Milliseconds between simulation ticks
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            initial_snake_length: 3,
            ai_initial_length: 3,
            ai_spawn_margin: 2,
            food_placement_attempts: 1000,
            ai_spawn_attempts: 200,
            tick_interval_ms: 150,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size.
    ///
    /// Sides below [`MIN_GRID_SIZE`] are raised to it.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            grid_width: width.max(MIN_GRID_SIZE),
            grid_height: height.max(MIN_GRID_SIZE),
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }
}
