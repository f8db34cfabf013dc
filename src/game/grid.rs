use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Position;

/// Dimensions of the playing field. Holds no cell contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Grid {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: i32::from(width),
            height: i32::from(height),
        }
    }

    /// Check if a position is within the grid bounds
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Uniformly random cell anywhere on the grid
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        Position::new(rng.gen_range(0..self.width), rng.gen_range(0..self.height))
    }

    /// Uniformly random cell keeping `margin` cells clear of every wall.
    ///
    /// Returns `None` when the grid is too small to leave such a cell.
    pub fn random_cell_within<R: Rng + ?Sized>(
        &self,
        margin: i32,
        rng: &mut R,
    ) -> Option<Position> {
        let (max_x, max_y) = (self.width - margin, self.height - margin);
        if margin >= max_x || margin >= max_y {
            return None;
        }
        Some(Position::new(
            rng.gen_range(margin..max_x),
            rng.gen_range(margin..max_y),
        ))
    }
}
