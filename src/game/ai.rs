//! Rival snake behaviour.
//!
//! The AI keeps no memory between ticks; every decision is derived from the
//! board as it stands.

use rand::Rng;

use super::action::Direction;
use super::grid::Grid;
use super::state::{Position, Snake};

/// Headings a freshly spawned AI may face, indexed by the random draw.
const SPAWN_HEADINGS: [Direction; 4] = [
    Direction::Right,
    Direction::Left,
    Direction::Down,
    Direction::Up,
];

/// Greedy heading choice for the AI.
///
/// Drops the reversal of the current heading, keeps the moves that land on a
/// free in-bounds cell, and takes the one closest to the food by Manhattan
/// distance (earliest in [`Direction::ALL`] on ties). With no safe move the
/// current heading is kept, which usually kills the AI on the next check.
pub fn choose_direction(grid: &Grid, ai: &Snake, player: &Snake, food: Position) -> Direction {
    let head = ai.head();

    Direction::ALL
        .into_iter()
        .filter(|dir| !dir.is_opposite(ai.direction))
        .filter(|dir| is_safe(grid, head.moved_in_direction(*dir), ai, player))
        .min_by_key(|dir| head.moved_in_direction(*dir).manhattan_distance(food))
        .unwrap_or(ai.direction)
}

fn is_safe(grid: &Grid, pos: Position, ai: &Snake, player: &Snake) -> bool {
    grid.in_bounds(pos) && !ai.occupies_excluding_head(pos) && !player.contains(pos)
}

/// Try to drop a straight AI snake somewhere clear of the player and the food.
///
/// Returns `None` once `max_attempts` candidates have been rejected, or when
/// the grid is too small for the spawn margin.
pub fn spawn_ai<R: Rng + ?Sized>(
    grid: &Grid,
    length: usize,
    margin: usize,
    max_attempts: u32,
    player: &Snake,
    food: Position,
    rng: &mut R,
) -> Option<Snake> {
    for _ in 0..max_attempts {
        let head = grid.random_cell_within(margin as i32, rng)?;
        let heading = SPAWN_HEADINGS[rng.gen_range(0..SPAWN_HEADINGS.len())];
        let candidate = Snake::new(head, heading, length);

        let valid = candidate
            .body
            .iter()
            .all(|seg| grid.in_bounds(*seg) && !player.contains(*seg) && *seg != food);

        if valid {
            return Some(candidate);
        }
    }

    None
}
