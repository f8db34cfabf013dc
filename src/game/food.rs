use rand::Rng;

use super::grid::Grid;
use super::state::Position;

/// Pick a random cell that is not in any of the `occupied` sets.
///
/// Gives up after `max_attempts` samples and returns the last candidate,
/// even if it is occupied.
pub fn place_food<R: Rng + ?Sized>(
    grid: &Grid,
    occupied: &[&[Position]],
    max_attempts: u32,
    rng: &mut R,
) -> Position {
    let mut candidate = grid.random_cell(rng);
    let mut attempts = 1;

    while attempts < max_attempts && is_taken(candidate, occupied) {
        candidate = grid.random_cell(rng);
        attempts += 1;
    }

    if is_taken(candidate, occupied) {
        tracing::warn!(
            x = candidate.x,
            y = candidate.y,
            attempts,
            "food placement exhausted its attempts, keeping last candidate"
        );
    }

    candidate
}

fn is_taken(pos: Position, occupied: &[&[Position]]) -> bool {
    occupied.iter().any(|cells| cells.contains(&pos))
}
