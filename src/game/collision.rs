use super::grid::Grid;
use super::state::Position;

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// Snake hit the other snake
    Opponent,
}

/// Classify a proposed head position.
///
/// `own_body` is the moving snake without its head. `other` is every cell of
/// the other snake, head included, as it stands at the moment of the check.
/// Returns `None` when the move is safe.
pub fn classify(
    grid: &Grid,
    new_head: Position,
    own_body: &[Position],
    other: &[Position],
) -> Option<CollisionType> {
    if !grid.in_bounds(new_head) {
        return Some(CollisionType::Wall);
    }

    if own_body.contains(&new_head) {
        return Some(CollisionType::SelfCollision);
    }

    if other.contains(&new_head) {
        return Some(CollisionType::Opponent);
    }

    None
}
