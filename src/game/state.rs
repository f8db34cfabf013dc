use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::grid::Grid;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    pub fn manhattan_distance(&self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// A snake on the grid, player or AI
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a straight snake of `length` segments trailing behind `head`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx, -dy);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Where the head lands after one step in the current direction
    pub fn next_head(&self) -> Position {
        self.head().moved_in_direction(self.direction)
    }

    /// True if `pos` is any segment other than the head.
    ///
    /// The head cell is vacated on the same tick the snake moves, so it never
    /// counts for self-collision.
    pub fn occupies_excluding_head(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// True if `pos` is any segment, head included
    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Prepend `new_head`; drop the tail unless growing
    pub fn advance(&mut self, new_head: Position, grows: bool) {
        self.body.insert(0, new_head);

        if !grows {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Complete simulation state for one game
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub grid: Grid,
    pub player: Snake,
    /// Heading applied at the start of the next tick
    pub pending_direction: Direction,
    /// The rival snake, `None` while dead or not yet spawned
    pub ai: Option<Snake>,
    /// AI is waiting for another spawn attempt on the next meal
    pub ai_respawn_pending: bool,
    pub food: Position,
    pub score: u32,
    pub points_per_food: u32,
    pub is_alive: bool,
}

impl GameState {
    /// Create a new game state with no AI on the board
    pub fn new(player: Snake, food: Position, grid: Grid) -> Self {
        Self {
            grid,
            pending_direction: player.direction,
            player,
            ai: None,
            ai_respawn_pending: false,
            food,
            score: 0,
            points_per_food: 1,
            is_alive: true,
        }
    }

    /// Buffer a heading for the next tick.
    ///
    /// Checked against the pending heading rather than the applied one, so
    /// two quick turns between ticks cannot add up to a reversal.
    pub fn queue_direction(&mut self, direction: Direction) -> bool {
        if direction == self.pending_direction || direction.is_opposite(self.pending_direction) {
            return false;
        }
        self.pending_direction = direction;
        true
    }

    pub fn ai_alive(&self) -> bool {
        self.ai.is_some()
    }

    /// Cells of the AI, empty while it is dead
    pub fn ai_body(&self) -> &[Position] {
        match &self.ai {
            Some(ai) => &ai.body,
            None => &[],
        }
    }

    /// Remove the AI from the board and queue a respawn
    pub fn kill_ai(&mut self) {
        self.ai = None;
        self.ai_respawn_pending = true;
    }
}
