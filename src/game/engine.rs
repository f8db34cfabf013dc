use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    action::Direction,
    ai,
    collision::{self, CollisionType},
    config::GameConfig,
    food,
    grid::Grid,
    state::{GameState, Position, Snake},
};

/// Information about a step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    /// Whether the player ate food this step
    pub ate_food: bool,
    /// Type of collision if the player crashed
    pub collision_type: Option<CollisionType>,
    /// Whether the AI ate food this step
    pub ai_ate_food: bool,
    /// Type of collision if the AI crashed
    pub ai_collision: Option<CollisionType>,
    /// Whether a pending AI respawn succeeded this step
    pub ai_respawned: bool,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that handles all game logic.
///
/// Randomness comes from `R` so tests can replay exact boards.
pub struct GameEngine<R: Rng = StdRng> {
    config: GameConfig,
    grid: Grid,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose boards are reproducible from `seed`
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let grid = Grid::new(config.grid_width, config.grid_height);
        Self { config, grid, rng }
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> GameState {
        let center_x = self.grid.width / 2;
        let center_y = self.grid.height / 2;

        let player = Snake::new(
            Position::new(center_x, center_y),
            Direction::Right,
            self.config.initial_snake_length,
        );

        let food = food::place_food(
            &self.grid,
            &[&player.body],
            self.config.food_placement_attempts,
            &mut self.rng,
        );

        let mut state = GameState::new(player, food, self.grid);
        self.try_spawn_ai(&mut state);
        state
    }

    /// Execute one tick: player first, then the AI
    pub fn step(&mut self, state: &mut GameState) -> StepResult {
        if !state.is_alive {
            return StepResult {
                terminated: true,
                info: StepInfo::default(),
            };
        }

        state.player.direction = state.pending_direction;
        let new_head = state.player.next_head();

        // The AI has not moved yet, so this checks against its pre-tick body
        if let Some(collision_type) = collision::classify(
            &state.grid,
            new_head,
            state.player.body_segments(),
            state.ai_body(),
        ) {
            state.is_alive = false;
            tracing::debug!(?collision_type, score = state.score, "player crashed");

            return StepResult {
                terminated: true,
                info: StepInfo {
                    collision_type: Some(collision_type),
                    ..Default::default()
                },
            };
        }

        let ate_food = new_head == state.food;
        state.player.advance(new_head, ate_food);

        let mut info = StepInfo {
            ate_food,
            ..Default::default()
        };

        if ate_food {
            state.score += state.points_per_food;
            state.points_per_food += 1;
            tracing::debug!(
                score = state.score,
                next_points = state.points_per_food,
                "player ate food"
            );
            self.relocate_food(state);

            if state.ai_respawn_pending {
                info.ai_respawned = self.try_spawn_ai(state);
            }
        }

        self.step_ai(state, &mut info);

        StepResult {
            terminated: false,
            info,
        }
    }

    /// Move the AI one cell; it checks against the player's post-move body.
    fn step_ai(&mut self, state: &mut GameState, info: &mut StepInfo) {
        let Some(rival) = state.ai.as_mut() else {
            return;
        };

        let heading = ai::choose_direction(&state.grid, rival, &state.player, state.food);
        rival.direction = heading;
        let new_head = rival.next_head();

        if let Some(collision_type) = collision::classify(
            &state.grid,
            new_head,
            rival.body_segments(),
            &state.player.body,
        ) {
            info.ai_collision = Some(collision_type);
            state.kill_ai();
            tracing::debug!(?collision_type, "ai crashed, respawn pending");
            return;
        }

        let ai_ate_food = new_head == state.food;
        rival.advance(new_head, ai_ate_food);

        if ai_ate_food {
            info.ai_ate_food = true;
            tracing::debug!("ai ate food");
            self.relocate_food(state);
        }
    }

    fn relocate_food(&mut self, state: &mut GameState) {
        state.food = food::place_food(
            &state.grid,
            &[&state.player.body, state.ai_body()],
            self.config.food_placement_attempts,
            &mut self.rng,
        );
    }

    /// Place the AI if there is room; otherwise leave it pending.
    fn try_spawn_ai(&mut self, state: &mut GameState) -> bool {
        let spawned = ai::spawn_ai(
            &state.grid,
            self.config.ai_initial_length,
            self.config.ai_spawn_margin,
            self.config.ai_spawn_attempts,
            &state.player,
            state.food,
            &mut self.rng,
        );

        match spawned {
            Some(snake) => {
                tracing::debug!(x = snake.head().x, y = snake.head().y, "ai spawned");
                state.ai = Some(snake);
                state.ai_respawn_pending = false;
                true
            }
            None => {
                tracing::debug!("no room to spawn ai, deferring");
                state.ai = None;
                state.ai_respawn_pending = true;
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn engine() -> GameEngine {
        GameEngine::with_seed(GameConfig::default(), 7)
    }

    /// Player at (10,10),(9,10),(8,10) heading right, no AI
    fn lone_player(food: Position) -> GameState {
        GameState::new(
            Snake::new(Position::new(10, 10), Direction::Right, 3),
            food,
            Grid::new(20, 20),
        )
    }

    #[test]
    fn test_reset() {
        let mut engine = engine();
        let state = engine.reset();

        assert!(state.is_alive);
        assert_eq!(state.score, 0);
        assert_eq!(state.points_per_food, 1);
        assert_eq!(state.player.body, vec![
            Position::new(10, 10),
            Position::new(9, 10),
            Position::new(8, 10)
        ]);
        assert_eq!(state.pending_direction, Direction::Right);
        assert!(!state.player.contains(state.food));

        let ai = state.ai.as_ref().expect("ai spawns on an empty board");
        assert_eq!(ai.len(), 3);
        assert!(!state.ai_respawn_pending);
        for seg in &ai.body {
            assert!(!state.player.contains(*seg));
            assert_ne!(*seg, state.food);
        }
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = engine();
        let mut state = lone_player(Position::new(0, 19));

        let result = engine.step(&mut state);

        assert!(!result.terminated);
        assert!(!result.info.ate_food);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.body, vec![
            Position::new(11, 10),
            Position::new(10, 10),
            Position::new(9, 10)
        ]);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = engine();
        let mut state = lone_player(Position::new(11, 10));

        let result = engine.step(&mut state);

        assert!(result.info.ate_food);
        assert_eq!(state.player.len(), 4);
        assert_eq!(state.player.head(), Position::new(11, 10));
        assert_eq!(state.score, 1);
        assert_eq!(state.points_per_food, 2);
        assert_ne!(state.food, Position::new(11, 10));
        assert!(!state.player.contains(state.food));
    }

    #[test]
    fn test_score_progression() {
        let mut engine = engine();
        let mut state = lone_player(Position::new(11, 10));

        engine.step(&mut state);
        state.food = Position::new(12, 10);
        engine.step(&mut state);
        state.food = Position::new(13, 10);
        engine.step(&mut state);

        assert_eq!(state.score, 1 + 2 + 3);
        assert_eq!(state.points_per_food, 4);
        assert_eq!(state.player.len(), 6);
    }

    #[test]
    fn test_pending_direction_applied_at_tick() {
        let mut engine = engine();
        let mut state = lone_player(Position::new(0, 19));

        assert!(state.queue_direction(Direction::Down));
        assert_eq!(state.player.direction, Direction::Right);

        engine.step(&mut state);
        assert_eq!(state.player.direction, Direction::Down);
        assert_eq!(state.player.head(), Position::new(10, 11));
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);
        let mut state = GameState::new(
            Snake::new(Position::new(0, 5), Direction::Left, 3),
            Position::new(5, 5),
            Grid::new(10, 10),
        );
        let before = state.player.clone();

        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert!(!state.is_alive);
        assert_eq!(result.info.collision_type, Some(CollisionType::Wall));
        assert_eq!(state.player.body, before.body);
    }

    #[test]
    fn test_self_collision() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);

        // Snake at (5, 5) going Right with length 5
        // Body: (5,5), (4,5), (3,5), (2,5), (1,5)
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 5);
        let mut state = GameState::new(snake, Position::new(8, 8), Grid::new(10, 10));

        // Right: (6,5), (5,5), (4,5), (3,5), (2,5)
        engine.step(&mut state);
        // Down: (6,6), (6,5), (5,5), (4,5), (3,5)
        state.queue_direction(Direction::Down);
        engine.step(&mut state);
        // Left: (5,6), (6,6), (6,5), (5,5), (4,5)
        state.queue_direction(Direction::Left);
        engine.step(&mut state);
        // Up: (5,5) is still body
        state.queue_direction(Direction::Up);
        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert_eq!(
            result.info.collision_type,
            Some(CollisionType::SelfCollision)
        );
    }

    #[test]
    fn test_player_into_ai_head() {
        let mut engine = engine();
        let mut state = lone_player(Position::new(0, 19));
        state.ai = Some(Snake::new(Position::new(11, 10), Direction::Up, 3));

        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert_eq!(result.info.collision_type, Some(CollisionType::Opponent));
    }

    #[test]
    fn test_player_into_ai_tail_uses_pre_tick_body() {
        // The AI tail would move away this tick, but the player moves first
        let mut engine = engine();
        let mut state = lone_player(Position::new(0, 19));
        state.ai = Some(Snake::new(Position::new(11, 8), Direction::Up, 3));
        assert_eq!(state.ai.as_ref().unwrap().tail(), Position::new(11, 10));

        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert_eq!(result.info.collision_type, Some(CollisionType::Opponent));
    }

    #[test]
    fn test_ai_into_moved_player_only_kills_ai() {
        let mut engine = engine();
        // Player comes down from the right and turns into the corner column
        let player = Snake {
            body: vec![
                Position::new(1, 1),
                Position::new(1, 2),
                Position::new(2, 2),
            ],
            direction: Direction::Left,
        };
        let mut state = GameState::new(player, Position::new(19, 19), Grid::new(20, 20));
        // AI runs up the left wall; after the player moves every exit is blocked
        state.ai = Some(Snake::new(Position::new(0, 2), Direction::Up, 3));

        let result = engine.step(&mut state);

        assert!(!result.terminated);
        assert_eq!(result.info.ai_collision, Some(CollisionType::Opponent));
        assert!(!state.ai_alive());
        assert!(state.ai_respawn_pending);
        assert!(state.is_alive);
        assert_eq!(state.player.body, vec![
            Position::new(0, 1),
            Position::new(1, 1),
            Position::new(1, 2)
        ]);
    }

    #[test]
    fn test_ai_eating_does_not_score() {
        let mut engine = engine();
        let mut state = GameState::new(
            Snake::new(Position::new(15, 15), Direction::Right, 3),
            Position::new(6, 5),
            Grid::new(20, 20),
        );
        state.ai = Some(Snake::new(Position::new(5, 5), Direction::Right, 3));

        let result = engine.step(&mut state);

        assert!(result.info.ai_ate_food);
        assert!(!result.info.ate_food);
        assert_eq!(state.score, 0);
        assert_eq!(state.points_per_food, 1);

        let ai = state.ai.as_ref().unwrap();
        assert_eq!(ai.len(), 4);
        assert_eq!(ai.head(), Position::new(6, 5));
        assert!(!ai.contains(state.food));
        assert!(!state.player.contains(state.food));
    }

    #[test]
    fn test_food_avoids_live_ai_after_player_meal() {
        let mut engine = engine();
        let mut state = lone_player(Position::new(11, 10));
        state.ai = Some(Snake::new(Position::new(5, 5), Direction::Down, 3));

        engine.step(&mut state);

        assert!(!state.player.contains(state.food));
        assert!(!state.ai_body().contains(&state.food));
    }

    #[test]
    fn test_pending_respawn_retried_on_meal() {
        let mut engine = engine();
        let mut state = lone_player(Position::new(11, 10));
        state.ai_respawn_pending = true;

        let result = engine.step(&mut state);

        assert!(result.info.ai_respawned);
        assert!(state.ai_alive());
        assert!(!state.ai_respawn_pending);
    }

    #[test]
    fn test_pending_respawn_waits_for_meal() {
        let mut engine = engine();
        let mut state = lone_player(Position::new(0, 19));
        state.ai_respawn_pending = true;

        let result = engine.step(&mut state);

        assert!(!result.info.ai_respawned);
        assert!(!state.ai_alive());
        assert!(state.ai_respawn_pending);
    }

    #[test]
    fn test_failed_spawn_on_reset_defers_ai() {
        // No cell on a 4x4 board keeps the two-cell spawn margin
        let config = GameConfig {
            grid_width: 4,
            grid_height: 4,
            initial_snake_length: 2,
            ..Default::default()
        };
        let mut engine = GameEngine::with_rng(config, StepRng::new(0, 0));
        let state = engine.reset();

        assert!(!state.ai_alive());
        assert!(state.ai_respawn_pending);
    }

    #[test]
    fn test_tiny_requested_board_resets_on_the_grid() {
        for (width, height) in [(0, 20), (3, 20), (20, 1)] {
            let mut engine = GameEngine::with_seed(GameConfig::new(width, height), 1);
            let state = engine.reset();

            for seg in &state.player.body {
                assert!(state.grid.in_bounds(*seg), "{seg:?} off a {width}x{height} board");
            }
            assert!(state.grid.in_bounds(state.food));
        }
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.is_alive = false;
        let before = state.clone();

        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert_eq!(state, before); // Nothing moves
    }

    #[test]
    fn test_seeded_engines_replay_identically() {
        let mut a = GameEngine::with_seed(GameConfig::default(), 1234);
        let mut b = GameEngine::with_seed(GameConfig::default(), 1234);
        let mut sa = a.reset();
        let mut sb = b.reset();

        for _ in 0..30 {
            let ra = a.step(&mut sa);
            let rb = b.step(&mut sb);
            assert_eq!(ra, rb);
            assert_eq!(sa, sb);
            if ra.terminated {
                break;
            }
        }
    }
}
