//! Game lifecycle: which inputs are honored when, and what a finished game emits.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::{
    action::{Command, Direction},
    engine::{GameEngine, StepResult},
    grid::Grid,
    state::{GameState, Position},
};

/// Name recorded when the player leaves the name blank
pub const DEFAULT_PLAYER_NAME: &str = "Anonymous";

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Board shown, waiting for the first start
    Waiting,
    /// Ticks are running
    Playing,
    /// Game finished and name entry closed
    GameOver,
    /// Player crashed; waiting for a name or a skip
    EnteringName,
}

/// A finished score handed to the leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub name: String,
    pub score: u32,
}

/// Read-only view of a session for renderers
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub phase: Phase,
    pub grid: Grid,
    pub player: &'a [Position],
    /// `None` while the AI is dead
    pub ai: Option<&'a [Position]>,
    pub food: Position,
    pub score: u32,
    pub points_per_food: u32,
}

/// One game at a time: owns the engine, the board and the lifecycle phase.
pub struct GameSession<R: Rng = StdRng> {
    engine: GameEngine<R>,
    state: GameState,
    phase: Phase,
}

impl<R: Rng> GameSession<R> {
    /// Start in `Waiting` with a fresh board to show
    pub fn new(mut engine: GameEngine<R>) -> Self {
        let state = engine.reset();
        Self {
            engine,
            state,
            phase: Phase::Waiting,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            grid: self.state.grid,
            player: &self.state.player.body,
            ai: self.state.ai.as_ref().map(|ai| ai.body.as_slice()),
            food: self.state.food,
            score: self.state.score,
            points_per_food: self.state.points_per_food,
        }
    }

    /// Reset the board and start playing. Only honored from `Waiting` or `GameOver`.
    pub fn start(&mut self) -> bool {
        if !matches!(self.phase, Phase::Waiting | Phase::GameOver) {
            return false;
        }

        self.state = self.engine.reset();
        self.phase = Phase::Playing;
        tracing::info!("game started");
        true
    }

    /// Buffer a player heading. Only honored while `Playing`.
    pub fn queue_direction(&mut self, direction: Direction) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        self.state.queue_direction(direction)
    }

    /// Advance one tick while `Playing`; a player crash moves to `EnteringName`.
    pub fn tick(&mut self) -> Option<StepResult> {
        if self.phase != Phase::Playing {
            return None;
        }

        let result = self.engine.step(&mut self.state);
        if result.terminated {
            self.phase = Phase::EnteringName;
            tracing::info!(
                score = self.state.score,
                collision = ?result.info.collision_type,
                "game over, waiting for name"
            );
        }
        Some(result)
    }

    /// Close name entry and produce the score record.
    ///
    /// A blank name is recorded as [`DEFAULT_PLAYER_NAME`].
    pub fn submit_name(&mut self, name: &str) -> Option<ScoreSubmission> {
        if self.phase != Phase::EnteringName {
            return None;
        }

        self.phase = Phase::GameOver;
        let name = match name.trim() {
            "" => DEFAULT_PLAYER_NAME,
            trimmed => trimmed,
        };
        tracing::info!(player = name, score = self.state.score, "score submitted");

        Some(ScoreSubmission {
            name: name.to_string(),
            score: self.state.score,
        })
    }

    /// Close name entry without recording anything
    pub fn skip_name(&mut self) -> bool {
        if self.phase != Phase::EnteringName {
            return false;
        }
        self.phase = Phase::GameOver;
        tracing::info!(score = self.state.score, "score entry skipped");
        true
    }

    /// Dispatch a front-end command. Commands outside their phase are dropped.
    pub fn handle(&mut self, command: Command) -> Option<ScoreSubmission> {
        match command {
            Command::Turn(direction) => {
                self.queue_direction(direction);
                None
            }
            Command::Start => {
                self.start();
                None
            }
            Command::Submit(name) => self.submit_name(&name),
            Command::Skip => {
                self.skip_name();
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, Snake};

    fn session() -> GameSession {
        GameSession::new(GameEngine::with_seed(GameConfig::default(), 5))
    }

    /// Drive a started session into the left wall
    fn crash(session: &mut GameSession) {
        session.state.ai = None;
        session.state.player = Snake::new(Position::new(0, 10), Direction::Left, 3);
        session.state.pending_direction = Direction::Left;
        session.tick();
    }

    #[test]
    fn test_starts_waiting() {
        let session = session();
        assert_eq!(session.phase(), Phase::Waiting);
        assert_eq!(session.state().score, 0);
    }

    #[test]
    fn test_start_from_waiting() {
        let mut session = session();
        assert!(session.start());
        assert_eq!(session.phase(), Phase::Playing);
    }

    #[test]
    fn test_start_while_playing_is_noop() {
        let mut session = session();
        session.start();
        session.state.ai = None;
        session.tick();
        let before = session.state().clone();

        assert!(!session.start());
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_start_resets_state() {
        let mut session = session();
        session.start();
        session.state.score = 12;
        session.state.points_per_food = 5;
        crash(&mut session);
        session.skip_name();

        assert!(session.start());
        assert_eq!(session.state().score, 0);
        assert_eq!(session.state().points_per_food, 1);
        assert!(session.state().is_alive);
        assert_eq!(session.state().player.len(), 3);
    }

    #[test]
    fn test_tick_ignored_outside_playing() {
        let mut session = session();
        let before = session.state().clone();
        assert!(session.tick().is_none());
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_directions_ignored_outside_playing() {
        let mut session = session();
        assert!(!session.queue_direction(Direction::Up));
        assert_eq!(session.state().pending_direction, Direction::Right);

        session.start();
        assert!(session.queue_direction(Direction::Up));
        assert_eq!(session.state().pending_direction, Direction::Up);
    }

    #[test]
    fn test_crash_enters_name_entry() {
        let mut session = session();
        session.start();
        crash(&mut session);

        assert_eq!(session.phase(), Phase::EnteringName);
        assert!(session.tick().is_none());
        assert!(!session.start());
        assert!(!session.queue_direction(Direction::Up));
    }

    #[test]
    fn test_ai_death_does_not_end_game() {
        let mut session = session();
        session.start();
        session.state.player = Snake {
            body: vec![
                Position::new(1, 1),
                Position::new(1, 2),
                Position::new(2, 2),
            ],
            direction: Direction::Left,
        };
        session.state.pending_direction = Direction::Left;
        session.state.food = Position::new(19, 19);
        session.state.ai = Some(Snake::new(Position::new(0, 2), Direction::Up, 3));

        let result = session.tick().unwrap();

        assert!(result.info.ai_collision.is_some());
        assert_eq!(session.phase(), Phase::Playing);
    }

    #[test]
    fn test_submit_emits_record() {
        let mut session = session();
        session.start();
        session.state.score = 42;
        crash(&mut session);

        let record = session.submit_name("  ada  ").unwrap();
        assert_eq!(record, ScoreSubmission {
            name: "ada".to_string(),
            score: 42
        });
        assert_eq!(session.phase(), Phase::GameOver);
    }

    #[test]
    fn test_blank_name_defaults() {
        let mut session = session();
        session.start();
        crash(&mut session);

        let record = session.submit_name("   ").unwrap();
        assert_eq!(record.name, DEFAULT_PLAYER_NAME);
    }

    #[test]
    fn test_skip_emits_nothing() {
        let mut session = session();
        session.start();
        crash(&mut session);

        assert_eq!(session.handle(Command::Skip), None);
        assert_eq!(session.phase(), Phase::GameOver);
        assert!(session.start());
    }

    #[test]
    fn test_name_entry_commands_ignored_elsewhere() {
        let mut session = session();
        assert_eq!(session.handle(Command::Submit("bob".into())), None);
        assert!(!session.skip_name());
        assert_eq!(session.phase(), Phase::Waiting);
    }

    #[test]
    fn test_handle_dispatches() {
        let mut session = session();
        session.handle(Command::Start);
        assert_eq!(session.phase(), Phase::Playing);

        session.handle(Command::Turn(Direction::Down));
        assert_eq!(session.state().pending_direction, Direction::Down);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut session = session();
        session.start();
        let snapshot = session.snapshot();

        assert_eq!(snapshot.phase, Phase::Playing);
        assert_eq!(snapshot.player, session.state().player.body.as_slice());
        assert_eq!(snapshot.ai.is_some(), session.state().ai_alive());
        assert_eq!(snapshot.food, session.state().food);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.points_per_food, 1);
    }
}
