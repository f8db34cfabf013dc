use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::time::{MissedTickBehavior, interval};

use crate::game::{Command, GameConfig, GameEngine, GameSession, Phase, ScoreSubmission};
use crate::input::{InputHandler, KeyAction};
use crate::leaderboard::{Leaderboard, MAX_NAME_CHARS};
use crate::render::{LeaderboardView, Renderer};

pub struct PlayMode {
    session: GameSession,
    leaderboard: Arc<Leaderboard>,
    renderer: Renderer,
    input_handler: InputHandler,
    tick_interval: Duration,
    name_input: String,
    leaderboard_view: Option<LeaderboardView>,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(config: GameConfig, seed: Option<u64>, leaderboard: Leaderboard) -> Self {
        // tokio intervals panic on a zero period
        let tick_interval = Duration::from_millis(config.tick_interval_ms.max(1));
        let engine = match seed {
            Some(seed) => GameEngine::with_seed(config, seed),
            None => GameEngine::new(config),
        };

        Self {
            session: GameSession::new(engine),
            leaderboard: Arc::new(leaderboard),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            tick_interval,
            name_input: String::new(),
            leaderboard_view: None,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.tick_interval);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        let (board_tx, mut board_rx) = mpsc::unbounded_channel();

        loop {
            let was_playing = self.session.phase() == Phase::Playing;

            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, &board_tx);
                    }
                }

                // The clock only runs while playing
                _ = tick_timer.tick(), if was_playing => {
                    self.session.tick();
                }

                // Leaderboard results from the background task
                Some(view) = board_rx.recv() => {
                    if self.leaderboard_view == Some(LeaderboardView::Loading) {
                        self.leaderboard_view = Some(view);
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.renderer.render(
                            frame,
                            &self.session.snapshot(),
                            &self.name_input,
                            self.leaderboard_view.as_ref(),
                        );
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            // A fresh game gets a full period before its first tick
            if !was_playing && self.session.phase() == Phase::Playing {
                tick_timer.reset();
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event, board_tx: &UnboundedSender<LeaderboardView>) {
        let Event::Key(key) = event else {
            return;
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        let phase = self.session.phase();
        let action = self.input_handler.handle_key_event(key, phase);

        // Any key closes the leaderboard
        if self.leaderboard_view.is_some() {
            self.leaderboard_view = None;
            self.should_quit = action == KeyAction::Quit;
            return;
        }

        match action {
            KeyAction::Turn(direction) => {
                self.session.handle(Command::Turn(direction));
            }
            KeyAction::Start => {
                self.session.handle(Command::Start);
            }
            KeyAction::ShowLeaderboard => {
                if matches!(phase, Phase::Waiting | Phase::GameOver) {
                    self.open_leaderboard(None, board_tx);
                }
            }
            KeyAction::NameChar(c) => {
                if self.name_input.chars().count() < MAX_NAME_CHARS {
                    self.name_input.push(c);
                }
            }
            KeyAction::NameBackspace => {
                self.name_input.pop();
            }
            KeyAction::SubmitName => {
                let name = std::mem::take(&mut self.name_input);
                if let Some(submission) = self.session.handle(Command::Submit(name)) {
                    self.open_leaderboard(Some(submission), board_tx);
                }
            }
            KeyAction::SkipName => {
                self.name_input.clear();
                self.session.handle(Command::Skip);
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    /// Show the leaderboard and fill it in from a background task.
    ///
    /// The game loop never waits on the file; the view switches to the
    /// leaderboard straight away whether or not the submission succeeds.
    fn open_leaderboard(
        &mut self,
        submission: Option<ScoreSubmission>,
        board_tx: &UnboundedSender<LeaderboardView>,
    ) {
        self.leaderboard_view = Some(LeaderboardView::Loading);

        let board = Arc::clone(&self.leaderboard);
        let board_tx = board_tx.clone();
        tokio::spawn(async move {
            let view = sync_leaderboard(board, submission).await;
            let _ = board_tx.send(view);
        });
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Store `submission` (if any) and read back the list, off the async runtime.
///
/// Failures are logged and never propagate into the game.
pub async fn sync_leaderboard(
    board: Arc<Leaderboard>,
    submission: Option<ScoreSubmission>,
) -> LeaderboardView {
    let fetched = tokio::task::spawn_blocking(move || {
        if let Some(submission) = submission {
            if let Err(e) = board.add_score(&submission) {
                tracing::error!("failed to submit score: {e}");
            }
        }
        board.top_scores()
    })
    .await;

    match fetched {
        Ok(entries) => LeaderboardView::Entries(entries),
        Err(e) => {
            tracing::error!("failed to load leaderboard: {e}");
            LeaderboardView::Unavailable
        }
    }
}
