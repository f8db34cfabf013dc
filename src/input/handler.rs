use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Direction, Phase};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    Start,
    ShowLeaderboard,
    /// Typed character while entering a name
    NameChar(char),
    NameBackspace,
    SubmitName,
    SkipName,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Translate a key press. Name entry swallows ordinary keys so typing a
    /// name cannot steer or restart the game.
    pub fn handle_key_event(&self, key: KeyEvent, phase: Phase) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        if phase == Phase::EnteringName {
            return match key.code {
                KeyCode::Enter => KeyAction::SubmitName,
                KeyCode::Esc => KeyAction::SkipName,
                KeyCode::Backspace => KeyAction::NameBackspace,
                KeyCode::Char(c) if !c.is_control() => KeyAction::NameChar(c),
                _ => KeyAction::None,
            };
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Turn(Direction::Up),
            KeyCode::Down => KeyAction::Turn(Direction::Down),
            KeyCode::Left => KeyAction::Turn(Direction::Left),
            KeyCode::Right => KeyAction::Turn(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Turn(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Turn(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Turn(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Turn(Direction::Right),

            // Controls
            KeyCode::Char(' ') => KeyAction::Start,
            KeyCode::Char('l') | KeyCode::Char('L') => KeyAction::ShowLeaderboard,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
