use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Difficulty, Direction};
use crate::session::Phase;

use super::swipe::SwipeTracker;

/// On-screen buttons a host may expose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Start,
    Pause,
    Resume,
    Restart,
    MainMenu,
    PlayAgain,
    MenuFromGameOver,
}

/// Raw input as delivered by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(KeyEvent),
    SwipeStart { x: f32, y: f32 },
    SwipeEnd { x: f32, y: f32 },
    ButtonPress(Button),
}

/// What an input asks the session to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    TogglePause,
    Press(Button),
    SelectDifficulty(Difficulty),
    Quit,
}

/// Turns keys, swipes and buttons into session commands
///
/// Steering is only produced while a run is in progress. The session applies
/// its own phase checks to everything else.
pub struct InputRouter {
    swipe: SwipeTracker,
}

impl InputRouter {
    pub fn new(swipe_threshold: f32) -> Self {
        Self {
            swipe: SwipeTracker::new(swipe_threshold),
        }
    }

    pub fn route(&mut self, event: InputEvent, phase: Phase) -> Option<Command> {
        match event {
            InputEvent::KeyDown(key) => self.handle_key_event(key, phase),
            InputEvent::SwipeStart { x, y } => {
                self.swipe.begin(x, y);
                None
            }
            InputEvent::SwipeEnd { x, y } => {
                let direction = self.swipe.end(x, y)?;
                (phase == Phase::Running).then_some(Command::Steer(direction))
            }
            InputEvent::ButtonPress(button) => Some(Command::Press(button)),
        }
    }

    pub fn handle_key_event(&self, key: KeyEvent, phase: Phase) -> Option<Command> {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Command::Quit);
        }

        if let Some(direction) = steering_key(key.code) {
            return (phase == Phase::Running).then_some(Command::Steer(direction));
        }

        match key.code {
            KeyCode::Char(' ') => Some(Command::TogglePause),

            KeyCode::Enter => match phase {
                Phase::Idle => Some(Command::Press(Button::Start)),
                Phase::GameOver => Some(Command::Press(Button::PlayAgain)),
                _ => None,
            },
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Press(Button::Restart)),
            KeyCode::Char('m') | KeyCode::Char('M') => match phase {
                Phase::Paused => Some(Command::Press(Button::MainMenu)),
                Phase::GameOver => Some(Command::Press(Button::MenuFromGameOver)),
                _ => None,
            },

            KeyCode::Char('1') => Some(Command::SelectDifficulty(Difficulty::Easy)),
            KeyCode::Char('2') => Some(Command::SelectDifficulty(Difficulty::Medium)),
            KeyCode::Char('3') => Some(Command::SelectDifficulty(Difficulty::Hard)),

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),

            _ => None,
        }
    }
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new(super::swipe::DEFAULT_SWIPE_THRESHOLD)
    }
}

/// Arrow keys and WASD
fn steering_key(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        _ => None,
    }
}
