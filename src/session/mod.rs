//! Screen and run lifecycle
//!
//! A [`Session`] owns the engine, the state of the current run, the high score
//! and the tick timer. It moves between four phases:
//!
//! ```text
//! Idle --start--> Running <--pause/resume--> Paused
//!                   |                          |
//!               collision                   mainMenu --> Idle
//!                   v
//!               GameOver --playAgain/restart--> Running
//!                   |
//!                   +--mainMenu--> Idle
//! ```
//!
//! Actions sent from a phase where they make no sense are ignored. Every
//! accepted transition and every tick hands a [`Snapshot`] to the display.

pub mod snapshot;
pub mod timer;

use anyhow::Result;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::game::{
    Difficulty, DifficultyPreset, Direction, GameConfig, GameEngine, GameOverCause, GameState,
    TickOutcome,
};
use crate::input::{Button, Command};
use crate::persistence::{HighScoreGateway, HighScoreStore};
use crate::render::DisplaySink;

pub use snapshot::Snapshot;
pub use timer::TickTimer;

/// Which screen the session is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Menu, no run in progress
    Idle,
    /// Timer active, the engine ticks
    Running,
    /// Timer stopped, run frozen
    Paused,
    /// Run finished, waiting for the player
    GameOver,
}

/// Game session driven by a host's timer and input
pub struct Session<S, D, R = rand::rngs::ThreadRng> {
    engine: GameEngine<R>,
    run: Option<GameState>,
    phase: Phase,
    selected: Difficulty,
    /// Difficulty fixed when the current run started
    active: Difficulty,
    high_score: u32,
    new_high_score: bool,
    game_over_cause: Option<GameOverCause>,
    gateway: HighScoreGateway<S>,
    display: D,
    timer: TickTimer,
    runs_started: u64,
}

impl<S: HighScoreStore, D: DisplaySink> Session<S, D> {
    pub fn new(config: &GameConfig, store: S, display: D) -> Result<Self> {
        Self::with_rng(config, store, display, rand::thread_rng())
    }
}

impl<S: HighScoreStore, D: DisplaySink, R: Rng> Session<S, D, R> {
    /// Create a session in the menu, loading the stored high score
    pub fn with_rng(config: &GameConfig, store: S, display: D, rng: R) -> Result<Self> {
        let engine = GameEngine::with_rng(config, rng)?;
        let mut gateway = HighScoreGateway::new(store);
        let high_score = gateway.load();

        let mut session = Self {
            engine,
            run: None,
            phase: Phase::Idle,
            selected: config.difficulty,
            active: config.difficulty,
            high_score,
            new_high_score: false,
            game_over_cause: None,
            gateway,
            display,
            timer: TickTimer::new(),
            runs_started: 0,
        };
        session.present();
        Ok(session)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Whether the last finished run set a new high score
    pub fn is_new_high_score(&self) -> bool {
        self.new_high_score
    }

    pub fn game_over_cause(&self) -> Option<GameOverCause> {
        self.game_over_cause
    }

    /// State of the current or last run
    pub fn state(&self) -> Option<&GameState> {
        self.run.as_ref()
    }

    /// Number of runs begun since the session was created
    pub fn runs_started(&self) -> u64 {
        self.runs_started
    }

    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Difficulty the next run will use
    pub fn selected_difficulty(&self) -> Difficulty {
        self.selected
    }

    /// Difficulty in effect for the current run
    pub fn active_difficulty(&self) -> Difficulty {
        self.active
    }

    fn preset(&self) -> DifficultyPreset {
        self.active.preset()
    }

    /// Storage problem to report to the player, cleared on read
    pub fn take_storage_warning(&mut self) -> Option<String> {
        self.gateway.take_warning()
    }

    /// Pick the difficulty for the next run; a run in progress keeps its own
    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        if self.selected == difficulty {
            return;
        }
        debug!(%difficulty, "difficulty selected");
        self.selected = difficulty;
        self.present();
    }

    /// Idle --startGame--> Running
    pub fn start_game(&mut self) -> bool {
        if self.phase != Phase::Idle {
            debug!(phase = ?self.phase, "start ignored");
            return false;
        }
        self.begin_run();
        true
    }

    /// GameOver --playAgain--> Running
    pub fn play_again(&mut self) -> bool {
        if self.phase != Phase::GameOver {
            debug!(phase = ?self.phase, "play again ignored");
            return false;
        }
        self.begin_run();
        true
    }

    /// Fresh run from Paused or GameOver
    pub fn restart(&mut self) -> bool {
        if !matches!(self.phase, Phase::Paused | Phase::GameOver) {
            debug!(phase = ?self.phase, "restart ignored");
            return false;
        }
        self.begin_run();
        true
    }

    /// Running --pause--> Paused
    pub fn pause(&mut self) -> bool {
        if self.phase != Phase::Running {
            debug!(phase = ?self.phase, "pause ignored");
            return false;
        }
        self.timer.stop();
        self.phase = Phase::Paused;
        info!("game paused");
        self.present();
        true
    }

    /// Paused --resume--> Running
    pub fn resume(&mut self) -> bool {
        if self.phase != Phase::Paused {
            debug!(phase = ?self.phase, "resume ignored");
            return false;
        }
        self.timer.start(self.preset().tick_interval());
        self.phase = Phase::Running;
        info!("game resumed");
        self.present();
        true
    }

    /// Pause while running, resume while paused
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(),
            _ => false,
        }
    }

    /// Back to the menu from Paused or GameOver
    pub fn main_menu(&mut self) -> bool {
        if !matches!(self.phase, Phase::Paused | Phase::GameOver) {
            debug!(phase = ?self.phase, "main menu ignored");
            return false;
        }
        self.timer.stop();
        self.phase = Phase::Idle;
        info!("returned to main menu");
        self.present();
        true
    }

    /// GameOver --menu--> Idle
    pub fn menu_from_game_over(&mut self) -> bool {
        if self.phase != Phase::GameOver {
            debug!(phase = ?self.phase, "menu ignored");
            return false;
        }
        self.main_menu()
    }

    /// Turn the snake; only while running, and never straight back
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let Some(state) = self.run.as_mut() else {
            return false;
        };
        let accepted = state.apply_heading(direction);
        if !accepted {
            debug!(?direction, "reversing heading ignored");
        }
        accepted
    }

    /// React to a button on the host's screen
    pub fn press(&mut self, button: Button) -> bool {
        match button {
            Button::Start => self.start_game(),
            Button::Pause => self.pause(),
            Button::Resume => self.resume(),
            Button::Restart => self.restart(),
            Button::MainMenu => self.main_menu(),
            Button::PlayAgain => self.play_again(),
            Button::MenuFromGameOver => self.menu_from_game_over(),
        }
    }

    /// Apply a routed input command, returns whether anything changed
    ///
    /// `Command::Quit` is for the host and is never handled here.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Steer(direction) => self.steer(direction),
            Command::TogglePause => self.toggle_pause(),
            Command::Press(button) => self.press(button),
            Command::SelectDifficulty(difficulty) => {
                self.select_difficulty(difficulty);
                true
            }
            Command::Quit => false,
        }
    }

    /// Advance the run by one tick
    ///
    /// Does nothing unless the session is running; returns the engine's
    /// outcome otherwise.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        if self.phase != Phase::Running {
            return None;
        }
        let preset = self.preset();
        let state = self.run.as_mut()?;

        let outcome = self.engine.tick(state, &preset);
        if let TickOutcome::Ended(cause) = outcome {
            self.finish_run(cause);
        } else {
            self.present();
        }
        Some(outcome)
    }

    /// Current drawable state
    pub fn snapshot(&self) -> Snapshot {
        let run = self.run.as_ref();
        Snapshot {
            phase: self.phase,
            tile_count: self.engine.grid().tile_count(),
            snake: run
                .map(|state| state.snake.cells().copied().collect())
                .unwrap_or_default(),
            // A full board ends the run with the snake grown over the last food
            food: run
                .map(|state| state.food)
                .filter(|_| self.game_over_cause != Some(GameOverCause::BoardFull)),
            score: run.map_or(0, GameState::score),
            level: run.map_or(1, GameState::level),
            high_score: self.high_score,
            difficulty: match self.phase {
                Phase::Idle => self.selected,
                _ => self.active,
            },
            selected_difficulty: self.selected,
            new_high_score: self.new_high_score,
            game_over_cause: self.game_over_cause,
        }
    }

    fn begin_run(&mut self) {
        self.timer.stop();
        self.runs_started += 1;
        self.active = self.selected;
        self.new_high_score = false;
        self.game_over_cause = None;

        // The previous run's state is reset in place, the first one is built
        let ready = match self.run.as_mut() {
            Some(state) => self.engine.reset(state),
            None => match self.engine.new_run() {
                Some(state) => {
                    self.run = Some(state);
                    true
                }
                None => false,
            },
        };

        if ready {
            self.phase = Phase::Running;
            self.timer.start(self.preset().tick_interval());
            info!(difficulty = %self.active, "run started");
            self.present();
        } else {
            warn!("no room for food on a fresh board");
            self.finish_run(GameOverCause::BoardFull);
        }
    }

    fn finish_run(&mut self, cause: GameOverCause) {
        self.timer.stop();
        self.phase = Phase::GameOver;
        self.game_over_cause = Some(cause);

        let score = self.run.as_ref().map_or(0, GameState::score);
        self.new_high_score = score > self.high_score;
        if self.new_high_score {
            self.high_score = score;
            self.gateway.save(score);
        }

        info!(
            ?cause,
            score,
            high_score = self.high_score,
            new_high_score = self.new_high_score,
            "game over"
        );
        self.present();
    }

    fn present(&mut self) {
        let snapshot = self.snapshot();
        self.display.present(&snapshot);
    }
}
