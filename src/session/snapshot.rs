use crate::game::{Cell, Difficulty, GameOverCause};

use super::Phase;

/// Everything a display needs to draw one frame
///
/// Handed out by value; the session never reads it back.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub phase: Phase,
    /// Board side length in cells
    pub tile_count: i32,
    /// Snake segments head-first, empty before the first run
    pub snake: Vec<Cell>,
    /// Food cell, `None` before the first run and after the board filled up
    pub food: Option<Cell>,
    pub score: u32,
    pub level: u32,
    pub high_score: u32,
    /// Difficulty of the current run, or the selection while no run exists
    pub difficulty: Difficulty,
    /// Difficulty that the next run will use
    pub selected_difficulty: Difficulty,
    /// Whether the last finished run beat the previous high score
    pub new_high_score: bool,
    /// Why the last run ended
    pub game_over_cause: Option<GameOverCause>,
}

impl Snapshot {
    pub fn head(&self) -> Option<Cell> {
        self.snake.first().copied()
    }
}
