//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The session layer drives it once per tick.

pub mod action;
pub mod config;
pub mod difficulty;
pub mod engine;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::GameConfig;
pub use difficulty::{Difficulty, DifficultyPreset};
pub use engine::{GameEngine, GameOverCause, TickOutcome};
pub use grid::{Cell, Grid};
pub use state::{GameState, Snake, level_for_score};
