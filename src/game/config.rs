use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{
    difficulty::Difficulty,
    grid::{Cell, Grid},
};

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square play field in device-independent pixels
    pub canvas_size: u32,
    /// Side length of one cell in the same unit
    pub cell_size: u32,
    /// Points for one food item before the difficulty multiplier
    pub base_points: u32,
    /// Where the snake starts every run
    pub origin: Cell,
    /// Upper bound on food placement draws before giving up
    pub max_food_attempts: u32,
    /// Minimum swipe length, shorter gestures are ignored
    pub swipe_threshold: f32,
    /// Difficulty selected when the game starts
    pub difficulty: Difficulty,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_size: 400,
            cell_size: 20,
            base_points: 10,
            origin: Cell::new(10, 10),
            max_food_attempts: 10_000,
            swipe_threshold: 30.0,
            difficulty: Difficulty::default(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom canvas
    pub fn new(canvas_size: u32, cell_size: u32) -> Self {
        Self {
            canvas_size,
            cell_size,
            ..Default::default()
        }
    }

    /// Read a configuration from a JSON file
    ///
    /// Missing fields take their default values.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config {:?}", path))
    }

    /// The board described by the canvas and cell sizes
    pub fn grid(&self) -> Option<Grid> {
        Grid::from_canvas(self.canvas_size, self.cell_size)
    }

    /// Check that the configuration describes a playable board
    pub fn validate(&self) -> Result<(), String> {
        if self.cell_size == 0 {
            return Err("cell_size must be at least 1".to_string());
        }

        let Some(grid) = self.grid() else {
            return Err(format!(
                "canvas_size ({}) must be at least one cell_size ({})",
                self.canvas_size, self.cell_size
            ));
        };

        if grid.tile_count() < 2 {
            return Err(format!(
                "grid must be at least 2x2 to fit snake and food, got {}x{}",
                grid.tile_count(),
                grid.tile_count()
            ));
        }

        if !grid.in_bounds(self.origin) {
            return Err(format!(
                "origin ({}, {}) lies outside the {}x{} grid",
                self.origin.col,
                self.origin.row,
                grid.tile_count(),
                grid.tile_count()
            ));
        }

        if self.max_food_attempts == 0 {
            return Err("max_food_attempts must be at least 1".to_string());
        }

        if self.swipe_threshold.is_nan() || self.swipe_threshold < 0.0 {
            return Err(format!(
                "swipe_threshold must be non-negative, got {}",
                self.swipe_threshold
            ));
        }

        Ok(())
    }
}
