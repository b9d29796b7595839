use std::fmt;
use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Named difficulty the player picks before a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Tick interval and score multiplier bundled under a difficulty
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyPreset {
    pub tick_interval_ms: u64,
    pub score_multiplier: f64,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn preset(&self) -> DifficultyPreset {
        match self {
            Difficulty::Easy => DifficultyPreset {
                tick_interval_ms: 150,
                score_multiplier: 1.0,
            },
            Difficulty::Medium => DifficultyPreset {
                tick_interval_ms: 100,
                score_multiplier: 1.5,
            },
            Difficulty::Hard => DifficultyPreset {
                tick_interval_ms: 70,
                score_multiplier: 2.0,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl DifficultyPreset {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Points for one food item, `floor(base_points * multiplier)`
    pub fn points_for(&self, base_points: u32) -> u32 {
        (f64::from(base_points) * self.score_multiplier).floor() as u32
    }
}
