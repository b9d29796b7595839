use anyhow::{Result, anyhow};
use rand::{Rng, seq::SliceRandom};
use tracing::{debug, trace};

use super::{
    config::GameConfig,
    difficulty::DifficultyPreset,
    grid::{Cell, Grid},
    state::{GameState, Snake},
};

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// No free cell was left for the food
    BoardFull,
}

/// Result of one engine tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No heading yet, the snake held its position
    Held,
    /// The snake moved one cell
    Moved {
        /// Whether food was eaten and the snake grew
        ate_food: bool,
        /// Points awarded this tick
        points: u32,
    },
    /// The run is over
    Ended(GameOverCause),
}

/// Movement, collision and food rules
///
/// The engine owns the board and the random source; the per-run state is
/// passed in so a session can throw it away and build a new one each run.
pub struct GameEngine<R = rand::rngs::ThreadRng> {
    grid: Grid,
    origin: Cell,
    base_points: u32,
    max_food_attempts: u32,
    rng: R,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: &GameConfig) -> Result<Self> {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine drawing food cells from `rng`
    pub fn with_rng(config: &GameConfig, rng: R) -> Result<Self> {
        config.validate().map_err(|e| anyhow!(e))?;
        let grid = config
            .grid()
            .ok_or_else(|| anyhow!("config does not describe a grid"))?;

        Ok(Self {
            grid,
            origin: config.origin,
            base_points: config.base_points,
            max_food_attempts: config.max_food_attempts,
            rng,
        })
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Build the state for a fresh run
    ///
    /// Returns `None` only when the board has no room for food next to the
    /// starting snake.
    pub fn new_run(&mut self) -> Option<GameState> {
        let snake = Snake::new(self.origin);
        let food = self.spawn_food_avoid_snake(&snake)?;
        Some(GameState::new(snake, food))
    }

    /// Reset an existing state in place and respawn its food
    pub fn reset(&mut self, state: &mut GameState) -> bool {
        state.reset(self.origin);
        match self.spawn_food_avoid_snake(&state.snake) {
            Some(food) => {
                state.food = food;
                true
            }
            None => false,
        }
    }

    /// Execute one tick of the game
    pub fn tick(&mut self, state: &mut GameState, preset: &DifficultyPreset) -> TickOutcome {
        let Some(new_head) = state.next_head() else {
            trace!("no heading yet, holding position");
            return TickOutcome::Held;
        };

        if !self.grid.in_bounds(new_head) {
            return TickOutcome::Ended(GameOverCause::Wall);
        }

        let ate_food = new_head == state.food;

        if state.snake.blocks(new_head, ate_food) {
            return TickOutcome::Ended(GameOverCause::SelfCollision);
        }

        state.advance(new_head, ate_food);

        if !ate_food {
            return TickOutcome::Moved {
                ate_food,
                points: 0,
            };
        }

        let points = preset.points_for(self.base_points);
        state.award(points);
        debug!(
            score = state.score(),
            level = state.level(),
            length = state.snake.len(),
            "food eaten"
        );

        match self.spawn_food_avoid_snake(&state.snake) {
            Some(food) => {
                state.food = food;
                TickOutcome::Moved { ate_food, points }
            }
            None => TickOutcome::Ended(GameOverCause::BoardFull),
        }
    }

    /// Spawn food at a random cell not covered by the snake
    ///
    /// Draws uniformly until a free cell comes up. After `max_food_attempts`
    /// misses it picks uniformly among the free cells instead, and returns
    /// `None` if there are none.
    fn spawn_food_avoid_snake(&mut self, snake: &Snake) -> Option<Cell> {
        for _ in 0..self.max_food_attempts {
            let cell = self.grid.random_cell(&mut self.rng);
            if !snake.occupies(cell) {
                return Some(cell);
            }
        }

        debug!(
            attempts = self.max_food_attempts,
            length = snake.len(),
            "food sampling exhausted, scanning for free cells"
        );

        let tiles = self.grid.tile_count();
        let free: Vec<Cell> = (0..tiles)
            .flat_map(|row| (0..tiles).map(move |col| Cell::new(col, row)))
            .filter(|&cell| !snake.occupies(cell))
            .collect();

        free.choose(&mut self.rng).copied()
    }
}
