//! Pixel Snake - a grid snake game engine
//!
//! This library provides:
//! - Core game logic: grid, snake, collisions, food and scoring (game module)
//! - The screen state machine that drives runs (session module)
//! - Keyboard and swipe input routing (input module)
//! - Best-effort high score persistence (persistence module)
//! - Display sinks and a terminal renderer (render module)
//! - The interactive terminal host (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod persistence;
pub mod render;
pub mod session;
