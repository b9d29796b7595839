//! Durable storage for the high score
//!
//! The high score is the only value that outlives a process. Storage is best
//! effort: failures are logged and reported as warnings, never as errors that
//! stop a game.

pub mod gateway;
pub mod store;

pub use gateway::HighScoreGateway;
pub use store::{HIGH_SCORE_KEY, HighScoreStore, JsonFileStore, MemoryStore};
