pub mod handler;
pub mod swipe;

pub use handler::{Button, Command, InputEvent, InputRouter};
pub use swipe::{DEFAULT_SWIPE_THRESHOLD, SwipeTracker, classify_swipe};
