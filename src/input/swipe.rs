use crate::game::Direction;

/// Default minimum swipe length in device-independent pixels
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 30.0;

/// Direction of a swipe from its start and end deltas
///
/// The axis with the larger absolute delta wins, vertical on a tie. A swipe
/// shorter than `threshold` along that axis is noise and yields `None`, as
/// does one with a non-finite delta.
pub fn classify_swipe(dx: f32, dy: f32, threshold: f32) -> Option<Direction> {
    let (length, direction) = if dx.abs() > dy.abs() {
        let dir = if dx > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        };
        (dx.abs(), dir)
    } else {
        let dir = if dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        };
        (dy.abs(), dir)
    };

    if !length.is_finite() || length == 0.0 || length < threshold {
        return None;
    }
    Some(direction)
}

/// Pairs swipe start and end points
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f32,
    start: Option<(f32, f32)>,
}

impl SwipeTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            start: None,
        }
    }

    pub fn begin(&mut self, x: f32, y: f32) {
        self.start = Some((x, y));
    }

    /// Finish the gesture; an end without a start is ignored
    pub fn end(&mut self, x: f32, y: f32) -> Option<Direction> {
        let (sx, sy) = self.start.take()?;
        classify_swipe(x - sx, y - sy, self.threshold)
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD)
    }
}
