use std::time::Duration;

/// Handle for the one tick timer a session may run
///
/// The session never ticks on its own: the host schedules `Session::tick`
/// at [`TickTimer::interval`]. Every start bumps the generation so the host
/// can tell it has to drop its old timer and arm a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickTimer {
    interval: Option<Duration>,
    generation: u64,
}

impl TickTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer, clearing any previous one first
    pub fn start(&mut self, interval: Duration) {
        self.stop();
        self.interval = Some(interval);
        self.generation += 1;
    }

    pub fn stop(&mut self) {
        self.interval = None;
    }

    pub fn is_active(&self) -> bool {
        self.interval.is_some()
    }

    /// Tick interval while active
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Counter bumped on every start
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_and_stop() {
        let mut timer = TickTimer::new();
        assert!(!timer.is_active());

        timer.start(Duration::from_millis(100));
        assert_eq!(timer.interval(), Some(Duration::from_millis(100)));
        assert_eq!(timer.generation(), 1);

        timer.stop();
        assert!(!timer.is_active());
        assert_eq!(timer.generation(), 1);
    }

    #[test]
    fn test_restart_replaces_previous_timer() {
        let mut timer = TickTimer::new();
        timer.start(Duration::from_millis(150));
        timer.start(Duration::from_millis(70));

        assert_eq!(timer.interval(), Some(Duration::from_millis(70)));
        assert_eq!(timer.generation(), 2);
    }
}
