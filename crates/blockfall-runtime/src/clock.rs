use std::time::{Duration, Instant};

/// Measures the time between consecutive frames.
///
/// The clock is an explicit value owned by the event loop; nothing reads a
/// global timer. Time never runs backwards: an instant earlier than the
/// previous tick yields a zero duration.
///
/// # Example
///
/// ```
/// use std::time::{Duration, Instant};
///
/// use blockfall_runtime::FrameClock;
///
/// let start = Instant::now();
/// let mut clock = FrameClock::new();
/// assert_eq!(clock.tick(start), Duration::ZERO);
/// assert_eq!(clock.tick(start + Duration::from_millis(16)), Duration::from_millis(16));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_tick: Option<Instant>,
}

impl FrameClock {
    #[must_use]
    pub const fn new() -> Self {
        Self { last_tick: None }
    }

    /// Records a frame at `now` and returns the time since the previous one.
    ///
    /// Returns zero for the first frame.
    pub fn tick(&mut self, now: Instant) -> Duration {
        let elapsed = self
            .last_tick
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_tick = Some(now);
        elapsed
    }

    /// Restarts measurement from `now`, discarding any time since the last frame.
    pub fn reset(&mut self, now: Instant) {
        self.last_tick = Some(now);
    }

    /// Forgets the previous frame, so that the next tick reports zero.
    pub fn clear(&mut self) {
        self.last_tick = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(Instant::now()), Duration::ZERO);
    }

    #[test]
    fn test_tick_reports_time_since_previous_tick() {
        let start = Instant::now();
        let mut clock = FrameClock::new();
        clock.tick(start);

        let mut total = Duration::ZERO;
        for ms in [16, 17, 16, 50] {
            let now = start + total + Duration::from_millis(ms);
            assert_eq!(clock.tick(now), Duration::from_millis(ms));
            total += Duration::from_millis(ms);
        }
    }

    #[test]
    fn test_tick_never_goes_backwards() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut clock = FrameClock::new();
        clock.tick(start);
        assert_eq!(clock.tick(start - Duration::from_millis(10)), Duration::ZERO);
    }

    #[test]
    fn test_reset_discards_pending_time() {
        let start = Instant::now();
        let mut clock = FrameClock::new();
        clock.tick(start);
        clock.reset(start + Duration::from_secs(5));
        assert_eq!(
            clock.tick(start + Duration::from_millis(5016)),
            Duration::from_millis(16)
        );
    }

    #[test]
    fn test_clear_restarts_from_zero() {
        let start = Instant::now();
        let mut clock = FrameClock::new();
        clock.tick(start);
        clock.clear();
        assert_eq!(clock.tick(start + Duration::from_secs(1)), Duration::ZERO);
    }
}
