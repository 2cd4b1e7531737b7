use std::time::{Duration, Instant};

/// Ceiling applied to a single frame delta. A frame that took longer than
/// this (debugger pause, window restore, stalled swap) advances animation by
/// at most one ceiling's worth of time instead of catching up.
pub const DEFAULT_DELTA_CEILING: Duration = Duration::from_millis(250);

/// Monotonic elapsed/delta time source for the frame loop.
///
/// `elapsed` accumulates only the deltas actually handed out, so time spent
/// suspended (or clamped away by the ceiling) never reaches animation state.
pub struct FrameClock {
    last: Instant,
    elapsed: Duration,
    delta_ceiling: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_delta_ceiling(DEFAULT_DELTA_CEILING)
    }

    pub fn with_delta_ceiling(delta_ceiling: Duration) -> Self {
        FrameClock {
            last: Instant::now(),
            elapsed: Duration::ZERO,
            delta_ceiling,
        }
    }

    /// Sample the clock at the start of a frame, returning the clamped delta
    /// since the previous sample.
    pub fn tick(&mut self) -> Duration {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> Duration {
        // saturating: a non-monotonic sample yields zero, never a negative delta
        let raw = now.saturating_duration_since(self.last);
        self.last = now;

        let delta = raw.min(self.delta_ceiling);
        self.elapsed += delta;
        delta
    }

    /// Total animation time consumed so far.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Drop the interval since the last sample. Called when the window is
    /// restored so the first resumed frame measures from the restore point
    /// rather than from before the suspension.
    pub fn rebaseline(&mut self) {
        self.rebaseline_at(Instant::now());
    }

    pub fn rebaseline_at(&mut self, now: Instant) {
        self.last = now;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_is_non_negative() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        clock.rebaseline_at(start + Duration::from_millis(100));

        // Sampling "before" the baseline must not underflow
        let delta = clock.tick_at(start);
        assert_eq!(delta, Duration::ZERO);
    }

    #[test]
    fn test_delta_is_clamped_to_ceiling() {
        let mut clock = FrameClock::with_delta_ceiling(Duration::from_millis(250));
        let start = Instant::now();
        clock.rebaseline_at(start);

        let delta = clock.tick_at(start + Duration::from_secs(30));
        assert_eq!(delta, Duration::from_millis(250));
        assert_eq!(clock.elapsed(), Duration::from_millis(250));
    }

    #[test]
    fn test_elapsed_accumulates_consumed_deltas() {
        let mut clock = FrameClock::with_delta_ceiling(Duration::from_millis(250));
        let start = Instant::now();
        clock.rebaseline_at(start);

        clock.tick_at(start + Duration::from_millis(16));
        clock.tick_at(start + Duration::from_millis(32));
        assert_eq!(clock.elapsed(), Duration::from_millis(32));
    }

    #[test]
    fn test_rebaseline_swallows_hidden_time() {
        let mut clock = FrameClock::with_delta_ceiling(Duration::from_millis(250));
        let start = Instant::now();
        clock.rebaseline_at(start);

        // Ten seconds pass while the window is hidden, then the loop resumes.
        let restore = start + Duration::from_secs(10);
        clock.rebaseline_at(restore);

        let delta = clock.tick_at(restore + Duration::from_millis(16));
        assert_eq!(delta, Duration::from_millis(16));
        assert_eq!(clock.elapsed(), Duration::from_millis(16));
    }
}
