//! Frame clock with a clamped physics delta

use std::time::{Duration, Instant};

/// Default upper bound on a single physics step, in seconds
pub const DEFAULT_MAX_DELTA: f32 = 0.05;

/// Samples wall-clock time once per frame and produces the physics delta.
///
/// The delta is clamped to `max_delta` so a frame-rate hitch never turns into
/// one huge integration step.
pub struct FrameClock {
    /// Clamped time since the previous frame, in seconds
    pub delta: f32,
    /// Sum of all clamped deltas, in seconds
    pub total_time: f64,
    /// Frames ticked since the clock started
    pub frame_count: u64,
    /// Upper bound applied to `delta`
    max_delta: f32,
    /// Timestamp of the previous sample
    last_instant: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a clock starting now with the default 0.05s clamp
    pub fn new() -> Self {
        Self::starting_at(Instant::now(), DEFAULT_MAX_DELTA)
    }

    /// Create a clock with a custom clamp
    pub fn with_max_delta(max_delta: f32) -> Self {
        Self::starting_at(Instant::now(), max_delta)
    }

    /// Create a clock whose first sample is measured from `start`
    pub fn starting_at(start: Instant, max_delta: f32) -> Self {
        Self {
            delta: 0.0,
            total_time: 0.0,
            frame_count: 0,
            max_delta,
            last_instant: start,
        }
    }

    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }

    /// Sample the wall clock. Call once per frame.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Sample at an explicit timestamp. Timestamps earlier than the previous
    /// sample yield a zero delta.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.last_instant).as_secs_f32();
        self.last_instant = now;
        self.record(elapsed)
    }

    /// Advance by a fixed interval instead of reading the wall clock
    pub fn advance(&mut self, elapsed: Duration) -> f32 {
        match self.last_instant.checked_add(elapsed) {
            Some(next) => self.tick_at(next),
            // Beyond what `Instant` can represent; clamps to max_delta regardless
            None => self.record(f32::INFINITY),
        }
    }

    fn record(&mut self, elapsed: f32) -> f32 {
        self.delta = elapsed.min(self.max_delta);
        self.total_time += self.delta as f64;
        self.frame_count += 1;
        self.delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_clock_defaults() {
        let clock = FrameClock::new();
        assert_relative_eq!(clock.max_delta(), 0.05);
        assert_eq!(clock.total_time, 0.0);
        assert_eq!(clock.frame_count, 0);
    }

    #[test]
    fn test_delta_clamped_on_hitch() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start, DEFAULT_MAX_DELTA);
        let delta = clock.tick_at(start + Duration::from_millis(400));
        assert_relative_eq!(delta, 0.05);
    }

    #[test]
    fn test_short_frame_passes_through() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start, DEFAULT_MAX_DELTA);
        let delta = clock.tick_at(start + Duration::from_millis(16));
        assert_relative_eq!(delta, 0.016, epsilon = 1e-6);
        assert_eq!(clock.frame_count, 1);
    }

    #[test]
    fn test_advance_past_instant_range_clamps() {
        let mut clock = FrameClock::new();
        let delta = clock.advance(Duration::MAX);
        assert_relative_eq!(delta, 0.05);
        assert_eq!(clock.frame_count, 1);

        // Still usable afterwards
        let delta = clock.advance(Duration::from_millis(10));
        assert_relative_eq!(delta, 0.01, epsilon = 1e-6);
    }

    #[test]
    fn test_backwards_timestamp_is_zero() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut clock = FrameClock::starting_at(start, DEFAULT_MAX_DELTA);
        let delta = clock.tick_at(start - Duration::from_millis(10));
        assert_eq!(delta, 0.0);
    }

    #[test]
    fn test_advance_accumulates_total() {
        let mut clock = FrameClock::new();
        for _ in 0..4 {
            clock.advance(Duration::from_millis(25));
        }
        assert_relative_eq!(clock.total_time, 0.1, epsilon = 1e-6);
        assert_eq!(clock.frame_count, 4);
    }
}
