use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Time elapsed since the clock was created, in seconds.
    ///
    /// Drives animated scene parameters; unaffected by `dt` clamping.
    pub elapsed: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// One clock per render loop. Delta time is clamped to avoid pathological
/// values when the process is paused by a debugger, minimized, or stalls.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Clock with dt clamped to [0.1 ms, 250 ms].
    ///
    /// The floor matters with `AutoNoVsync`, where consecutive ticks can land on
    /// the same timer value; the ceiling bounds movement after a stall.
    pub fn new() -> Self {
        Self::with_clamps(
            Duration::from_micros(100), // 0.0001s
            Duration::from_millis(250), // 0.25s
        )
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Samples `Instant::now()`; call once per rendered frame.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Like `tick`, with the timestamp supplied by the caller.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: now.saturating_duration_since(self.start).as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
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
    fn frame_index_counts_from_zero() {
        let mut clock = FrameClock::new();
        let base = Instant::now();
        assert_eq!(clock.tick_at(base).frame_index, 0);
        assert_eq!(clock.tick_at(base + Duration::from_millis(16)).frame_index, 1);
    }

    #[test]
    fn dt_is_clamped_to_max_after_stall() {
        let mut clock = FrameClock::new();
        let base = Instant::now();
        clock.tick_at(base);
        let ft = clock.tick_at(base + Duration::from_secs(3));
        assert!((ft.dt - 0.25).abs() < 1e-6);
    }

    #[test]
    fn dt_is_clamped_to_min_for_identical_ticks() {
        let mut clock = FrameClock::new();
        let base = Instant::now();
        clock.tick_at(base);
        let ft = clock.tick_at(base);
        assert!((ft.dt - 0.0001).abs() < 1e-7);
    }

    #[test]
    fn elapsed_ignores_dt_clamp() {
        let mut clock = FrameClock::new();
        let later = Instant::now() + Duration::from_secs(5);
        let ft = clock.tick_at(later);
        assert!(ft.elapsed >= 5.0);
    }
}
