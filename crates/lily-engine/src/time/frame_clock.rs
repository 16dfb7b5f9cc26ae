use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in seconds.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped: the minimum avoids zero-dt from tight loops, the
/// maximum avoids animation jumps after a stall (debugger, minimized window).
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            frame_index: 0,
            dt_min: Duration::from_micros(100),
            dt_max: Duration::from_millis(250),
        }
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the clock baseline, e.g. after resuming from suspension.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns the snapshot for this frame.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let raw = now.duration_since(self.last);
        let clamped = raw.clamp(self.dt_min, self.dt_max);

        self.last = now;
        let frame_index = self.frame_index;
        self.frame_index = self.frame_index.wrapping_add(1);

        FrameTime {
            dt: clamped.as_secs_f32(),
            now,
            frame_index,
        }
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
    fn frame_index_increments() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick().frame_index, 0);
        assert_eq!(clock.tick().frame_index, 1);
        assert_eq!(clock.tick().frame_index, 2);
    }

    #[test]
    fn dt_is_clamped_to_minimum() {
        let mut clock = FrameClock::with_clamps(
            Duration::from_millis(5),
            Duration::from_millis(100),
        );
        // Two immediate ticks: raw dt is near zero, clamp kicks in.
        clock.tick();
        let ft = clock.tick();
        assert!(ft.dt >= 0.005);
    }

    #[test]
    fn dt_is_clamped_to_maximum() {
        let mut clock = FrameClock::with_clamps(
            Duration::from_micros(1),
            Duration::from_millis(10),
        );
        std::thread::sleep(Duration::from_millis(25));
        let ft = clock.tick();
        assert!(ft.dt <= 0.010 + f32::EPSILON);
    }
}
