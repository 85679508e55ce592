use std::time::{Duration, Instant};

/// Counts frames and reports the average rate once per interval.
pub struct FpsCounter {
    interval: Duration,
    window_start: Instant,
    frames: u32,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        Self {
            interval: Duration::from_secs(1),
            window_start: now,
            frames: 0,
        }
    }

    /// Record a frame; returns frames-per-second when an interval has elapsed.
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < self.interval {
            return None;
        }
        let fps = self.frames as f32 / elapsed.as_secs_f32();
        self.frames = 0;
        self.window_start = now;
        Some(fps)
    }
}
