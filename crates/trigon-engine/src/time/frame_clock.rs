use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Monotonic frame counter, starting at 0.
    pub frame_index: u64,

    /// Seconds since the previous tick (0 on the first tick).
    pub dt: f32,

    /// Average frames per second over the reporting window that just closed,
    /// if this tick closed one.
    pub reported_fps: Option<f32>,
}

/// Counts presented frames and reports the average rate once per interval.
///
/// Pure bookkeeping: it never blocks and has no say in when the next frame
/// runs.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    frame_index: u64,
    window_start: Option<Instant>,
    window_frames: u32,
    report_interval: Duration,
}

impl FrameClock {
    /// Creates a clock reporting once per second.
    pub fn new() -> Self {
        Self::with_report_interval(Duration::from_secs(1))
    }

    pub fn with_report_interval(report_interval: Duration) -> Self {
        debug_assert!(!report_interval.is_zero());
        Self {
            last: None,
            frame_index: 0,
            window_start: None,
            window_frames: 0,
            report_interval,
        }
    }

    /// Number of ticks so far.
    pub fn frames(&self) -> u64 {
        self.frame_index
    }

    /// Advances the clock at the current instant.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock at `now`.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = self
            .last
            .map_or(0.0, |last| now.saturating_duration_since(last).as_secs_f32());
        self.last = Some(now);

        let start = *self.window_start.get_or_insert(now);
        self.window_frames += 1;

        let elapsed = now.saturating_duration_since(start);
        let reported_fps = if elapsed >= self.report_interval {
            let fps = self.window_frames as f32 / elapsed.as_secs_f32();
            log::debug!("{fps:.1} fps over {} frames", self.window_frames);
            self.window_start = Some(now);
            self.window_frames = 0;
            Some(fps)
        } else {
            None
        };

        let ft = FrameTime {
            frame_index: self.frame_index,
            dt,
            reported_fps,
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
