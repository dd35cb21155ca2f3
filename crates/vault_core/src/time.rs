use std::time::{Duration, Instant};

const FPS_SAMPLE_COUNT: usize = 60;
const SLOW_FRAME_SECS: f64 = 0.25;

/// Frame pacing as seen by the game loop.
pub trait Clock {
    fn now(&self) -> Instant;
    /// Block until the next frame boundary for `target_fps`.
    fn tick(&mut self, target_fps: u32);
}

fn frame_budget(target_fps: u32) -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(target_fps.max(1)))
}

/// Wall-clock pacing: sleeps out whatever is left of the frame budget.
pub struct FrameClock {
    pub frame_count: u64,
    pub real_dt: f64,
    last_tick: Instant,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            frame_count: 0,
            real_dt: 0.0,
            last_tick: Instant::now(),
            fps_samples: [1.0 / 60.0; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: 60.0,
            smoothed_frame_time_ms: 16.667,
        }
    }

    fn record_sample(&mut self, dt: f64) {
        self.fps_samples[self.fps_sample_index] = dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_dt * 1000.0;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FrameClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn tick(&mut self, target_fps: u32) {
        let budget = frame_budget(target_fps);
        let busy = self.last_tick.elapsed();
        if busy < budget {
            std::thread::sleep(budget - busy);
        } else if busy.as_secs_f64() > SLOW_FRAME_SECS {
            log::warn!(
                "Frame took {:.1}ms, budget is {:.1}ms",
                busy.as_secs_f64() * 1000.0,
                budget.as_secs_f64() * 1000.0
            );
        }

        let now = Instant::now();
        self.real_dt = now.duration_since(self.last_tick).as_secs_f64();
        self.last_tick = now;
        self.frame_count += 1;
        self.record_sample(self.real_dt);
    }
}

/// Virtual time: `tick` advances by exactly one frame budget and never sleeps.
pub struct ManualClock {
    origin: Instant,
    elapsed: Duration,
    pub frame_count: u64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    pub fn advance(&mut self, by: Duration) {
        self.elapsed += by;
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed
    }

    fn tick(&mut self, target_fps: u32) {
        self.elapsed += frame_budget(target_fps);
        self.frame_count += 1;
    }
}
