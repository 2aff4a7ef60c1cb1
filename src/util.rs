//! Frame timing for the host loop

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Frame pacer with a rolling frame-time average.
///
/// With VSync on the display already blocks in `present`, so `pace` only
/// sleeps when the frame finished early against the target rate.
pub struct FrameTimer {
    frame_times: VecDeque<f32>,
    frame_start: Instant,
    sample_count: usize,
    budget: Option<Duration>,
}

impl FrameTimer {
    /// `target_fps` of 0 disables pacing
    pub fn new(target_fps: u32, sample_count: usize) -> Self {
        Self {
            frame_times: VecDeque::with_capacity(sample_count),
            frame_start: Instant::now(),
            sample_count: sample_count.max(1),
            budget: (target_fps > 0).then(|| Duration::from_secs_f64(1.0 / target_fps as f64)),
        }
    }

    /// Sleep off whatever is left of this frame's budget, then record the
    /// frame's total duration. Returns that duration in seconds.
    pub fn pace(&mut self) -> f32 {
        if let Some(budget) = self.budget {
            let elapsed = self.frame_start.elapsed();
            if elapsed < budget {
                std::thread::sleep(budget - elapsed);
            }
        }

        let now = Instant::now();
        let dt = (now - self.frame_start).as_secs_f32();
        self.frame_start = now;
        self.record(dt);
        dt
    }

    fn record(&mut self, dt: f32) {
        self.frame_times.push_back(dt);
        if self.frame_times.len() > self.sample_count {
            self.frame_times.pop_front();
        }
    }

    /// Average frames per second over the sample window
    pub fn avg_fps(&self) -> f32 {
        let avg = self.avg_frame_time();
        if avg > 0.0 {
            1.0 / avg
        } else {
            0.0
        }
    }

    /// Average frame time in milliseconds
    pub fn avg_frame_time_ms(&self) -> f32 {
        self.avg_frame_time() * 1000.0
    }

    fn avg_frame_time(&self) -> f32 {
        self.frame_times.iter().sum::<f32>() / self.frame_times.len().max(1) as f32
    }

    /// True once per full sample window; used to throttle stats logging
    pub fn window_complete(&self, frame: u64) -> bool {
        frame > 0 && frame % self.sample_count as u64 == 0
    }
}
