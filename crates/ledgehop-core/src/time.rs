use std::time::{Duration, Instant};

/// Fallback rate when a configured rate is unusable.
pub const DEFAULT_FPS: f32 = 60.0;

/// Fixed-rate frame pacer. `tick` blocks for whatever is left of the current
/// frame's budget; that is the only blocking point of the game loop.
#[derive(Debug)]
pub struct FrameClock {
    budget: Duration,
    frame_start: Instant,
}

impl FrameClock {
    pub fn new(fps: f32) -> Self {
        let fps = if fps.is_finite() && fps > 0.0 {
            fps
        } else {
            DEFAULT_FPS
        };
        Self {
            budget: Duration::from_secs_f32(1.0 / fps),
            frame_start: Instant::now(),
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Time left in the frame budget after `elapsed` has been spent.
    pub fn remaining(&self, elapsed: Duration) -> Duration {
        self.budget.saturating_sub(elapsed)
    }

    /// Sleep out the rest of the frame and start the next one. Returns how
    /// long the thread slept.
    pub fn tick(&mut self) -> Duration {
        let wait = self.remaining(self.frame_start.elapsed());
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
        self.frame_start = Instant::now();
        wait
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}
