use std::time::{Duration, Instant};

/// Caps the game loop at a fixed frame rate by sleeping out whatever is left
/// of each frame's time slice.
#[derive(Debug)]
pub struct FrameLimiter {
    frame: Duration,
    frame_start: Instant,
}

impl FrameLimiter {
    pub fn new(fps: u32) -> Self {
        FrameLimiter {
            frame: Duration::from_secs(1) / fps.max(1),
            frame_start: Instant::now(),
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Time left in the current frame, zero if the frame ran long.
    pub fn remaining(&self) -> Duration {
        self.frame.saturating_sub(self.frame_start.elapsed())
    }

    /// Sleep until the current frame's slot is used up, then start the next one.
    pub fn wait(&mut self) {
        let left = self.remaining();
        if !left.is_zero() {
            std::thread::sleep(left);
        }
        self.frame_start = Instant::now();
    }
}
