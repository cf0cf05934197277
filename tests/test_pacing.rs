use std::time::{Duration, Instant};

use space_invaders::pacing::FrameLimiter;

#[test]
fn sixty_fps_frame_length() {
    let limiter = FrameLimiter::new(60);
    assert_eq!(limiter.frame_duration(), Duration::from_secs(1) / 60);
}

#[test]
fn zero_fps_does_not_divide_by_zero() {
    let limiter = FrameLimiter::new(0);
    assert_eq!(limiter.frame_duration(), Duration::from_secs(1));
}

#[test]
fn wait_fills_the_frame() {
    let mut limiter = FrameLimiter::new(100);
    let start = Instant::now();
    limiter.wait();
    limiter.wait();
    assert!(start.elapsed() >= Duration::from_millis(15));
}

#[test]
fn remaining_never_exceeds_frame() {
    let limiter = FrameLimiter::new(60);
    assert!(limiter.remaining() <= limiter.frame_duration());
}
