//! Per-frame delta time.
//!
//! The viewer has no simulation to step, so instead of a fixed-timestep
//! accumulator it measures wall-clock time between redraws and hands the
//! clamped delta straight to camera movement.

use std::time::Instant;
use tracing::warn;

/// Longest frame delta handed to movement code. A stall (window drag,
/// breakpoint) would otherwise teleport the FPS camera.
pub const MAX_FRAME_TIME: f64 = 0.25;

pub struct FrameClock {
    previous_time: Instant,
    last_dt: f64,
    frame_count: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
            last_dt: 0.0,
            frame_count: 0,
        }
    }

    /// Measure the time since the previous tick and count one frame.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.previous_time).as_secs_f64();
        self.previous_time = now;
        self.advance(frame_time)
    }

    fn advance(&mut self, frame_time: f64) -> f32 {
        let mut frame_time = frame_time.max(0.0);
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }
        self.last_dt = frame_time;
        self.frame_count += 1;
        frame_time as f32
    }

    /// Delta of the most recent frame, in seconds.
    pub fn last_dt(&self) -> f64 {
        self.last_dt
    }

    /// Instantaneous frame rate, `1 / dt`. Zero before the first frame.
    pub fn fps(&self) -> f64 {
        if self.last_dt > 0.0 {
            1.0 / self.last_dt
        } else {
            0.0
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
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
    fn test_new_clock_has_no_frames() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame_count(), 0);
        assert_eq!(clock.fps(), 0.0);
    }

    #[test]
    fn test_advance_counts_frames() {
        let mut clock = FrameClock::new();
        for _ in 0..5 {
            clock.advance(1.0 / 60.0);
        }
        assert_eq!(clock.frame_count(), 5);
        assert!((clock.fps() - 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_long_frames_are_clamped() {
        let mut clock = FrameClock::new();
        let dt = clock.advance(2.0);
        assert!((dt as f64 - MAX_FRAME_TIME).abs() < 1e-6);
        assert!((clock.fps() - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_negative_frame_time_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(-0.5), 0.0);
        assert_eq!(clock.fps(), 0.0);
    }

    #[test]
    fn test_tick_is_small_and_positive() {
        let mut clock = FrameClock::new();
        let dt = clock.tick();
        assert!(dt >= 0.0);
        assert!(dt as f64 <= MAX_FRAME_TIME);
        assert_eq!(clock.frame_count(), 1);
    }
}
