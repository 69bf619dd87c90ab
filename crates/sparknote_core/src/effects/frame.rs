//! Frame scheduling for the particle engine.
//!
//! The host supplies frame timestamps through [`FrameDriver`]; the loop
//! itself is a plain `while` over [`ParticleEngine::step`].

use crate::effects::particles::{FrameOutcome, ParticleCanvas, ParticleEngine};
use std::time::{Duration, Instant};

/// ~60 frames per second.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Source of animation-frame timestamps.
pub trait FrameDriver {
    /// Waits for (or simulates) the next frame and returns its timestamp.
    fn next_frame(&mut self) -> Instant;
}

/// Deterministic driver that advances a virtual clock by a fixed interval.
#[derive(Debug, Clone)]
pub struct FixedStepDriver {
    now: Instant,
    interval: Duration,
}

impl FixedStepDriver {
    pub fn new(start: Instant, interval: Duration) -> Self {
        Self {
            now: start,
            interval,
        }
    }
}

impl FrameDriver for FixedStepDriver {
    fn next_frame(&mut self) -> Instant {
        self.now += self.interval;
        self.now
    }
}

/// Steps `engine` until it stops; returns the number of frames run.
pub fn drive_to_completion(
    engine: &mut ParticleEngine,
    canvas: &mut impl ParticleCanvas,
    driver: &mut impl FrameDriver,
) -> usize {
    let mut frames = 0;
    while engine.is_running() {
        frames += 1;
        if engine.step(driver.next_frame(), canvas) == FrameOutcome::Stop {
            break;
        }
    }
    frames
}

#[cfg(test)]
mod tests {
    use super::{drive_to_completion, FixedStepDriver, FrameDriver, DEFAULT_FRAME_INTERVAL};
    use crate::effects::particles::{BurstConfig, ParticleEngine, RecordingCanvas, Viewport};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::{Duration, Instant};

    #[test]
    fn fixed_driver_advances_by_interval() {
        let start = Instant::now();
        let mut driver = FixedStepDriver::new(start, Duration::from_millis(10));
        assert_eq!(driver.next_frame(), start + Duration::from_millis(10));
        assert_eq!(driver.next_frame(), start + Duration::from_millis(20));
    }

    #[test]
    fn loop_ends_once_every_lifetime_is_spent() {
        let config = BurstConfig::default();
        let max_life = config.max_life_frames();
        // Tall viewport so only lifetime removes particles.
        let mut engine = ParticleEngine::new(config, Viewport::new(800.0, 1_000_000.0));
        let start = Instant::now();
        engine.burst(&mut StdRng::seed_from_u64(11), start);

        let mut canvas = RecordingCanvas::default();
        let mut driver = FixedStepDriver::new(start, DEFAULT_FRAME_INTERVAL);
        let frames = drive_to_completion(&mut engine, &mut canvas, &mut driver);

        assert!(frames <= max_life);
        assert!(frames >= 60);
        assert!(engine.particles().is_empty());
        assert!(!engine.is_running());
        assert_eq!(drive_to_completion(&mut engine, &mut canvas, &mut driver), 0);
    }

    #[test]
    fn slow_frames_hit_the_wall_clock_window() {
        let mut engine = ParticleEngine::new(BurstConfig::default(), Viewport::default());
        let start = Instant::now();
        engine.burst(&mut StdRng::seed_from_u64(12), start);

        let mut canvas = RecordingCanvas::default();
        let mut driver = FixedStepDriver::new(start, Duration::from_millis(500));
        let frames = drive_to_completion(&mut engine, &mut canvas, &mut driver);

        assert_eq!(frames, 4);
        assert!(!engine.is_running());
    }
}
