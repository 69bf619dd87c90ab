//! Confetti particle engine.
//!
//! # Invariants
//! - A burst replaces the live particle set and re-arms the wall-clock window.
//! - `step` returns [`FrameOutcome::Stop`] once no particle survives or the
//!   window has elapsed; the engine is idle afterwards.
//! - Particles are removed when their lifetime reaches zero or they fall past
//!   the bottom edge plus a margin.

use rand::Rng;
use std::time::{Duration, Instant};

/// Drawing surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// Burst shape and physics constants.
#[derive(Debug, Clone, PartialEq)]
pub struct BurstConfig {
    /// Particles per burst.
    pub count: usize,
    /// Full width of the horizontal spawn spread around the origin.
    pub spread_x: f64,
    /// Full height of the vertical spawn spread around the origin.
    pub spread_y: f64,
    /// Full range of initial horizontal velocity, centered on zero.
    pub speed_x: f64,
    /// Minimum and range of upward launch speed.
    pub lift_min: f64,
    pub lift_range: f64,
    pub radius_min: f64,
    pub radius_range: f64,
    /// Lifetime in frames: `life_min + [0, life_range)`.
    pub life_min: f64,
    pub life_range: f64,
    /// Added to vertical velocity every frame.
    pub gravity: f64,
    /// Distance below the viewport after which a particle is dropped.
    pub exit_margin: f64,
    /// Hard upper bound on how long one animation may run.
    pub window: Duration,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            count: 60,
            spread_x: 200.0,
            spread_y: 60.0,
            speed_x: 8.0,
            lift_min: 2.0,
            lift_range: 6.0,
            radius_min: 4.0,
            radius_range: 7.0,
            life_min: 60.0,
            life_range: 60.0,
            gravity: 0.25,
            exit_margin: 50.0,
            window: Duration::from_secs(2),
        }
    }
}

impl BurstConfig {
    /// Upper bound (exclusive) of any particle lifetime in frames.
    pub fn max_life_frames(&self) -> usize {
        (self.life_min + self.life_range).ceil() as usize
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    /// Remaining frames.
    pub life: f64,
    /// Degrees in `[0, 360)`.
    pub hue: f64,
}

impl Particle {
    pub fn color(&self) -> String {
        format!("hsl({:.0},80%,60%)", self.hue)
    }

    /// Ellipse drawn for the particle's current state.
    pub fn ellipse(&self) -> Ellipse {
        Ellipse {
            x: self.x,
            y: self.y,
            radius_x: self.radius * 0.6,
            radius_y: self.radius * 0.9,
            rotation: (self.life / 10.0).sin(),
        }
    }

    fn advance(&mut self, gravity: f64) {
        self.x += self.vx;
        self.y += self.vy;
        self.vy += gravity;
        self.life -= 1.0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub x: f64,
    pub y: f64,
    pub radius_x: f64,
    pub radius_y: f64,
    /// Radians.
    pub rotation: f64,
}

/// Host drawing surface for the effect.
pub trait ParticleCanvas {
    fn clear(&mut self, viewport: Viewport);
    fn fill_ellipse(&mut self, ellipse: Ellipse, color: &str);
}

/// Canvas that records draw calls; used by headless hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    pub clears: usize,
    pub ellipses: Vec<(Ellipse, String)>,
}

impl ParticleCanvas for RecordingCanvas {
    fn clear(&mut self, _viewport: Viewport) {
        self.clears += 1;
    }

    fn fill_ellipse(&mut self, ellipse: Ellipse, color: &str) {
        self.ellipses.push((ellipse, color.to_string()));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Schedule another frame.
    Continue,
    /// Animation finished; stop scheduling.
    Stop,
}

/// Owns the transient particle set and the running window.
#[derive(Debug, Clone, Default)]
pub struct ParticleEngine {
    config: BurstConfig,
    viewport: Viewport,
    particles: Vec<Particle>,
    deadline: Option<Instant>,
}

impl ParticleEngine {
    pub fn new(config: BurstConfig, viewport: Viewport) -> Self {
        Self {
            config,
            viewport,
            particles: Vec::new(),
            deadline: None,
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Whether frames should currently be scheduled.
    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    /// Replaces the particle set with a fresh burst and re-arms the window.
    ///
    /// Returns `true` when the caller must start a new frame loop, `false`
    /// when a loop is already running and simply picks up the new set.
    pub fn burst(&mut self, rng: &mut impl Rng, now: Instant) -> bool {
        let origin_x = self.viewport.width / 2.0;
        let origin_y = self.viewport.height / 3.0;
        let config = &self.config;

        self.particles = (0..config.count)
            .map(|_| Particle {
                x: origin_x + (rng.gen::<f64>() - 0.5) * config.spread_x,
                y: origin_y + (rng.gen::<f64>() - 0.5) * config.spread_y,
                vx: (rng.gen::<f64>() - 0.5) * config.speed_x,
                vy: -(rng.gen::<f64>() * config.lift_range) - config.lift_min,
                radius: rng.gen::<f64>() * config.radius_range + config.radius_min,
                life: rng.gen::<f64>() * config.life_range + config.life_min,
                hue: rng.gen::<f64>() * 360.0,
            })
            .collect();

        let was_running = self.deadline.is_some();
        self.deadline = Some(now + config.window);
        !was_running
    }

    /// Advances every particle by one frame and draws it.
    pub fn step(&mut self, now: Instant, canvas: &mut impl ParticleCanvas) -> FrameOutcome {
        let Some(deadline) = self.deadline else {
            return FrameOutcome::Stop;
        };

        canvas.clear(self.viewport);
        if now >= deadline {
            self.stop();
            return FrameOutcome::Stop;
        }

        let gravity = self.config.gravity;
        let floor = self.viewport.height + self.config.exit_margin;
        self.particles.retain_mut(|particle| {
            particle.advance(gravity);
            canvas.fill_ellipse(particle.ellipse(), &particle.color());
            particle.y <= floor && particle.life > 0.0
        });

        if self.particles.is_empty() {
            self.stop();
            FrameOutcome::Stop
        } else {
            FrameOutcome::Continue
        }
    }

    fn stop(&mut self) {
        self.particles.clear();
        self.deadline = None;
    }
}
