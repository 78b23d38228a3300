//! Confetti particle system
//!
//! A fixed-size batch of streamers falls from above the canvas. The system
//! goes back to Inactive on its own once every particle has left the bottom
//! edge, so a later blow can start a fresh run.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::schedule::Frame;
use crate::CanvasSize;
use crate::consts::{CONFETTI_COUNT, CONFETTI_TILT_AMPLITUDE};

/// Fully saturated hue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hue(pub f32);

impl Hue {
    /// CSS color string
    pub fn css(&self) -> String {
        format!("hsl({:.0}, 100%, 50%)", self.0)
    }
}

/// A single confetti streamer
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    /// Size; doubles as line width
    pub radius: f32,
    /// Drives fall speed and horizontal drift
    pub drift_seed: f32,
    pub color: Hue,
    /// Current horizontal tilt offset
    pub tilt: f32,
    pub tilt_angle: f32,
    /// Always > 0
    pub tilt_angle_step: f32,
}

impl Particle {
    /// Random streamer somewhere above the visible area
    pub fn spawn(rng: &mut impl Rng, size: CanvasSize) -> Self {
        Self {
            pos: Vec2::new(
                rng.random::<f32>() * size.width,
                -rng.random::<f32>() * size.height,
            ),
            radius: rng.random_range(4.0..10.0),
            drift_seed: rng.random_range(10.0..30.0),
            color: Hue(rng.random_range(0.0..360.0)),
            tilt: rng.random_range(-10.0..0.0),
            tilt_angle: 0.0,
            tilt_angle_step: rng.random_range(0.05..0.12),
        }
    }

    /// One frame of motion
    pub fn advance(&mut self) {
        self.tilt_angle += self.tilt_angle_step;
        self.pos.y += (self.drift_seed.cos() + 3.0 + self.radius / 2.0) / 2.0;
        self.pos.x += self.drift_seed.sin();
        self.tilt = self.tilt_angle.sin() * CONFETTI_TILT_AMPLITUDE;
    }

    /// Streamer segment endpoints
    pub fn segment(&self) -> (Vec2, Vec2) {
        let quarter = self.radius / 4.0;
        let from = Vec2::new(self.pos.x + self.tilt + quarter, self.pos.y);
        let to = Vec2::new(self.pos.x + self.tilt, self.pos.y + self.tilt + quarter);
        (from, to)
    }
}

/// Confetti lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfettiPhase {
    Inactive,
    Active,
}

pub struct ConfettiSystem {
    particles: Vec<Particle>,
    phase: ConfettiPhase,
    size: CanvasSize,
    count: usize,
    rng: Pcg32,
    runs: u32,
}

impl ConfettiSystem {
    pub fn new(size: CanvasSize, seed: u64) -> Self {
        Self::with_count(size, CONFETTI_COUNT, seed)
    }

    pub fn with_count(size: CanvasSize, count: usize, seed: u64) -> Self {
        Self {
            particles: Vec::with_capacity(count),
            phase: ConfettiPhase::Inactive,
            size,
            count,
            rng: Pcg32::seed_from_u64(seed),
            runs: 0,
        }
    }

    pub fn phase(&self) -> ConfettiPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == ConfettiPhase::Active
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    /// Number of batches started so far
    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Seed a new batch. No-op (returns false) while a run is in progress.
    pub fn start(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        let size = self.size;
        let rng = &mut self.rng;
        self.particles = (0..self.count).map(|_| Particle::spawn(rng, size)).collect();
        if self.particles.is_empty() {
            return false;
        }
        self.runs += 1;
        self.phase = ConfettiPhase::Active;
        log::info!("Confetti started ({} particles)", self.particles.len());
        true
    }

    /// Advance every particle, let `draw` see them, then drop the ones below
    /// the canvas. Returns `Frame::Done` once the batch is exhausted.
    pub fn step(&mut self, draw: impl FnOnce(&[Particle])) -> Frame {
        if !self.is_active() {
            return Frame::Done;
        }
        for particle in &mut self.particles {
            particle.advance();
        }
        draw(&self.particles);

        let height = self.size.height;
        self.particles.retain(|p| p.pos.y < height);
        if self.particles.is_empty() {
            self.phase = ConfettiPhase::Inactive;
            log::info!("Confetti finished");
            Frame::Done
        } else {
            Frame::Continue
        }
    }
}
