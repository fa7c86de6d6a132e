//! The particle pool and the per-frame simulation step.
//!
//! `ParticleSystem` owns every particle and the RNG that feeds resets and
//! jitter.  Particles are allocated once in [`ParticleSystem::new`] and
//! recycled in place afterwards.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, instrument, trace};

use crate::classifier::HandFrame;
use crate::color::Rgb;
use crate::config::FieldConfig;
use crate::error::FieldError;
use crate::force::ForceField;
use crate::particle::Particle;

// ════════════════════════════════════════════════════════════════════════════
// Draw interface
// ════════════════════════════════════════════════════════════════════════════

/// One particle as the renderer should draw it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawRequest {
    pub x:     f32,
    pub y:     f32,
    pub size:  u32,
    pub color: Rgb,
    /// Brightness factor in `0.0..=1.0`.
    pub alpha: f32,
}

/// Anything that can draw particles.
pub trait Canvas {
    fn draw_point(&mut self, request: DrawRequest);
}

impl Canvas for Vec<DrawRequest> {
    fn draw_point(&mut self, request: DrawRequest) {
        self.push(request);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ParticleSystem
// ════════════════════════════════════════════════════════════════════════════

pub struct ParticleSystem {
    config:    FieldConfig,
    field:     ForceField,
    particles: Vec<Particle>,
    rng:       StdRng,
    frame:     u64,
}

impl ParticleSystem {
    pub fn new(config: FieldConfig) -> Result<Self, FieldError> {
        ParticleSystem::with_field(config, ForceField::standard())
    }

    pub fn with_field(config: FieldConfig, field: ForceField) -> Result<Self, FieldError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        let particles = (0..config.particle_count)
            .map(|_| Particle::spawn(&config, &mut rng))
            .collect();
        debug!(
            particles = config.particle_count,
            width = config.width,
            height = config.height,
            "particle pool ready"
        );
        Ok(ParticleSystem { config, field, particles, rng, frame: 0 })
    }

    /// Advance every particle one frame under this frame's hands.
    ///
    /// Returns the number of particles recycled.
    #[instrument(level = "trace", skip_all, fields(frame = self.frame, hands = hands.hand_count()))]
    pub fn update(&mut self, hands: &HandFrame) -> usize {
        let force = self.field.resolve(hands);
        if let Some(f) = &force {
            trace!(rule = f.rule().name, "applying force");
        }

        let mut recycled = 0;
        for p in &mut self.particles {
            if p.update(force.as_ref(), &self.config, &mut self.rng) {
                recycled += 1;
            }
        }
        self.frame += 1;
        trace!(recycled, "frame done");
        recycled
    }

    /// Emit one draw request per particle.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        for p in &self.particles {
            canvas.draw_point(p.draw_request());
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn field(&self) -> &ForceField {
        &self.field
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Frames simulated so far.
    pub fn frames(&self) -> u64 {
        self.frame
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
