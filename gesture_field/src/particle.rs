//! A single pooled particle and its per-frame integrator.

use rand::Rng;

use crate::color::Rgb;
use crate::config::FieldConfig;
use crate::force::{attract_or_repel, ActiveForce, Polarity};
use crate::pose::Point;
use crate::system::DrawRequest;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Point,
    pub velocity: Point,
    /// Remaining life in `0.0..=1.0`; doubles as draw alpha.
    pub life:     f32,
    pub color:    Rgb,
    pub size:     u32,
}

impl Particle {
    /// A freshly randomized particle.
    pub fn spawn<R: Rng + ?Sized>(config: &FieldConfig, rng: &mut R) -> Self {
        let mut p = Particle {
            position: Point::ZERO,
            velocity: Point::ZERO,
            life:     0.0,
            color:    Rgb::WHITE,
            size:     config.point_size,
        };
        p.reset(config, rng);
        p
    }

    /// Re-randomize every field in place.
    pub fn reset<R: Rng + ?Sized>(&mut self, config: &FieldConfig, rng: &mut R) {
        self.position = Point::new(rng.gen_range(0.0..=config.width), rng.gen_range(0.0..=config.height));
        self.velocity = Point::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0));
        self.life = rng.gen_range(0.5..=1.0);
        self.color = Rgb::bright(rng);
        self.size = config.point_size;
    }

    /// Add the velocity change of one attract/repel pull toward `target`.
    pub fn attract_or_repel(&mut self, target: Point, strength: f32, attract: bool, swirl: f32) {
        let polarity = if attract { Polarity::Attract } else { Polarity::Repel };
        self.velocity += attract_or_repel(self.position, target, strength, polarity, swirl);
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn alpha(&self) -> f32 {
        self.life.clamp(0.0, 1.0)
    }

    pub fn is_expired(&self, config: &FieldConfig) -> bool {
        self.life <= 0.0 || !config.contains(self.position)
    }

    /// Advance one frame: force, friction, speed cap, move, fade, recycle.
    ///
    /// Returns `true` when the particle was recycled.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        force:  Option<&ActiveForce>,
        config: &FieldConfig,
        rng:    &mut R,
    ) -> bool {
        if let Some(force) = force {
            self.velocity += force.delta(self.position, rng);
        }

        self.velocity = self.velocity * config.friction;

        let speed = self.speed();
        if speed > config.speed_cap {
            self.velocity = self.velocity * (config.speed_cap / speed);
            // f32 rounding can leave the rescaled speed a hair over the cap.
            while self.speed() > config.speed_cap {
                self.velocity = self.velocity * (1.0 - f32::EPSILON);
            }
        }

        self.position += self.velocity;
        self.life -= config.life_decay;

        if self.is_expired(config) {
            self.reset(config, rng);
            return true;
        }
        false
    }

    pub fn draw_request(&self) -> DrawRequest {
        DrawRequest {
            x:     self.position.x,
            y:     self.position.y,
            size:  self.size,
            color: self.color,
            alpha: self.alpha(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
