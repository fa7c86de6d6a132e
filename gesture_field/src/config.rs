//! Run-wide simulation constants.
//!
//! A [`FieldConfig`] is fixed for the lifetime of a run and handed to the
//! classifier, the force field and the particle pool at construction, so a
//! simulation at any resolution can live next to another one.

use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::pose::Point;

/// Finger threshold of 12 px measured at a 720 px tall reference frame.
pub const REFERENCE_FINGER_THRESHOLD: f32 = 12.0 / 720.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldConfig {
    /// Frame width in pixels.
    pub width: f32,
    /// Frame height in pixels.
    pub height: f32,
    /// Number of pooled particles.
    pub particle_count: usize,
    /// Per-frame velocity multiplier.
    pub friction: f32,
    /// Maximum particle speed in pixels/frame.
    pub speed_cap: f32,
    /// Life lost per frame.
    pub life_decay: f32,
    /// Minimum `pip.y - tip.y` for a finger to count as up, as a fraction of
    /// the frame height.
    pub finger_threshold_ratio: f32,
    /// Particle point size in pixels.
    pub point_size: u32,
    /// Seed for the particle pool's RNG; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            width:                  1280.0,
            height:                 720.0,
            particle_count:         800,
            friction:               0.95,
            speed_cap:              15.0,
            life_decay:             0.004,
            finger_threshold_ratio: REFERENCE_FINGER_THRESHOLD,
            point_size:             1,
            seed:                   None,
        }
    }
}

impl FieldConfig {
    /// Default constants at a different resolution.
    pub fn with_frame(width: f32, height: f32) -> Self {
        FieldConfig { width, height, ..FieldConfig::default() }
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.width) || !positive(self.height) {
            return Err(FieldError::FrameSize { width: self.width, height: self.height });
        }
        if self.particle_count == 0 {
            return Err(FieldError::EmptyPool);
        }
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(FieldError::Friction(self.friction));
        }
        if !positive(self.speed_cap) {
            return Err(FieldError::SpeedCap(self.speed_cap));
        }
        if !positive(self.life_decay) {
            return Err(FieldError::LifeDecay(self.life_decay));
        }
        if !(self.finger_threshold_ratio.is_finite() && self.finger_threshold_ratio >= 0.0) {
            return Err(FieldError::FingerThreshold(self.finger_threshold_ratio));
        }
        if self.point_size == 0 {
            return Err(FieldError::PointSize);
        }
        Ok(())
    }

    /// Finger threshold in pixels for this frame height.
    pub fn finger_threshold_px(&self) -> f32 {
        self.finger_threshold_ratio * self.height
    }

    /// True when `p` lies inside `[0, width] × [0, height]`.
    pub fn contains(&self, p: Point) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(FieldConfig::default().validate(), Ok(()));
    }

    #[test]
    fn reference_threshold_is_twelve_pixels() {
        let cfg = FieldConfig::default();
        assert!((cfg.finger_threshold_px() - 12.0).abs() < 1e-4);
        let half = FieldConfig::with_frame(640.0, 360.0);
        assert!((half.finger_threshold_px() - 6.0).abs() < 1e-4);
    }

    #[test]
    fn rejects_bad_constants() {
        let bad = FieldConfig { width: 0.0, ..FieldConfig::default() };
        assert!(matches!(bad.validate(), Err(FieldError::FrameSize { .. })));

        let bad = FieldConfig { particle_count: 0, ..FieldConfig::default() };
        assert_eq!(bad.validate(), Err(FieldError::EmptyPool));

        let bad = FieldConfig { friction: 1.5, ..FieldConfig::default() };
        assert_eq!(bad.validate(), Err(FieldError::Friction(1.5)));

        let bad = FieldConfig { speed_cap: 0.0, ..FieldConfig::default() };
        assert_eq!(bad.validate(), Err(FieldError::SpeedCap(0.0)));

        let bad = FieldConfig { life_decay: -0.1, ..FieldConfig::default() };
        assert_eq!(bad.validate(), Err(FieldError::LifeDecay(-0.1)));

        let bad = FieldConfig { finger_threshold_ratio: -0.01, ..FieldConfig::default() };
        assert_eq!(bad.validate(), Err(FieldError::FingerThreshold(-0.01)));

        let bad = FieldConfig { finger_threshold_ratio: f32::NAN, ..FieldConfig::default() };
        assert!(matches!(bad.validate(), Err(FieldError::FingerThreshold(_))));

        let bad = FieldConfig { point_size: 0, ..FieldConfig::default() };
        assert_eq!(bad.validate(), Err(FieldError::PointSize));
    }

    #[test]
    fn contains_is_inclusive() {
        let cfg = FieldConfig::default();
        assert!(cfg.contains(Point::new(0.0, 0.0)));
        assert!(cfg.contains(Point::new(1280.0, 720.0)));
        assert!(!cfg.contains(Point::new(-0.1, 10.0)));
        assert!(!cfg.contains(Point::new(10.0, 720.5)));
    }
}
