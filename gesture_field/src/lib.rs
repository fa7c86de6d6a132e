//! # gesture_field
//!
//! Finger-state classification and gesture-driven particle force fields.
//!
//! Each frame a hand-tracking collaborator hands over zero, one or two
//! [`HandPose`]s.  The [`PoseClassifier`] reduces every pose to a 5-bit
//! [`FingerKey`], the [`GestureCatalog`] names the gesture for display, and the
//! [`ForceField`] picks the force rule that the [`ParticleSystem`] applies to
//! every particle in its pool before integrating, fading and recycling them.
//!
//! ## Key → Behavior mapping (first match wins)
//!
//! | Fingers up | Behavior |
//! |---|---|
//! | Two hands, any fingers | Attract to the wrist midpoint with a strong swirl |
//! | None (fist) | Spiral in toward the wrist |
//! | All five | Mega repel from the wrist |
//! | Thumb | Attract to the wrist and float upward |
//! | Index | Stream toward the index tip |
//! | Middle | Explode outward with jitter |
//! | Ring | Slow spiral |
//! | Pinky | Tiny scatter |
//! | Index + middle | Dual fingertip stream |
//! | Thumb + pinky | Surfer wave toward both tips |
//! | Thumb + index | Pinch repel from both tips |
//! | Index + pinky | Wide repel from both tips |
//! | Index + middle + ring | Fan toward three tips |
//! | Four, no pinky | Strong repel |
//! | Four, no thumb | Fountain |
//! | Anything else | Gentle orbit |
//!
//! ## Rendering
//!
//! Nothing in this crate draws pixels.  [`ParticleSystem::draw`] emits one
//! [`DrawRequest`] per particle to a [`Canvas`] supplied by the caller, and
//! [`HudState`] carries the per-frame display metadata.

pub mod catalog;
pub mod classifier;
pub mod color;
pub mod config;
pub mod error;
pub mod force;
pub mod hud;
pub mod particle;
pub mod pose;
pub mod system;

pub use catalog::{GestureCatalog, GestureDescriptor};
pub use classifier::{HandFrame, PoseClassifier, TrackedHand};
pub use color::Rgb;
pub use config::FieldConfig;
pub use error::FieldError;
pub use force::{ActiveForce, Anchor, ForceField, ForceRule, KeyMatch, Polarity, Pull};
pub use hud::HudState;
pub use particle::Particle;
pub use pose::{Finger, FingerKey, HandPose, Handedness, Point};
pub use system::{Canvas, DrawRequest, ParticleSystem};
