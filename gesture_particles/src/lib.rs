//! # gesture_particles
//!
//! Interactive front end for [`gesture_field`]: a simulated hand steers a
//! field of tiny particles in a software-rendered window.
//!
//! ## Frame pipeline
//!
//! 1. The hand source (mouse and keyboard, or the scripted demo) reports the
//!    hands in view as 21-landmark poses.
//! 2. [`app::AppState`] classifies each pose into a finger key and resolves
//!    the catalog entry shown on the HUD.
//! 3. The particle system applies the key's force rule, then the visualizer
//!    fades the trail layer, draws the particles, lays them over the dimmed
//!    hand skeleton and paints the HUD.
//!
//! ## Hand sources
//!
//! * (default) — **Simulation mode**: the mouse moves the wrist, number keys
//!   fold and raise fingers.
//! * `--demo` — **Demo mode**: a scripted hand cycles through all 32 finger
//!   combinations, then shows two hands, then none.
//!
//! ### Simulation keyboard shortcuts
//!
//! | Key | Effect |
//! |---|---|
//! | Mouse | Move the wrist |
//! | `1`–`5` | Toggle thumb, index, middle, ring, pinky |
//! | `F` | Fist (all fingers down) |
//! | `O` | Open hand (all fingers up) |
//! | `H` | Hide / show the hand |
//! | `N` | Add / remove a mirrored second hand |
//! | `Q` / `Escape` | Quit |

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod hands;
pub mod logging;
pub mod visualizer;
