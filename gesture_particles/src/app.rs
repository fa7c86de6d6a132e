//! Top-level application state.
//!
//! `AppState` owns the classifier, the gesture catalog and the particle
//! system.  It classifies every [`HandUpdate`] it receives and steps the
//! simulation once per rendered frame.

use std::sync::mpsc::{self, TryRecvError};

use gesture_field::{
    FieldConfig, GestureCatalog, HandFrame, HandPose, HudState, ParticleSystem, PoseClassifier,
};
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::error::Result;
use crate::hands::{spawn_hand_source, DemoHandSource, HandUpdate, SimHandSource, SimHands, SimInput};
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    classifier: PoseClassifier,
    catalog:    GestureCatalog,
    system:     ParticleSystem,

    // ── latest hands ──────────────────────────────────────────────────────
    hands:      HandFrame,
    hud:        HudState,
}

impl AppState {
    pub fn new(field: FieldConfig) -> Result<Self> {
        let classifier = PoseClassifier::new(&field);
        let catalog = GestureCatalog::standard();
        let system = ParticleSystem::new(field)?;
        let hands = HandFrame::empty();
        let hud = HudState::from_frame(&hands, &catalog);

        Ok(AppState { classifier, catalog, system, hands, hud })
    }

    // ── process one report of the hands in view ──────────────────────────

    /// Classify `poses` and make them the hands for the following frames.
    pub fn handle_poses(&mut self, poses: Vec<HandPose>) {
        let hands = self.classifier.classify_frame(poses);
        let hud = HudState::from_frame(&hands, &self.catalog);

        if hud.descriptor.name != self.hud.descriptor.name || hud.hand_count != self.hud.hand_count {
            debug!(
                gesture = hud.descriptor.name,
                key = %hud.key,
                hands = hud.hand_count,
                "gesture changed"
            );
        }

        self.hands = hands;
        self.hud = hud;
    }

    // ── Per-frame tick ────────────────────────────────────────────────────

    /// Step the simulation one frame.  Returns the number of particles
    /// recycled.
    pub fn tick(&mut self) -> usize {
        self.system.update(&self.hands)
    }

    // ── Accessors for the render loop ─────────────────────────────────────

    pub fn system(&self) -> &ParticleSystem { &self.system }
    pub fn hands(&self)  -> &HandFrame      { &self.hands }
    pub fn hud(&self)    -> &HudState       { &self.hud }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// This is the entry point called from `main.rs`.  It creates the visualizer,
/// the hand source (mouse and keyboard by default, the scripted tour with
/// `demo`), and drives the event/render loop at the configured frame rate.
pub fn run(cfg: AppConfig, demo: bool) -> Result<()> {
    let mut app = AppState::new(cfg.field.clone())?;
    let (width, height) = (cfg.field.width, cfg.field.height);
    let hand_size = cfg.hand_size_px();

    // ── Hand source ───────────────────────────────────────────────────────
    let (hand_rx, sim_tx) = if demo {
        (spawn_hand_source(DemoHandSource::new(width, height, hand_size, cfg.frame_interval())), None)
    } else {
        let (sim_tx, sim_rx) = mpsc::channel::<SimInput>();
        let hands = SimHands::new(width, height, hand_size);
        (spawn_hand_source(SimHandSource { rx: sim_rx, hands }), Some(sim_tx))
    };

    // ── Visualizer (owns the window and the sim input sender) ────────────
    let mut vis = Visualizer::new(&cfg, sim_tx)?;
    info!(particles = app.system().len(), demo, "visualizer open");

    // ── Main loop ─────────────────────────────────────────────────────────
    while vis.is_open() {
        // 1. Poll window input → translate to SimInput
        if !vis.poll_input() { break; }

        // 2. Drain hand updates; only the newest report matters
        let mut latest = None;
        loop {
            match hand_rx.try_recv() {
                Ok(HandUpdate::Poses(poses))    => latest = Some(poses),
                Ok(HandUpdate::Quit)            => return Ok(()),
                Err(TryRecvError::Empty)        => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("hand source stopped; closing");
                    return Ok(());
                }
            }
        }
        if let Some(poses) = latest {
            app.handle_poses(poses);
        }

        // 3. Per-frame simulation
        app.tick();

        // 4. Render
        vis.render(app.system(), app.hands(), app.hud())?;
    }

    info!(frames = app.system().frames(), "window closed");
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use gesture_field::{FingerKey, Handedness, Point};

    fn make_app() -> AppState {
        let field = FieldConfig { particle_count: 200, seed: Some(3), ..FieldConfig::default() };
        AppState::new(field).unwrap()
    }

    fn hand(x: f32, key: FingerKey, side: Handedness) -> HandPose {
        HandPose::sketch(Point::new(x, 600.0), key, 144.0, side)
    }

    #[test]
    fn starts_with_no_hand() {
        let app = make_app();
        assert!(app.hands().is_empty());
        assert_eq!(app.hud().descriptor.name, "NO HAND");
        assert_eq!(app.system().len(), 200);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let field = FieldConfig { particle_count: 0, ..FieldConfig::default() };
        assert!(AppState::new(field).is_err());
    }

    #[test]
    fn poses_update_the_hud() {
        let mut app = make_app();
        app.handle_poses(vec![hand(640.0, FingerKey::FIST, Handedness::Left)]);
        assert_eq!(app.hud().descriptor.name, "FIST");
        assert_eq!(app.hud().hand_count, 1);

        app.handle_poses(vec![
            hand(400.0, FingerKey::OPEN, Handedness::Left),
            hand(880.0, FingerKey::OPEN, Handedness::Right),
        ]);
        assert!(app.hud().is_two_handed());
        assert_eq!(app.hands().hand_count(), 2);
    }

    #[test]
    fn empty_report_clears_hands() {
        let mut app = make_app();
        app.handle_poses(vec![hand(640.0, FingerKey::OPEN, Handedness::Left)]);
        app.handle_poses(Vec::new());
        assert!(app.hands().is_empty());
        assert_eq!(app.hud().descriptor.name, "NO HAND");
    }

    #[test]
    fn hands_persist_across_ticks() {
        let mut app = make_app();
        app.handle_poses(vec![hand(640.0, FingerKey::FIST, Handedness::Left)]);
        for _ in 0..10 {
            app.tick();
        }
        assert_eq!(app.hud().descriptor.name, "FIST");
        assert_eq!(app.system().frames(), 10);
    }

    #[test]
    fn tick_keeps_particles_in_frame() {
        let mut app = make_app();
        app.handle_poses(vec![hand(640.0, FingerKey::OPEN, Handedness::Left)]);
        for _ in 0..120 {
            app.tick();
        }
        let cfg = app.system().config().clone();
        assert!(app.system().particles().iter().all(|p| cfg.contains(p.position)));
    }
}
