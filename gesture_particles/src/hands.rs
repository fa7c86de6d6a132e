//! Hand landmarks from the keyboard/mouse simulator or a scripted demo.
//!
//! The public interface is [`HandUpdate`] delivered over a `mpsc` channel.
//! Consumers don't need to know whether the poses came from the mouse or the
//! demo script; both sketch full 21-landmark hands that the classifier reads
//! like tracked ones.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use gesture_field::{Finger, FingerKey, HandPose, Handedness, Point};
use tracing::{debug, trace};

// ════════════════════════════════════════════════════════════════════════════
// HandUpdate
// ════════════════════════════════════════════════════════════════════════════

/// What a hand source reports.
#[derive(Clone, Debug, PartialEq)]
pub enum HandUpdate {
    /// The hands currently in view, replacing any earlier report.  An empty
    /// list means no hand is visible.
    Poses(Vec<HandPose>),

    /// Quit the application.
    Quit,
}

// ════════════════════════════════════════════════════════════════════════════
// HandSource trait
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`HandUpdate`]s over a channel.
pub trait HandSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<HandUpdate>);
}

/// Spawn a hand source on its own thread and return the receiving end.
pub fn spawn_hand_source<H: HandSource>(source: H) -> Receiver<HandUpdate> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// SimHands
// ════════════════════════════════════════════════════════════════════════════

/// Raw input event from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    /// Mouse position in frame pixels; the primary wrist follows it.
    MouseMove { x: f32, y: f32 },
    /// Keys 1–5: thumb through pinky.
    ToggleFinger(Finger),
    /// F
    Fist,
    /// O
    OpenHand,
    /// H: hide or show the hand.
    ToggleVisible,
    /// N: add or remove a mirrored second hand.
    ToggleSecondHand,
    /// Q / Escape
    Quit,
}

/// The simulated hand.  The second hand, when shown, mirrors the first
/// across the vertical centre line and keeps its own fingers open.
#[derive(Clone, Debug, PartialEq)]
pub struct SimHands {
    width:       f32,
    size:        f32,
    wrist:       Point,
    key:         FingerKey,
    visible:     bool,
    second_hand: bool,
}

impl SimHands {
    pub fn new(width: f32, height: f32, size: f32) -> Self {
        SimHands {
            width,
            size,
            wrist:       Point::new(width * 0.5, height * 0.75),
            key:         FingerKey::OPEN,
            visible:     true,
            second_hand: false,
        }
    }

    /// Apply one input.  Returns false for [`SimInput::Quit`].
    pub fn apply(&mut self, input: SimInput) -> bool {
        match input {
            SimInput::MouseMove { x, y }    => self.wrist = Point::new(x, y),
            SimInput::ToggleFinger(finger)  => self.key = self.key.toggled(finger),
            SimInput::Fist                  => self.key = FingerKey::FIST,
            SimInput::OpenHand              => self.key = FingerKey::OPEN,
            SimInput::ToggleVisible         => self.visible = !self.visible,
            SimInput::ToggleSecondHand      => self.second_hand = !self.second_hand,
            SimInput::Quit                  => return false,
        }
        true
    }

    pub fn key(&self) -> FingerKey {
        self.key
    }

    pub fn poses(&self) -> Vec<HandPose> {
        if !self.visible {
            return Vec::new();
        }
        let mut poses = vec![HandPose::sketch(self.wrist, self.key, self.size, Handedness::Left)];
        if self.second_hand {
            let mirrored = Point::new(self.width - self.wrist.x, self.wrist.y);
            poses.push(HandPose::sketch(mirrored, FingerKey::OPEN, self.size, Handedness::Right));
        }
        poses
    }
}

/// Hand source driven by [`SimInput`] events from the visualizer's window.
///
/// The visualizer sends raw input here; this thread keeps the hand state and
/// republishes the poses after every change.  This decouples the window event
/// loop from hand modelling.
pub struct SimHandSource {
    pub rx:    Receiver<SimInput>,
    pub hands: SimHands,
}

impl HandSource for SimHandSource {
    fn run(self: Box<Self>, tx: Sender<HandUpdate>) {
        let SimHandSource { rx, mut hands } = *self;

        if tx.send(HandUpdate::Poses(hands.poses())).is_err() { return; }

        for input in rx {
            if !hands.apply(input) {
                let _ = tx.send(HandUpdate::Quit);
                return;
            }
            if !matches!(input, SimInput::MouseMove { .. }) {
                debug!(?input, key = %hands.key(), "simulated hand changed");
            }
            if tx.send(HandUpdate::Poses(hands.poses())).is_err() { return; }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// DemoHandSource
// ════════════════════════════════════════════════════════════════════════════

/// Frames each scripted segment lasts.
pub const DEMO_SEGMENT_FRAMES: u64 = 90;

/// One key per segment for all 32 keys, then a two-hand segment, then an
/// empty frame segment.
const DEMO_SEGMENTS: u64 = FingerKey::COMBINATIONS as u64 + 2;

/// The scripted hands at frame `t`.  The wrist traces a slow Lissajous curve
/// across the lower half of the frame.
pub fn demo_frame(t: u64, width: f32, height: f32, size: f32) -> Vec<HandPose> {
    let segment = (t / DEMO_SEGMENT_FRAMES) % DEMO_SEGMENTS;
    let phase = t as f32;
    let wrist = Point::new(
        width * (0.5 + 0.25 * (phase * 0.013).sin()),
        height * (0.70 + 0.12 * (phase * 0.021).sin()),
    );

    match segment {
        s if s < FingerKey::COMBINATIONS as u64 => {
            vec![HandPose::sketch(wrist, FingerKey::from_bits(s as u8), size, Handedness::Left)]
        }
        s if s == FingerKey::COMBINATIONS as u64 => {
            let other = Point::new(width - wrist.x, wrist.y);
            vec![
                HandPose::sketch(wrist, FingerKey::OPEN, size, Handedness::Left),
                HandPose::sketch(other, FingerKey::FIST, size, Handedness::Right),
            ]
        }
        _ => Vec::new(),
    }
}

/// Hand source that replays [`demo_frame`] once per `interval` until the
/// receiver goes away.
pub struct DemoHandSource {
    pub width:    f32,
    pub height:   f32,
    pub size:     f32,
    pub interval: Duration,
}

impl DemoHandSource {
    pub fn new(width: f32, height: f32, size: f32, interval: Duration) -> Self {
        DemoHandSource { width, height, size, interval }
    }
}

impl HandSource for DemoHandSource {
    fn run(self: Box<Self>, tx: Sender<HandUpdate>) {
        let mut t = 0u64;
        loop {
            if t % DEMO_SEGMENT_FRAMES == 0 {
                trace!(frame = t, segment = t / DEMO_SEGMENT_FRAMES, "demo segment");
            }
            let poses = demo_frame(t, self.width, self.height, self.size);
            if tx.send(HandUpdate::Poses(poses)).is_err() { return; }
            t += 1;
            thread::sleep(self.interval);
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use gesture_field::PoseClassifier;

    fn classifier() -> PoseClassifier {
        PoseClassifier::with_threshold(12.0)
    }

    #[test]
    fn sim_hand_starts_open_and_visible() {
        let hands = SimHands::new(1280.0, 720.0, 144.0);
        let poses = hands.poses();
        assert_eq!(poses.len(), 1);
        assert_eq!(classifier().classify(&poses[0]), FingerKey::OPEN);
    }

    #[test]
    fn number_keys_toggle_fingers() {
        let mut hands = SimHands::new(1280.0, 720.0, 144.0);
        hands.apply(SimInput::Fist);
        hands.apply(SimInput::ToggleFinger(Finger::Index));
        hands.apply(SimInput::ToggleFinger(Finger::Middle));
        let key = classifier().classify(&hands.poses()[0]);
        assert_eq!(key, FingerKey::new(false, true, true, false, false));

        hands.apply(SimInput::ToggleFinger(Finger::Middle));
        assert_eq!(hands.key(), FingerKey::new(false, true, false, false, false));
    }

    #[test]
    fn mouse_moves_the_wrist() {
        let mut hands = SimHands::new(1280.0, 720.0, 144.0);
        hands.apply(SimInput::MouseMove { x: 200.0, y: 500.0 });
        assert_eq!(hands.poses()[0].wrist(), Some(Point::new(200.0, 500.0)));
    }

    #[test]
    fn hidden_hand_reports_nothing() {
        let mut hands = SimHands::new(1280.0, 720.0, 144.0);
        hands.apply(SimInput::ToggleVisible);
        assert!(hands.poses().is_empty());
        hands.apply(SimInput::ToggleVisible);
        assert_eq!(hands.poses().len(), 1);
    }

    #[test]
    fn second_hand_is_mirrored() {
        let mut hands = SimHands::new(1280.0, 720.0, 144.0);
        hands.apply(SimInput::MouseMove { x: 300.0, y: 600.0 });
        hands.apply(SimInput::ToggleSecondHand);
        let poses = hands.poses();
        assert_eq!(poses.len(), 2);
        assert_eq!(poses[1].wrist(), Some(Point::new(980.0, 600.0)));
        assert_eq!(classifier().classify(&poses[1]), FingerKey::OPEN);
    }

    #[test]
    fn quit_stops_the_sim() {
        let mut hands = SimHands::new(1280.0, 720.0, 144.0);
        assert!(!hands.apply(SimInput::Quit));
    }

    #[test]
    fn sim_source_forwards_poses_then_quit() {
        let (sim_tx, sim_rx) = mpsc::channel();
        let rx = spawn_hand_source(SimHandSource { rx: sim_rx, hands: SimHands::new(1280.0, 720.0, 144.0) });

        sim_tx.send(SimInput::Fist).unwrap();
        sim_tx.send(SimInput::Quit).unwrap();

        let updates: Vec<HandUpdate> = rx.iter().collect();
        assert_eq!(updates.len(), 3);
        match &updates[1] {
            HandUpdate::Poses(poses) => assert_eq!(classifier().classify(&poses[0]), FingerKey::FIST),
            other => panic!("expected poses, got {:?}", other),
        }
        assert_eq!(updates[2], HandUpdate::Quit);
    }

    #[test]
    fn demo_visits_every_key() {
        let mut seen = std::collections::HashSet::new();
        for segment in 0..FingerKey::COMBINATIONS as u64 {
            let poses = demo_frame(segment * DEMO_SEGMENT_FRAMES + 10, 1280.0, 720.0, 144.0);
            assert_eq!(poses.len(), 1);
            seen.insert(classifier().classify(&poses[0]));
        }
        assert_eq!(seen.len(), FingerKey::COMBINATIONS);
    }

    #[test]
    fn demo_shows_two_hands_then_none() {
        let two = demo_frame(32 * DEMO_SEGMENT_FRAMES, 1280.0, 720.0, 144.0);
        assert_eq!(two.len(), 2);
        let none = demo_frame(33 * DEMO_SEGMENT_FRAMES, 1280.0, 720.0, 144.0);
        assert!(none.is_empty());
        let again = demo_frame(34 * DEMO_SEGMENT_FRAMES, 1280.0, 720.0, 144.0);
        assert_eq!(classifier().classify(&again[0]), FingerKey::FIST);
    }

    #[test]
    fn demo_source_stops_when_receiver_drops() {
        let rx = spawn_hand_source(DemoHandSource::new(640.0, 360.0, 72.0, Duration::from_millis(1)));
        assert!(matches!(rx.recv(), Ok(HandUpdate::Poses(_))));
        drop(rx);
    }
}
