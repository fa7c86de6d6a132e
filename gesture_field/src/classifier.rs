//! Finger-state classification of raw hand landmarks.
//!
//! The classifier is a pure function of the landmark positions: the thumb is
//! judged by horizontal reach (it swings sideways), the other four fingers by
//! how far the tip sits above the PIP joint.

use tracing::{debug, trace};

use crate::config::FieldConfig;
use crate::pose::{landmark, FingerKey, HandPose};

/// Tip/PIP landmark pairs for index, middle, ring and pinky.
const FINGER_JOINTS: [(usize, usize); 4] = [
    (landmark::INDEX_TIP,  landmark::INDEX_PIP),
    (landmark::MIDDLE_TIP, landmark::MIDDLE_PIP),
    (landmark::RING_TIP,   landmark::RING_PIP),
    (landmark::PINKY_TIP,  landmark::PINKY_PIP),
];

// ════════════════════════════════════════════════════════════════════════════
// PoseClassifier
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseClassifier {
    /// Pixels the tip must rise above the PIP joint.
    threshold: f32,
}

impl PoseClassifier {
    pub fn new(config: &FieldConfig) -> Self {
        PoseClassifier::with_threshold(config.finger_threshold_px())
    }

    pub fn with_threshold(threshold: f32) -> Self {
        PoseClassifier { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Reduce one hand to its finger-state key.
    ///
    /// Poses with fewer than 21 landmarks read as a fist.
    pub fn classify(&self, hand: &HandPose) -> FingerKey {
        if !hand.is_complete() {
            debug!(landmarks = hand.points().len(), "degenerate hand pose, reading as fist");
            return FingerKey::FIST;
        }
        let p = hand.points();

        let wrist_x = p[landmark::WRIST].x;
        let thumb = (p[landmark::THUMB_TIP].x - wrist_x).abs()
            > (p[landmark::THUMB_MCP].x - wrist_x).abs();

        let [index, middle, ring, pinky] =
            FINGER_JOINTS.map(|(tip, pip)| p[pip].y - p[tip].y > self.threshold);

        FingerKey::new(thumb, index, middle, ring, pinky)
    }

    /// Classify every pose of a frame.  Only the first
    /// [`HandFrame::MAX_HANDS`] poses are kept.
    pub fn classify_frame(&self, mut poses: Vec<HandPose>) -> HandFrame {
        if poses.len() > HandFrame::MAX_HANDS {
            debug!(detected = poses.len(), "more hands than supported, keeping the first two");
            poses.truncate(HandFrame::MAX_HANDS);
        }
        let hands: Vec<TrackedHand> = poses
            .into_iter()
            .map(|pose| {
                let key = self.classify(&pose);
                TrackedHand { pose, key }
            })
            .collect();
        trace!(hands = hands.len(), "classified frame");
        HandFrame { hands }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HandFrame
// ════════════════════════════════════════════════════════════════════════════

/// A pose together with its classified key.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackedHand {
    pub pose: HandPose,
    pub key:  FingerKey,
}

/// Everything the simulation knows about the hands in one frame.
///
/// The number of hands is the length of the hand list; there is no separate
/// count that could disagree with it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HandFrame {
    hands: Vec<TrackedHand>,
}

impl HandFrame {
    pub const MAX_HANDS: usize = 2;

    pub fn empty() -> Self {
        HandFrame::default()
    }

    pub fn hands(&self) -> &[TrackedHand] {
        &self.hands
    }

    pub fn hand_count(&self) -> usize {
        self.hands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    /// The first detected hand, which drives every single-hand rule.
    pub fn primary(&self) -> Option<&TrackedHand> {
        self.hands.first()
    }

    pub fn keys(&self) -> impl Iterator<Item = FingerKey> + '_ {
        self.hands.iter().map(|h| h.key)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
