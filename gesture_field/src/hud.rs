//! Per-frame display metadata for the renderer's heads-up display.

use crate::catalog::{GestureCatalog, GestureDescriptor};
use crate::classifier::HandFrame;
use crate::pose::{Finger, FingerKey};

/// What the HUD shows for one frame.  Nothing here feeds back into the
/// simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudState {
    pub descriptor: GestureDescriptor,
    /// The first hand's key, all down when no hand is present.
    pub key:        FingerKey,
    pub hand_count: usize,
}

impl HudState {
    pub fn from_frame(frame: &HandFrame, catalog: &GestureCatalog) -> Self {
        match frame.primary() {
            Some(hand) => HudState {
                descriptor: *catalog.lookup(hand.key),
                key:        hand.key,
                hand_count: frame.hand_count(),
            },
            None => HudState {
                descriptor: *catalog.no_hand(),
                key:        FingerKey::FIST,
                hand_count: 0,
            },
        }
    }

    pub fn finger_highlights(&self) -> [(Finger, bool); 5] {
        self.key.fingers()
    }

    pub fn is_two_handed(&self) -> bool {
        self.hand_count >= 2
    }

    /// The bottom-line hand counter.
    pub fn hand_message(&self) -> String {
        let mut msg = format!("Hands detected: {}", self.hand_count);
        if self.is_two_handed() {
            msg.push_str("  << TWO HANDS UP! Special effect! >>");
        }
        msg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::PoseClassifier;
    use crate::pose::{HandPose, Handedness, Point};

    fn frame_of(keys: &[FingerKey]) -> HandFrame {
        let poses = keys
            .iter()
            .enumerate()
            .map(|(i, &k)| HandPose::sketch(Point::new(300.0 + 400.0 * i as f32, 600.0), k, 120.0, Handedness::Left))
            .collect();
        PoseClassifier::with_threshold(12.0).classify_frame(poses)
    }

    #[test]
    fn no_hand_state() {
        let hud = HudState::from_frame(&HandFrame::empty(), &GestureCatalog::standard());
        assert_eq!(hud.descriptor.name, "NO HAND");
        assert_eq!(hud.hand_count, 0);
        assert!(hud.finger_highlights().iter().all(|(_, up)| !up));
        assert_eq!(hud.hand_message(), "Hands detected: 0");
    }

    #[test]
    fn first_hand_names_the_gesture() {
        let peace = FingerKey::new(false, true, true, false, false);
        let hud = HudState::from_frame(&frame_of(&[peace, FingerKey::OPEN]), &GestureCatalog::standard());
        assert_eq!(hud.descriptor.name, "PEACE / V");
        assert_eq!(hud.key, peace);
        assert!(hud.is_two_handed());
        assert!(hud.hand_message().contains("TWO HANDS UP"));
    }

    #[test]
    fn incomplete_catalog_shows_custom() {
        let hud = HudState::from_frame(&frame_of(&[FingerKey::OPEN]), &GestureCatalog::from_entries(std::iter::empty()));
        assert_eq!(hud.descriptor.name, "CUSTOM");
        assert_eq!(hud.hand_count, 1);
    }
}
