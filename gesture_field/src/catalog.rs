//! Display metadata for every finger combination.
//!
//! The catalog is a 32-slot table indexed by the packed [`FingerKey`].  The
//! standard catalog fills every slot; a catalog built from a partial list
//! answers empty slots with the CUSTOM descriptor.

use crate::color::Rgb;
use crate::pose::FingerKey;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GestureDescriptor {
    pub name:          &'static str,
    pub display_color: Rgb,
    pub description:   &'static str,
}

impl GestureDescriptor {
    pub const fn new(name: &'static str, display_color: Rgb, description: &'static str) -> Self {
        GestureDescriptor { name, display_color, description }
    }
}

/// Answer for keys without a catalog entry.
pub const CUSTOM: GestureDescriptor =
    GestureDescriptor::new("CUSTOM", Rgb::new(200, 200, 200), "Custom combo");

/// Shown while no hand is detected.
pub const NO_HAND: GestureDescriptor =
    GestureDescriptor::new("NO HAND", Rgb::new(180, 180, 180), "Show your hand to camera");

const fn key(t: bool, i: bool, m: bool, r: bool, p: bool) -> FingerKey {
    FingerKey::new(t, i, m, r, p)
}

const fn entry(
    k: FingerKey,
    name: &'static str,
    rgb: (u8, u8, u8),
    description: &'static str,
) -> (FingerKey, GestureDescriptor) {
    (k, GestureDescriptor::new(name, Rgb::new(rgb.0, rgb.1, rgb.2), description))
}

const T: bool = true;
const F: bool = false;

/// All 32 combinations.
pub const STANDARD_ENTRIES: [(FingerKey, GestureDescriptor); 32] = [
    // 0 fingers
    entry(key(F, F, F, F, F), "FIST",            (255, 80, 80),   "Particles spiral inward"),
    // 1 finger
    entry(key(T, F, F, F, F), "THUMBS UP",       (255, 220, 0),   "Particles float upward"),
    entry(key(F, T, F, F, F), "POINTING",        (80, 255, 80),   "Stream to index tip"),
    entry(key(F, F, T, F, F), "MIDDLE FINGER",   (50, 50, 255),   "Particles explode out"),
    entry(key(F, F, F, T, F), "RING UP",         (255, 100, 200), "Slow spiral"),
    entry(key(F, F, F, F, T), "PINKY UP",        (0, 200, 255),   "Tiny scatter"),
    // 2 fingers
    entry(key(T, T, F, F, F), "THUMB+INDEX",     (200, 255, 100), "Pinch repel"),
    entry(key(F, T, T, F, F), "PEACE / V",       (255, 80, 200),  "Dual stream"),
    entry(key(F, T, F, T, F), "INDEX+RING",      (0, 150, 255),   "Cross stream"),
    entry(key(F, T, F, F, T), "INDEX+PINKY",     (255, 150, 0),   "Wide repel"),
    entry(key(F, F, T, T, F), "MIDDLE+RING",     (100, 255, 150), "Slow attract"),
    entry(key(F, F, T, F, T), "MIDDLE+PINKY",    (200, 80, 255),  "Zigzag"),
    entry(key(F, F, F, T, T), "RING+PINKY",      (255, 200, 80),  "Gentle wave"),
    entry(key(T, F, F, F, T), "HANG LOOSE",      (0, 220, 255),   "Surfer wave"),
    entry(key(T, F, T, F, F), "THUMB+MIDDLE",    (255, 200, 100), "Orbit"),
    entry(key(T, F, F, T, F), "THUMB+RING",      (100, 255, 200), "Spin"),
    // 3 fingers
    entry(key(T, T, T, F, F), "THREE / OK",      (180, 255, 0),   "Triangle burst"),
    entry(key(F, T, T, T, F), "THREE MIDDLE",    (100, 100, 255), "Fan out"),
    entry(key(F, T, T, F, T), "INDEX+MID+PINK",  (255, 255, 100), "Wide fan"),
    entry(key(F, T, F, T, T), "INDEX+RING+PINK", (50, 180, 255),  "Spread"),
    entry(key(F, F, T, T, T), "LAST THREE",      (255, 100, 180), "Sweep"),
    entry(key(T, T, F, T, F), "THUMB+IDX+RING",  (150, 255, 50),  "Vortex"),
    entry(key(T, T, F, F, T), "THUMB+IDX+PINK",  (50, 255, 255),  "Star burst"),
    entry(key(T, F, T, T, F), "THUMB+MID+RING",  (255, 150, 100), "Orbit ring"),
    entry(key(T, F, T, F, T), "THUMB+MID+PINK",  (180, 100, 255), "Scatter"),
    entry(key(T, F, F, T, T), "THUMB+RING+PINK", (200, 255, 150), "Wave up"),
    // 4 fingers
    entry(key(T, T, T, T, F), "FOUR / NO PINKY", (255, 200, 0),   "Strong repel"),
    entry(key(T, T, T, F, T), "FOUR / NO RING",  (100, 150, 255), "Swirl out"),
    entry(key(T, T, F, T, T), "FOUR / NO MID",   (150, 255, 100), "Explode"),
    entry(key(T, F, T, T, T), "FOUR / NO IDX",   (255, 100, 200), "Pull in"),
    entry(key(F, T, T, T, T), "FOUR / NO THUMB", (80, 200, 255),  "Fountain"),
    // 5 fingers
    entry(key(T, T, T, T, T), "OPEN HAND",       (255, 255, 0),   "Mega repel"),
];

// ════════════════════════════════════════════════════════════════════════════
// GestureCatalog
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GestureCatalog {
    slots: [Option<GestureDescriptor>; FingerKey::COMBINATIONS],
}

impl Default for GestureCatalog {
    fn default() -> Self {
        GestureCatalog::standard()
    }
}

impl GestureCatalog {
    pub fn standard() -> Self {
        GestureCatalog::from_entries(STANDARD_ENTRIES)
    }

    /// Build a catalog from `(key, descriptor)` pairs; later pairs overwrite
    /// earlier ones for the same key.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (FingerKey, GestureDescriptor)>,
    {
        let mut slots = [None; FingerKey::COMBINATIONS];
        for (k, d) in entries {
            slots[k.index()] = Some(d);
        }
        GestureCatalog { slots }
    }

    /// The descriptor for `key`, or [`CUSTOM`] when the slot is empty.
    pub fn lookup(&self, key: FingerKey) -> &GestureDescriptor {
        self.get(key).unwrap_or(&CUSTOM)
    }

    pub fn get(&self, key: FingerKey) -> Option<&GestureDescriptor> {
        self.slots[key.index()].as_ref()
    }

    /// True when no key falls back to [`CUSTOM`].
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn no_hand(&self) -> &'static GestureDescriptor {
        &NO_HAND
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn standard_catalog_covers_every_key() {
        let catalog = GestureCatalog::standard();
        assert!(catalog.is_complete());
        for k in FingerKey::all() {
            let d = catalog.lookup(k);
            assert_ne!(*d, CUSTOM, "key {} fell back", k);
            assert!(!d.name.is_empty());
            assert!(!d.description.is_empty());
        }
    }

    #[test]
    fn standard_names_are_distinct() {
        let catalog = GestureCatalog::standard();
        let names: HashSet<&str> = FingerKey::all().map(|k| catalog.lookup(k).name).collect();
        assert_eq!(names.len(), 32);
        assert!(!names.contains(CUSTOM.name));
        assert!(!names.contains(NO_HAND.name));
    }

    #[test]
    fn standard_keys_are_distinct() {
        let keys: HashSet<FingerKey> = STANDARD_ENTRIES.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys.len(), 32);
    }

    #[test]
    fn named_entries() {
        let catalog = GestureCatalog::standard();
        assert_eq!(catalog.lookup(FingerKey::FIST).name, "FIST");
        assert_eq!(catalog.lookup(FingerKey::OPEN).name, "OPEN HAND");
        assert_eq!(catalog.lookup(FingerKey::new(true, false, false, false, true)).name, "HANG LOOSE");
    }

    #[test]
    fn partial_catalog_falls_back_to_custom() {
        let catalog = GestureCatalog::from_entries(STANDARD_ENTRIES.into_iter().take(5));
        assert!(!catalog.is_complete());
        assert_eq!(catalog.lookup(FingerKey::FIST).name, "FIST");
        assert_eq!(*catalog.lookup(FingerKey::OPEN), CUSTOM);
        assert!(catalog.get(FingerKey::OPEN).is_none());
    }
}
