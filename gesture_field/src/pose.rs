//! Hand landmarks and finger-state keys.

use std::fmt;

// ════════════════════════════════════════════════════════════════════════════
// Point
// ════════════════════════════════════════════════════════════════════════════

/// A 2-D point or vector in frame-pixel coordinates (y grows downward).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn distance(self, other: Point) -> f32 {
        (other - self).length()
    }
}

impl std::ops::Add for Point {
    type Output = Point;
    fn add(self, o: Point) -> Point { Point::new(self.x + o.x, self.y + o.y) }
}

impl std::ops::Sub for Point {
    type Output = Point;
    fn sub(self, o: Point) -> Point { Point::new(self.x - o.x, self.y - o.y) }
}

impl std::ops::Mul<f32> for Point {
    type Output = Point;
    fn mul(self, s: f32) -> Point { Point::new(self.x * s, self.y * s) }
}

impl std::ops::AddAssign for Point {
    fn add_assign(&mut self, o: Point) { self.x += o.x; self.y += o.y; }
}

// ════════════════════════════════════════════════════════════════════════════
// Landmark indices
// ════════════════════════════════════════════════════════════════════════════

/// Anatomical landmark indices of a 21-point hand.
pub mod landmark {
    pub const WRIST:      usize = 0;
    pub const THUMB_CMC:  usize = 1;
    pub const THUMB_MCP:  usize = 2;
    pub const THUMB_IP:   usize = 3;
    pub const THUMB_TIP:  usize = 4;
    pub const INDEX_MCP:  usize = 5;
    pub const INDEX_PIP:  usize = 6;
    pub const INDEX_DIP:  usize = 7;
    pub const INDEX_TIP:  usize = 8;
    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_DIP: usize = 11;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_MCP:   usize = 13;
    pub const RING_PIP:   usize = 14;
    pub const RING_DIP:   usize = 15;
    pub const RING_TIP:   usize = 16;
    pub const PINKY_MCP:  usize = 17;
    pub const PINKY_PIP:  usize = 18;
    pub const PINKY_DIP:  usize = 19;
    pub const PINKY_TIP:  usize = 20;

    pub const COUNT: usize = 21;

    /// Skeleton connections between landmarks.
    pub const BONES: [(usize, usize); 23] = [
        (0, 1), (1, 2), (2, 3), (3, 4),
        (0, 5), (5, 6), (6, 7), (7, 8),
        (0, 9), (9, 10), (10, 11), (11, 12),
        (0, 13), (13, 14), (14, 15), (15, 16),
        (0, 17), (17, 18), (18, 19), (19, 20),
        (5, 9), (9, 13), (13, 17),
    ];
}

// ════════════════════════════════════════════════════════════════════════════
// Finger / FingerKey
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] =
        [Finger::Thumb, Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

    /// One-letter label used on the HUD.
    pub fn label(self) -> &'static str {
        match self {
            Finger::Thumb  => "T",
            Finger::Index  => "I",
            Finger::Middle => "M",
            Finger::Ring   => "R",
            Finger::Pinky  => "P",
        }
    }

    /// Bit of this finger in a packed key (thumb is the high bit).
    pub const fn bit(self) -> u8 {
        match self {
            Finger::Thumb  => 0b10000,
            Finger::Index  => 0b01000,
            Finger::Middle => 0b00100,
            Finger::Ring   => 0b00010,
            Finger::Pinky  => 0b00001,
        }
    }
}

/// Which fingers are up: `(thumb, index, middle, ring, pinky)`.
///
/// Packs into `0..32` with the thumb as bit 4 and the pinky as bit 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FingerKey {
    pub thumb:  bool,
    pub index:  bool,
    pub middle: bool,
    pub ring:   bool,
    pub pinky:  bool,
}

impl FingerKey {
    pub const COMBINATIONS: usize = 32;
    pub const FIST: FingerKey = FingerKey::new(false, false, false, false, false);
    pub const OPEN: FingerKey = FingerKey::new(true, true, true, true, true);

    pub const fn new(thumb: bool, index: bool, middle: bool, ring: bool, pinky: bool) -> Self {
        FingerKey { thumb, index, middle, ring, pinky }
    }

    /// Unpack the low five bits of `bits`.
    pub const fn from_bits(bits: u8) -> Self {
        FingerKey::new(
            bits & 0b10000 != 0,
            bits & 0b01000 != 0,
            bits & 0b00100 != 0,
            bits & 0b00010 != 0,
            bits & 0b00001 != 0,
        )
    }

    pub const fn bits(self) -> u8 {
        (self.thumb as u8) << 4
            | (self.index as u8) << 3
            | (self.middle as u8) << 2
            | (self.ring as u8) << 1
            | self.pinky as u8
    }

    /// Packed key as a table index.
    pub const fn index(self) -> usize {
        self.bits() as usize
    }

    /// Every key in packed order.
    pub fn all() -> impl Iterator<Item = FingerKey> {
        (0..Self::COMBINATIONS as u8).map(FingerKey::from_bits)
    }

    pub fn is_up(self, finger: Finger) -> bool {
        self.bits() & finger.bit() != 0
    }

    pub fn with(self, finger: Finger, up: bool) -> Self {
        let bits = if up { self.bits() | finger.bit() } else { self.bits() & !finger.bit() };
        FingerKey::from_bits(bits)
    }

    pub fn toggled(self, finger: Finger) -> Self {
        self.with(finger, !self.is_up(finger))
    }

    /// Number of fingers up.
    pub fn count(self) -> u32 {
        self.bits().count_ones()
    }

    pub fn fingers(self) -> [(Finger, bool); 5] {
        Finger::ALL.map(|f| (f, self.is_up(f)))
    }
}

impl fmt::Display for FingerKey {
    /// `TI---` style: the finger letter when up, `-` when down.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (finger, up) in self.fingers() {
            f.write_str(if up { finger.label() } else { "-" })?;
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HandPose
// ════════════════════════════════════════════════════════════════════════════

/// Which way a sketched hand's thumb points on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handedness {
    /// Thumb toward smaller x.
    Left,
    /// Thumb toward larger x.
    Right,
}

impl Handedness {
    fn sign(self) -> f32 {
        match self {
            Handedness::Left  => -1.0,
            Handedness::Right => 1.0,
        }
    }
}

/// One hand's landmarks in frame-pixel coordinates.
///
/// A complete pose has exactly [`landmark::COUNT`] points; shorter poses are
/// accepted and treated as degenerate by the classifier.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HandPose {
    points: Vec<Point>,
}

impl HandPose {
    pub fn new(points: Vec<Point>) -> Self {
        HandPose { points }
    }

    /// Scale normalized `[0,1]²` landmarks into a `width × height` frame.
    pub fn from_normalized(points: &[(f32, f32)], width: f32, height: f32) -> Self {
        HandPose::new(points.iter().map(|&(x, y)| Point::new(x * width, y * height)).collect())
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_complete(&self) -> bool {
        self.points.len() >= landmark::COUNT
    }

    pub fn landmark(&self, idx: usize) -> Option<Point> {
        self.points.get(idx).copied()
    }

    pub fn wrist(&self) -> Option<Point> {
        self.landmark(landmark::WRIST)
    }

    /// Build a plausible upright hand showing `key`.
    ///
    /// `size` is roughly the wrist-to-fingertip span in pixels.  Extended
    /// fingers put their tip well above the PIP joint and an extended thumb
    /// reaches sideways past its MCP joint, so the classifier reads the sketch
    /// back as `key` whenever `size` is above ten times its threshold.
    pub fn sketch(wrist: Point, key: FingerKey, size: f32, hand: Handedness) -> Self {
        let side = hand.sign();
        let at = |dx: f32, dy: f32| Point::new(wrist.x + side * dx * size, wrist.y + dy * size);

        let mut points = Vec::with_capacity(landmark::COUNT);
        points.push(wrist);

        // Thumb: CMC, MCP, IP, tip.
        points.push(at(0.15, -0.10));
        points.push(at(0.30, -0.20));
        if key.thumb {
            points.push(at(0.45, -0.28));
            points.push(at(0.60, -0.35));
        } else {
            points.push(at(0.25, -0.30));
            points.push(at(0.12, -0.32));
        }

        // Index, middle, ring, pinky: MCP, PIP, DIP, tip.
        let columns = [
            (Finger::Index,  0.25),
            (Finger::Middle, 0.08),
            (Finger::Ring,  -0.08),
            (Finger::Pinky, -0.24),
        ];
        for (finger, dx) in columns {
            let mcp = -0.45;
            points.push(at(dx, mcp));
            if key.is_up(finger) {
                points.push(at(dx, mcp - 0.20));
                points.push(at(dx, mcp - 0.35));
                points.push(at(dx, mcp - 0.48));
            } else {
                points.push(at(dx, mcp - 0.15));
                points.push(at(dx, mcp - 0.05));
                points.push(at(dx, mcp + 0.02));
            }
        }

        HandPose::new(points)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_round_trip_every_key() {
        for bits in 0..32u8 {
            assert_eq!(FingerKey::from_bits(bits).bits(), bits);
        }
        assert_eq!(FingerKey::all().count(), 32);
    }

    #[test]
    fn thumb_is_high_bit() {
        assert_eq!(FingerKey::new(true, false, false, false, false).bits(), 16);
        assert_eq!(FingerKey::new(false, false, false, false, true).bits(), 1);
        assert_eq!(FingerKey::OPEN.bits(), 31);
        assert_eq!(FingerKey::FIST.bits(), 0);
    }

    #[test]
    fn toggle_and_count() {
        let k = FingerKey::FIST.toggled(Finger::Index).toggled(Finger::Pinky);
        assert!(k.index && k.pinky);
        assert_eq!(k.count(), 2);
        assert_eq!(k.toggled(Finger::Index).count(), 1);
        assert_eq!(k.to_string(), "-I--P");
    }

    #[test]
    fn sketch_has_all_landmarks() {
        for key in FingerKey::all() {
            let pose = HandPose::sketch(Point::new(640.0, 500.0), key, 120.0, Handedness::Left);
            assert!(pose.is_complete());
            assert_eq!(pose.wrist(), Some(Point::new(640.0, 500.0)));
        }
    }

    #[test]
    fn normalized_points_scale_to_frame() {
        let pose = HandPose::from_normalized(&[(0.5, 0.25)], 1280.0, 720.0);
        assert_eq!(pose.landmark(0), Some(Point::new(640.0, 180.0)));
        assert!(!pose.is_complete());
    }

    #[test]
    fn midpoint_and_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(6.0, 8.0);
        assert_eq!(a.midpoint(b), Point::new(3.0, 4.0));
        assert_eq!(a.distance(b), 10.0);
    }
}
