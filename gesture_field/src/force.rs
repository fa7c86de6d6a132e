//! Gesture-selected force fields.
//!
//! A [`ForceRule`] is a small recipe: one or more attract/repel [`Pull`]s at
//! hand landmarks, plus an optional constant velocity bias and random jitter.
//! The [`ForceField`] maps a frame of classified hands to at most one rule:
//!
//! 1. two hands always win and pull toward the midpoint of the wrists;
//! 2. otherwise the first hand's key indexes a 32-slot table compiled from an
//!    ordered list of `(KeyMatch, ForceRule)` pairs, first match wins;
//! 3. keys no pair accepts get [`GENTLE_ORBIT`].
//!
//! The rule is resolved once per frame into an [`ActiveForce`] with concrete
//! target points, then applied to every particle.

use rand::Rng;

use crate::classifier::HandFrame;
use crate::pose::{landmark, Finger, FingerKey, Point};
use crate::pose::Finger::{Index, Middle, Pinky, Ring, Thumb};

/// Exponent of the distance falloff.
pub const FALLOFF_EXPONENT: f32 = 1.3;

// ════════════════════════════════════════════════════════════════════════════
// Rule vocabulary
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
    Attract,
    Repel,
}

impl Polarity {
    fn sign(self) -> f32 {
        match self {
            Polarity::Attract => 1.0,
            Polarity::Repel   => -1.0,
        }
    }
}

/// Where a pull is centred.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    /// A landmark of the first hand.
    Landmark(usize),
    /// Midpoint of the first two hands' wrists.
    WristMidpoint,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pull {
    pub anchor:   Anchor,
    pub strength: f32,
    pub polarity: Polarity,
    pub swirl:    f32,
}

impl Pull {
    pub const fn attract(anchor: Anchor, strength: f32) -> Self {
        Pull { anchor, strength, polarity: Polarity::Attract, swirl: 0.0 }
    }

    pub const fn repel(anchor: Anchor, strength: f32) -> Self {
        Pull { anchor, strength, polarity: Polarity::Repel, swirl: 0.0 }
    }

    pub const fn with_swirl(mut self, swirl: f32) -> Self {
        self.swirl = swirl;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceRule {
    pub name:   &'static str,
    pub pulls:  &'static [Pull],
    /// Constant velocity added every frame (negative y floats upward).
    pub bias:   Point,
    /// Half-width of the uniform per-axis velocity jitter.
    pub jitter: f32,
}

impl ForceRule {
    pub const fn new(name: &'static str, pulls: &'static [Pull]) -> Self {
        ForceRule { name, pulls, bias: Point::ZERO, jitter: 0.0 }
    }

    pub const fn with_bias(mut self, dx: f32, dy: f32) -> Self {
        self.bias = Point::new(dx, dy);
        self
    }

    pub const fn with_jitter(mut self, jitter: f32) -> Self {
        self.jitter = jitter;
        self
    }
}

/// Accepts keys whose `up` fingers are all up and whose `down` fingers are
/// all down; fingers in neither mask are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyMatch {
    up:   u8,
    down: u8,
}

impl KeyMatch {
    /// Exactly the listed fingers up, every other finger down.
    pub const fn only(fingers: &[Finger]) -> Self {
        let up = mask(fingers);
        KeyMatch { up, down: !up & 0b11111 }
    }

    /// The listed fingers up and the `down` fingers down; the rest are free.
    pub const fn partial(up: &[Finger], down: &[Finger]) -> Self {
        KeyMatch { up: mask(up), down: mask(down) }
    }

    pub const fn matches(&self, key: FingerKey) -> bool {
        let bits = key.bits();
        bits & self.up == self.up && bits & self.down == 0
    }
}

const fn mask(fingers: &[Finger]) -> u8 {
    let mut bits = 0;
    let mut i = 0;
    while i < fingers.len() {
        bits |= fingers[i].bit();
        i += 1;
    }
    bits
}

// ════════════════════════════════════════════════════════════════════════════
// Standard rules
// ════════════════════════════════════════════════════════════════════════════

const WRIST:      Anchor = Anchor::Landmark(landmark::WRIST);
const THUMB_TIP:  Anchor = Anchor::Landmark(landmark::THUMB_TIP);
const INDEX_TIP:  Anchor = Anchor::Landmark(landmark::INDEX_TIP);
const MIDDLE_TIP: Anchor = Anchor::Landmark(landmark::MIDDLE_TIP);
const RING_TIP:   Anchor = Anchor::Landmark(landmark::RING_TIP);
const PINKY_TIP:  Anchor = Anchor::Landmark(landmark::PINKY_TIP);

/// Overrides every single-hand rule when two hands are present.
pub const TWO_HAND_VORTEX: ForceRule = ForceRule::new(
    "two-hand vortex",
    &[Pull::attract(Anchor::WristMidpoint, 40.0).with_swirl(1.5)],
);

/// Rule for keys nothing else accepts.
pub const GENTLE_ORBIT: ForceRule =
    ForceRule::new("gentle orbit", &[Pull::attract(WRIST, 35.0).with_swirl(0.6)]);

/// Single-hand rules in priority order.
pub const STANDARD_RULES: &[(KeyMatch, ForceRule)] = &[
    (
        KeyMatch::only(&[]),
        ForceRule::new("spiral in", &[Pull::attract(WRIST, 50.0).with_swirl(1.2)]),
    ),
    (
        KeyMatch::only(&[Thumb, Index, Middle, Ring, Pinky]),
        ForceRule::new("mega repel", &[Pull::repel(WRIST, 120.0)]),
    ),
    (
        KeyMatch::only(&[Thumb]),
        ForceRule::new("float up", &[Pull::attract(WRIST, 30.0)]).with_bias(0.0, -0.8),
    ),
    (
        KeyMatch::only(&[Index]),
        ForceRule::new("fingertip stream", &[Pull::attract(INDEX_TIP, 60.0)]),
    ),
    (
        KeyMatch::only(&[Middle]),
        ForceRule::new("explode", &[Pull::repel(WRIST, 100.0)]).with_jitter(0.5),
    ),
    (
        KeyMatch::only(&[Ring]),
        ForceRule::new("slow spiral", &[Pull::attract(WRIST, 25.0).with_swirl(0.5)]),
    ),
    (
        KeyMatch::only(&[Pinky]),
        ForceRule::new("tiny scatter", &[Pull::repel(WRIST, 15.0)]).with_jitter(0.3),
    ),
    // Peace ignores the thumb, so THREE / OK streams like peace.
    (
        KeyMatch::partial(&[Index, Middle], &[Ring, Pinky]),
        ForceRule::new(
            "dual stream",
            &[Pull::attract(INDEX_TIP, 40.0), Pull::attract(MIDDLE_TIP, 40.0)],
        ),
    ),
    (
        KeyMatch::only(&[Thumb, Pinky]),
        ForceRule::new(
            "surfer wave",
            &[Pull::attract(THUMB_TIP, 30.0), Pull::attract(PINKY_TIP, 30.0)],
        )
        .with_bias(0.0, -0.3),
    ),
    (
        KeyMatch::only(&[Thumb, Index]),
        ForceRule::new(
            "pinch repel",
            &[Pull::repel(THUMB_TIP, 40.0), Pull::repel(INDEX_TIP, 40.0)],
        ),
    ),
    (
        KeyMatch::only(&[Index, Pinky]),
        ForceRule::new(
            "wide repel",
            &[Pull::repel(INDEX_TIP, 35.0), Pull::repel(PINKY_TIP, 35.0)],
        ),
    ),
    (
        KeyMatch::only(&[Index, Middle, Ring]),
        ForceRule::new(
            "fan out",
            &[
                Pull::attract(INDEX_TIP, 30.0),
                Pull::attract(MIDDLE_TIP, 30.0),
                Pull::attract(RING_TIP, 30.0),
            ],
        ),
    ),
    (
        KeyMatch::only(&[Thumb, Index, Middle, Ring]),
        ForceRule::new("strong repel", &[Pull::repel(WRIST, 90.0)]),
    ),
    (
        KeyMatch::only(&[Index, Middle, Ring, Pinky]),
        ForceRule::new("fountain", &[Pull::attract(WRIST, 50.0).with_swirl(0.8)])
            .with_bias(0.0, -0.6),
    ),
];

// ════════════════════════════════════════════════════════════════════════════
// Primitive
// ════════════════════════════════════════════════════════════════════════════

/// Velocity change pulling a particle at `position` toward (or pushing it away
/// from) `target`.
///
/// The distance is floored at 1 and the radial term falls off as
/// `strength / distance^1.3`.  A non-zero `swirl` adds a tangential component
/// of magnitude `swirl`, independent of distance.
pub fn attract_or_repel(
    position: Point,
    target:   Point,
    strength: f32,
    polarity: Polarity,
    swirl:    f32,
) -> Point {
    let d = target - position;
    let dist = d.length().max(1.0);
    let unit = d * (1.0 / dist);
    let force = strength / dist.powf(FALLOFF_EXPONENT);

    let mut dv = unit * (polarity.sign() * force);
    if swirl != 0.0 {
        dv += Point::new(-unit.y, unit.x) * swirl;
    }
    dv
}

// ════════════════════════════════════════════════════════════════════════════
// ForceField
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub struct ForceField {
    table: [Option<ForceRule>; FingerKey::COMBINATIONS],
}

impl Default for ForceField {
    fn default() -> Self {
        ForceField::standard()
    }
}

impl ForceField {
    pub fn standard() -> Self {
        ForceField::from_rules(STANDARD_RULES)
    }

    /// Compile an ordered rule list into the key table.
    pub fn from_rules(rules: &[(KeyMatch, ForceRule)]) -> Self {
        let table = std::array::from_fn(|bits| {
            let key = FingerKey::from_bits(bits as u8);
            rules.iter().find(|(m, _)| m.matches(key)).map(|(_, rule)| *rule)
        });
        ForceField { table }
    }

    /// The single-hand rule for `key`.
    pub fn rule_for(&self, key: FingerKey) -> &ForceRule {
        self.table[key.index()].as_ref().unwrap_or(&GENTLE_ORBIT)
    }

    /// Whether `key` has its own rule rather than the gentle-orbit fallback.
    pub fn has_rule(&self, key: FingerKey) -> bool {
        self.table[key.index()].is_some()
    }

    /// The rule this frame selects, or `None` when no hand is present.
    pub fn select(&self, frame: &HandFrame) -> Option<&ForceRule> {
        if frame.hand_count() >= 2 {
            return Some(&TWO_HAND_VORTEX);
        }
        frame.primary().map(|hand| self.rule_for(hand.key))
    }

    /// Resolve this frame's rule into concrete target points.
    ///
    /// Pulls whose landmark is missing from a short pose are dropped.
    pub fn resolve(&self, frame: &HandFrame) -> Option<ActiveForce> {
        let rule = *self.select(frame)?;
        let primary = frame.primary()?;
        let pulls = rule
            .pulls
            .iter()
            .filter_map(|pull| {
                let target = match pull.anchor {
                    Anchor::Landmark(idx) => primary.pose.landmark(idx)?,
                    Anchor::WristMidpoint => {
                        let a = frame.hands().first()?.pose.wrist()?;
                        let b = frame.hands().get(1)?.pose.wrist()?;
                        a.midpoint(b)
                    }
                };
                Some(ResolvedPull { target, ..ResolvedPull::from(*pull) })
            })
            .collect();
        Some(ActiveForce { rule, pulls })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ActiveForce
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedPull {
    pub target:   Point,
    pub strength: f32,
    pub polarity: Polarity,
    pub swirl:    f32,
}

impl From<Pull> for ResolvedPull {
    fn from(p: Pull) -> Self {
        ResolvedPull { target: Point::ZERO, strength: p.strength, polarity: p.polarity, swirl: p.swirl }
    }
}

/// A rule bound to this frame's landmark positions.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveForce {
    rule:  ForceRule,
    pulls: Vec<ResolvedPull>,
}

impl ActiveForce {
    pub fn rule(&self) -> &ForceRule {
        &self.rule
    }

    pub fn pulls(&self) -> &[ResolvedPull] {
        &self.pulls
    }

    /// Total velocity change for a particle at `position`.
    pub fn delta<R: Rng + ?Sized>(&self, position: Point, rng: &mut R) -> Point {
        let mut dv = Point::ZERO;
        for p in &self.pulls {
            dv += attract_or_repel(position, p.target, p.strength, p.polarity, p.swirl);
        }
        dv += self.rule.bias;
        if self.rule.jitter > 0.0 {
            let j = self.rule.jitter;
            dv += Point::new(rng.gen_range(-j..=j), rng.gen_range(-j..=j));
        }
        dv
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
