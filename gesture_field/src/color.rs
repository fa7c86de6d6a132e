//! RGB colors shared by the catalog, the particles and the renderer.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// An opaque 8-bit-per-channel color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// A random bright color: every channel drawn from `100..=255`.
    pub fn bright<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Rgb::new(
            rng.gen_range(100..=255),
            rng.gen_range(100..=255),
            rng.gen_range(100..=255),
        )
    }

    /// Scale every channel by `alpha`, clamped to `0.0..=1.0`.
    pub fn scaled(self, alpha: f32) -> Self {
        let a = alpha.clamp(0.0, 1.0);
        let ch = |c: u8| (c as f32 * a) as u8;
        Rgb::new(ch(self.r), ch(self.g), ch(self.b))
    }

    /// Pack as `0xAARRGGBB` with full alpha.
    pub fn to_argb(self) -> u32 {
        0xFF00_0000 | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Unpack the RGB channels of a `0xAARRGGBB` pixel.
    pub fn from_argb(px: u32) -> Self {
        Rgb::new((px >> 16) as u8, (px >> 8) as u8, px as u8)
    }
}
