//! Software-rendered visualizer using `minifb`.
//!
//! Each frame is composed from three layers:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ [T][I][M][R][P]   finger boxes in the gesture colour     │
//! │ GESTURE NAME                                              │
//! │ description                                               │
//! │                                                           │
//! │        hand skeleton (dimmed underlay)                    │
//! │     + particle trails (fading layer, saturating add)      │
//! │                                                           │
//! │ Hands detected: N                                         │
//! │ key legend                                                │
//! └──────────────────────────────────────────────────────────┘
//! ```

use std::sync::mpsc::Sender;

use gesture_field::pose::landmark;
use gesture_field::{Canvas, DrawRequest, Finger, HandFrame, HudState, ParticleSystem, Rgb};
use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::hands::SimInput;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

const BG_COLOR:        u32   = 0xFF000000;
const BONE_COLOR:      u32   = 0xFF969696;
const JOINT_COLOR:     u32   = 0xFFFFFFFF;
const JOINT_RADIUS:    i32   = 2;
const FINGER_BOX_X:    usize = 20;
const FINGER_BOX_Y:    usize = 10;
const FINGER_BOX_W:    usize = 30;
const FINGER_BOX_H:    usize = 40;
const FINGER_BOX_STEP: usize = 38;
const FINGER_DOWN:     u32   = 0xFF3C3C3C;
const NAME_Y:          usize = 60;
const DESC_Y:          usize = 94;
const DESC_COLOR:      u32   = 0xFFC8C8C8;
const TWO_HANDS_COLOR: u32   = 0xFFFFFF00;
const HAND_MSG_COLOR:  u32   = 0xFF969696;
const LEGEND_COLOR:    u32   = 0xFF646464;
const LEGEND:          &str  = "mouse=wrist  1-5=toggle finger  F=fist  O=open  H=hide  N=second hand  Q=quit";

// ════════════════════════════════════════════════════════════════════════════
// Raster
// ════════════════════════════════════════════════════════════════════════════

/// A `width × height` buffer of `0xAARRGGBB` pixels.  Everything drawn is
/// clipped to the buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    pub buf:    Vec<u32>,
    pub width:  usize,
    pub height: usize,
}

impl Raster {
    pub fn new(width: usize, height: usize) -> Self {
        Raster { buf: vec![BG_COLOR; width * height], width, height }
    }

    pub fn clear(&mut self) {
        self.buf.fill(BG_COLOR);
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.buf[y * self.width + x])
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.buf[y as usize * self.width + x as usize] = color;
        }
    }

    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(self.height) {
            for col in x..(x + w).min(self.width) {
                self.buf[row * self.width + col] = color;
            }
        }
    }

    /// Filled disc; radius 0 is a single pixel.
    pub fn fill_disc(&mut self, cx: i32, cy: i32, r: i32, color: u32) {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Bresenham line, both endpoints inclusive.
    pub fn draw_line(&mut self, (x0, y0): (i32, i32), (x1, y1): (i32, i32), color: u32) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let (mut x, mut y, mut err) = (x0, y0, dx + dy);
        loop {
            self.set_pixel(x, y, color);
            if x == x1 && y == y1 { break; }
            let e2 = 2 * err;
            if e2 >= dy { err += dy; x += sx; }
            if e2 <= dx { err += dx; y += sy; }
        }
    }

    /// Text in the 3×5 bitmap font, each font pixel drawn as a
    /// `scale × scale` block.
    pub fn draw_label(&mut self, text: &str, x: usize, y: usize, scale: usize, color: u32) {
        let scale = scale.max(1);
        let mut cx = x;
        for ch in text.chars() {
            if cx + 3 * scale > self.width { break; }
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.fill_rect(cx + col * scale, y + row * scale, scale, scale, color);
                    }
                }
            }
            cx += 4 * scale; // 3 wide + 1 gap
        }
    }

    /// Multiply every channel by `factor`.
    pub fn fade(&mut self, factor: f32) {
        for px in &mut self.buf {
            *px = fade_pixel(*px, factor);
        }
    }
}

/// Particles land on the trail layer as discs of their own radius.
impl Canvas for Raster {
    fn draw_point(&mut self, request: DrawRequest) {
        let color = request.color.scaled(request.alpha).to_argb();
        self.fill_disc(request.x as i32, request.y as i32, request.size as i32, color);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pixel arithmetic
// ────────────────────────────────────────────────────────────────────────────

/// Scale each channel of an ARGB pixel, truncating.
pub fn fade_pixel(px: u32, factor: f32) -> u32 {
    Rgb::from_argb(px).scaled(factor).to_argb()
}

/// Per-channel saturating sum of two ARGB pixels.
pub fn add_pixels(a: u32, b: u32) -> u32 {
    let (a, b) = (Rgb::from_argb(a), Rgb::from_argb(b));
    Rgb::new(a.r.saturating_add(b.r), a.g.saturating_add(b.g), a.b.saturating_add(b.b)).to_argb()
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window:     Window,
    frame:      Raster,
    underlay:   Raster,
    trail:      Raster,
    trail_fade: f32,
    dim:        f32,
    skeleton:   bool,
    /// Present in simulation mode; the demo script ignores window input.
    sim_tx:     Option<Sender<SimInput>>,
    last_mouse: Option<(f32, f32)>,
}

impl Visualizer {
    pub fn new(cfg: &AppConfig, sim_tx: Option<Sender<SimInput>>) -> Result<Self> {
        let (width, height) = cfg.window_size();
        let mut window = Window::new(
            &cfg.display.title,
            width, height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| AppError::Window(e.to_string()))?;

        window.limit_update_rate(Some(cfg.frame_interval()));

        Ok(Visualizer {
            window,
            frame:      Raster::new(width, height),
            underlay:   Raster::new(width, height),
            trail:      Raster::new(width, height),
            trail_fade: cfg.display.trail_fade,
            dim:        cfg.display.underlay_dim,
            skeleton:   cfg.display.show_skeleton,
            sim_tx,
            last_mouse: None,
        })
    }

    /// Returns false when the window should close.
    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Poll mouse and keyboard and translate to [`SimInput`] events.
    /// Returns false once the user asked to quit.
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() { return false; }

        let quit = self.window.is_key_pressed(Key::Q, KeyRepeat::No)
                || self.window.is_key_pressed(Key::Escape, KeyRepeat::No);

        let Some(tx) = &self.sim_tx else { return !quit; };

        if quit {
            let _ = tx.send(SimInput::Quit);
            return false;
        }

        let mouse = self.window.get_mouse_pos(MouseMode::Clamp);
        if let Some((x, y)) = mouse {
            if self.last_mouse != mouse {
                let _ = tx.send(SimInput::MouseMove { x, y });
            }
        }
        self.last_mouse = mouse;

        let one_shot = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);
        let finger_keys = [
            (Key::Key1, Finger::Thumb),
            (Key::Key2, Finger::Index),
            (Key::Key3, Finger::Middle),
            (Key::Key4, Finger::Ring),
            (Key::Key5, Finger::Pinky),
        ];
        for (key, finger) in finger_keys {
            if one_shot(key) {
                let _ = tx.send(SimInput::ToggleFinger(finger));
            }
        }
        if one_shot(Key::F) { let _ = tx.send(SimInput::Fist); }
        if one_shot(Key::O) { let _ = tx.send(SimInput::OpenHand); }
        if one_shot(Key::H) { let _ = tx.send(SimInput::ToggleVisible); }
        if one_shot(Key::N) { let _ = tx.send(SimInput::ToggleSecondHand); }

        true
    }

    /// Render one frame.
    pub fn render(&mut self, system: &ParticleSystem, hands: &HandFrame, hud: &HudState) -> Result<()> {
        self.trail.fade(self.trail_fade);
        system.draw(&mut self.trail);

        self.underlay.clear();
        if self.skeleton {
            draw_skeletons(&mut self.underlay, hands);
        }

        compose(&mut self.frame, &self.underlay, self.dim, &self.trail);
        draw_hud(&mut self.frame, hud);

        self.window
            .update_with_buffer(&self.frame.buf, self.frame.width, self.frame.height)
            .map_err(|e| AppError::Window(e.to_string()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layers
// ────────────────────────────────────────────────────────────────────────────

/// Bones in grey, joints in white.  Incomplete hands draw whatever joints
/// they have and skip bones with a missing end.
pub fn draw_skeletons(target: &mut Raster, hands: &HandFrame) {
    for hand in hands.hands() {
        let at = |idx: usize| hand.pose.landmark(idx).map(|p| (p.x as i32, p.y as i32));
        for (a, b) in landmark::BONES {
            if let (Some(pa), Some(pb)) = (at(a), at(b)) {
                target.draw_line(pa, pb, BONE_COLOR);
            }
        }
        for p in hand.pose.points() {
            target.fill_disc(p.x as i32, p.y as i32, JOINT_RADIUS, JOINT_COLOR);
        }
    }
}

/// `out = underlay × dim ⊕ trail`, channels saturating.
pub fn compose(out: &mut Raster, underlay: &Raster, dim: f32, trail: &Raster) {
    for ((o, &u), &t) in out.buf.iter_mut().zip(&underlay.buf).zip(&trail.buf) {
        *o = add_pixels(fade_pixel(u, dim), t);
    }
}

pub fn draw_hud(target: &mut Raster, hud: &HudState) {
    let accent = hud.descriptor.display_color.to_argb();

    for (i, (finger, up)) in hud.finger_highlights().into_iter().enumerate() {
        let x = FINGER_BOX_X + i * FINGER_BOX_STEP;
        target.fill_rect(x, FINGER_BOX_Y, FINGER_BOX_W, FINGER_BOX_H, if up { accent } else { FINGER_DOWN });
        target.draw_label(finger.label(), x + 9, FINGER_BOX_Y + 10, 4, BG_COLOR);
    }

    target.draw_label(hud.descriptor.name, FINGER_BOX_X, NAME_Y, 4, accent);
    target.draw_label(hud.descriptor.description, FINGER_BOX_X, DESC_Y, 2, DESC_COLOR);

    let msg_color = if hud.is_two_handed() { TWO_HANDS_COLOR } else { HAND_MSG_COLOR };
    let bottom = target.height;
    target.draw_label(&hud.hand_message(), FINGER_BOX_X, bottom.saturating_sub(34), 2, msg_color);
    target.draw_label(LEGEND, FINGER_BOX_X, bottom.saturating_sub(14), 1, LEGEND_COLOR);
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '<' => [0b001, 0b010, 0b100, 0b010, 0b001],
        '>' => [0b100, 0b010, 0b001, 0b010, 0b100],
        '(' => [0b001, 0b010, 0b010, 0b010, 0b001],
        ')' => [0b100, 0b010, 0b010, 0b010, 0b100],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
