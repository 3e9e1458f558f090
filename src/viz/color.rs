// src/viz/color.rs
//! Color math for the visualizer: RGB interpolation, hex parsing,
//! Bézier easing, and the hue sweep used by bar mode.

use anyhow::{bail, Result};

/// An 8-bit RGB triple.
pub type Rgb = [u8; 3];

/// White, the low-amplitude end of every ridge color ramp.
pub const WHITE: Rgb = [255, 255, 255];

/// Linear interpolation between two RGB triples at parameter `t` in [0,1].
///
/// Endpoints are exact: `lerp_rgb(a, b, 0.0) == a` and
/// `lerp_rgb(a, b, 1.0) == b` (up to integer rounding, which rounds
/// half away from zero the same way at both ends).
pub fn lerp_rgb(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    [
        (a[0] as f32 + (b[0] as f32 - a[0] as f32) * t).round() as u8,
        (a[1] as f32 + (b[1] as f32 - a[1] as f32) * t).round() as u8,
        (a[2] as f32 + (b[2] as f32 - a[2] as f32) * t).round() as u8,
    ]
}

/// Parse a `#rrggbb` (or `rrggbb`) hex color into an RGB triple.
///
/// Fails fast with a descriptive error so a malformed color stop is
/// rejected at configuration time, never inside the render loop.
pub fn parse_hex(hex: &str) -> Result<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("invalid hex color: {hex:?} (expected #rrggbb)");
    }
    Ok([
        u8::from_str_radix(&digits[0..2], 16)?,
        u8::from_str_radix(&digits[2..4], 16)?,
        u8::from_str_radix(&digits[4..6], 16)?,
    ])
}

/// A cubic Bézier easing curve evaluated from its y control points,
/// with implicit endpoints y(0) = 0 and y(1) = 1.
///
/// `Easing::ease_in()` is cubic-bezier(0.42, 0, 1, 1): slow start, then
/// faster. For y1, y2 in [0,1] the curve is monotonic non-decreasing,
/// so low amplitudes stay nearly invisible and opacity ramps up late.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Easing {
    pub y1: f32,
    pub y2: f32,
}

impl Easing {
    /// cubic-bezier(0.42, 0, 1, 1).
    pub fn ease_in() -> Self {
        Self { y1: 0.0, y2: 1.0 }
    }

    /// Evaluate the curve at `t` in [0,1].
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        3.0 * u * u * t * self.y1 + 3.0 * u * t * t * self.y2 + t * t * t
    }
}

/// Convert HSL (h in degrees, s/l in [0,1]) to an RGB triple.
///
/// Bar mode sweeps the hue across the horizontal bin index.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Rgb {
    let h = h.rem_euclid(360.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;
    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    [
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    ]
}
