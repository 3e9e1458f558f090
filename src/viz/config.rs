// src/viz/config.rs
//! Visualizer tuning knobs.
//!
//! Every constant the pipeline depends on lives here as a named,
//! overridable field; nothing in the sampler, field builder or
//! compositor hardcodes a magic number.

use anyhow::Result;

use super::color::{parse_hex, Easing, Rgb, WHITE};

/// Which scale the spectrum is read on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpectrumScale {
    /// Log-power dBFS in [-140, 0]; normalized as (v + 140) / 140.
    Decibel,
    /// Linear bytes in 0-255; normalized as v / 255.
    Byte,
}

/// Whether amplitude pushes a ridge up or down from its baseline.
///
/// The default is `Up` (displacement sign -1 in canvas coordinates):
/// ridges bulge toward the top of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplacementDirection {
    #[default]
    Up,
    Down,
}

impl DisplacementDirection {
    pub fn sign(self) -> f32 {
        match self {
            DisplacementDirection::Up => -1.0,
            DisplacementDirection::Down => 1.0,
        }
    }
}

/// Rendering mode for the visual surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// The deformed line-field (default).
    #[default]
    Ridges,
    /// Per-bin vertical bars with temporal smoothing and a motion trail.
    Bars,
}

/// Configuration for the visualizer surface and pipeline.
#[derive(Debug, Clone)]
pub struct VizConfig {
    /// Side length of the square drawing surface, in logical pixels.
    pub size: u32,
    /// Grid spacing between rows and columns, in logical pixels.
    pub step: u32,
    /// Leading rows forced to amplitude 0 (calm top margin).
    pub lead_rows: usize,
    /// Trailing rows excluded from rendering (calm bottom margin).
    pub tail_rows: usize,
    /// How close to the side edges displacement is allowed, in pixels.
    pub edge_margin: f32,
    /// Fraction of the spectrum mapped onto the grid; below 1.0 the
    /// noisiest high bins are discarded.
    pub bin_fraction: f32,
    /// Scale of the spectrum values read from the analyser.
    pub scale: SpectrumScale,
    /// Displacement sign.
    pub direction: DisplacementDirection,
    /// Opacity easing over ridge amplitude.
    pub easing: Easing,
    /// Gradient start color (top rows).
    pub color_start: Rgb,
    /// Gradient end color (bottom rows).
    pub color_end: Rgb,
    /// Backing-store scale; the pixmap is `size * pixel_ratio` on each
    /// axis while coordinate math stays in logical units.
    pub pixel_ratio: f32,
    /// Width of the visible stroke, in logical pixels.
    pub line_width: f32,
    /// Glow stroke width multiplier over `line_width`.
    pub glow_width_factor: f32,
    /// Minimum glow alpha so the halo never fully disappears.
    pub glow_alpha_floor: f32,
    /// Bar mode: blend factor toward the previous frame (0 = no
    /// smoothing, 1 = frozen).
    pub bar_blend: f32,
    /// Rendering mode.
    pub mode: RenderMode,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            size: 400,
            step: 8,
            lead_rows: 8,
            tail_rows: 6,
            edge_margin: 10.0,
            bin_fraction: 1.0,
            scale: SpectrumScale::Decibel,
            direction: DisplacementDirection::default(),
            easing: Easing::ease_in(),
            color_start: WHITE,
            color_end: WHITE,
            pixel_ratio: 1.0,
            line_width: 1.5,
            glow_width_factor: 3.0,
            glow_alpha_floor: 0.3,
            bar_blend: 0.9,
            mode: RenderMode::default(),
        }
    }
}

impl VizConfig {
    /// Set the color stops from `#rrggbb` strings, rejecting malformed
    /// input before the render loop ever sees it.
    pub fn with_gradient(mut self, start: &str, end: &str) -> Result<Self> {
        self.color_start = parse_hex(start)?;
        self.color_end = parse_hex(end)?;
        Ok(self)
    }

    /// Total grid steps per axis.
    pub fn total_steps(&self) -> u32 {
        if self.step == 0 { 0 } else { self.size / self.step }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_parsing_fails_fast() {
        assert!(VizConfig::default().with_gradient("#ff0000", "#ff512f").is_ok());
        assert!(VizConfig::default().with_gradient("#ff0000", "nope").is_err());
    }

    #[test]
    fn default_grid_dimensions() {
        let cfg = VizConfig::default();
        assert_eq!(cfg.total_steps(), 50);
    }
}
