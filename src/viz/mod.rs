// src/viz/mod.rs
//! The frequency-reactive visualizer.
//!
//! Each frame pulls the current spectrum from the analyser, maps it
//! onto a square grid of amplitudes, builds the deformed line-field,
//! and composites it onto a pixmap. No geometry survives between
//! frames; the only cross-frame state is the displayed pixels (bar
//! mode's trail) and bar mode's smoothed bin values.

pub mod bars;
pub mod color;
pub mod compositor;
pub mod config;
pub mod field;
pub mod sampler;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use image::RgbaImage;
use tiny_skia::Pixmap;

use crate::audio::Analyser;
use config::SpectrumScale;
use sampler::{GridSampler, Spectrum};

pub use config::{DisplacementDirection, RenderMode, VizConfig};

/// The visualizer surface and its render loop state.
///
/// The owning view drives `tick()` once per display frame and presents
/// `frame_image()`. Tearing the view down calls `shutdown()`, which
/// synchronously cancels the loop: a tick already scheduled when
/// shutdown happens renders nothing.
pub struct Visualizer {
    cfg: VizConfig,
    analyser: Arc<Analyser>,
    /// Preallocated spectrum buffers, reused every frame.
    db_buf: Vec<f32>,
    byte_buf: Vec<u8>,
    pixmap: Pixmap,
    /// Bar mode: previous frame's normalized bin values.
    prev_bins: Vec<f32>,
    scratch: Vec<f32>,
    cancelled: AtomicBool,
    frames: u64,
}

impl Visualizer {
    pub fn new(cfg: VizConfig, analyser: Arc<Analyser>) -> Result<Self> {
        if cfg.pixel_ratio <= 0.0 {
            return Err(anyhow!("pixel_ratio must be positive, got {}", cfg.pixel_ratio));
        }
        let backing = (cfg.size as f32 * cfg.pixel_ratio).round() as u32;
        let pixmap = Pixmap::new(backing.max(1), backing.max(1))
            .ok_or_else(|| anyhow!("cannot allocate a {backing}x{backing} surface"))?;

        let bins = analyser.frequency_bin_count();
        Ok(Self {
            cfg,
            analyser,
            db_buf: vec![-140.0; bins],
            byte_buf: vec![0; bins],
            pixmap,
            prev_bins: Vec::new(),
            scratch: Vec::new(),
            frames: 0,
            cancelled: AtomicBool::new(false),
        })
    }

    /// Render one frame. A no-op after `shutdown()`.
    pub fn tick(&mut self) {
        if self.cancelled.load(Ordering::SeqCst) {
            return;
        }

        let spectrum = match self.cfg.scale {
            SpectrumScale::Decibel => {
                self.analyser.fill_db_spectrum(&mut self.db_buf);
                Spectrum::Db(&self.db_buf)
            }
            SpectrumScale::Byte => {
                self.analyser.fill_byte_spectrum(&mut self.byte_buf);
                Spectrum::Byte(&self.byte_buf)
            }
        };

        match self.cfg.mode {
            RenderMode::Ridges => {
                let sampler = GridSampler::new(spectrum, &self.cfg);
                let ridges = field::build_field(&sampler, &self.cfg);
                compositor::draw_ridges(&mut self.pixmap, &ridges, &self.cfg);
            }
            RenderMode::Bars => {
                bars::draw_bars(
                    &mut self.pixmap,
                    spectrum,
                    &mut self.prev_bins,
                    &mut self.scratch,
                    &self.cfg,
                );
            }
        }

        self.frames += 1;
    }

    /// Cancel the loop. Safe to call more than once.
    pub fn shutdown(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Frames rendered since construction.
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn config(&self) -> &VizConfig {
        &self.cfg
    }

    /// Swap the gradient stops; takes effect next frame.
    pub fn set_gradient(&mut self, start: color::Rgb, end: color::Rgb) {
        self.cfg.color_start = start;
        self.cfg.color_end = end;
    }

    /// Flip between ridge and bar rendering.
    pub fn toggle_mode(&mut self) {
        self.cfg.mode = match self.cfg.mode {
            RenderMode::Ridges => RenderMode::Bars,
            RenderMode::Bars => RenderMode::Ridges,
        };
        // Bar mode's trail and smoothing state start fresh.
        self.prev_bins.clear();
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    /// The current frame as a straight-alpha RGBA image for display.
    pub fn frame_image(&self) -> RgbaImage {
        let w = self.pixmap.width();
        let h = self.pixmap.height();
        let mut img = RgbaImage::new(w, h);
        for (px, out) in self.pixmap.pixels().iter().zip(img.pixels_mut()) {
            let c = px.demultiply();
            *out = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        img
    }
}
