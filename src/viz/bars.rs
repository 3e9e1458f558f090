// src/viz/bars.rs
//! Bar rendering mode: frequency bins drawn directly as vertical bars
//! with temporal smoothing, a hue sweep, and a motion-trail wash
//! instead of a hard clear.

use tiny_skia::{
    Color, FillRule, GradientStop, LinearGradient, Paint, PathBuilder, Pixmap, Point, Rect,
    SpreadMode, Transform,
};

use super::color::hsl_to_rgb;
use super::config::VizConfig;
use super::sampler::Spectrum;

/// Blend each bin toward the previous frame's value.
///
/// `blend` close to 1.0 snaps quickly to the current value; lower
/// values leave more of the previous frame in place.
pub fn smooth_toward(current: f32, previous: f32, blend: f32) -> f32 {
    previous + (current - previous) * blend
}

/// Normalize the spectrum into `out`, reusing its storage.
fn normalize_into(spectrum: Spectrum<'_>, out: &mut Vec<f32>) {
    out.clear();
    for i in 0..spectrum.len() {
        let v = match spectrum {
            Spectrum::Db(s) => ((s[i] + 140.0) / 140.0).clamp(0.0, 1.0),
            Spectrum::Byte(s) => s[i] as f32 / 255.0,
        };
        out.push(if v.is_nan() { 0.0 } else { v });
    }
}

/// Draw one frame of bars onto `pixmap`.
///
/// `previous` carries the prior frame's normalized bin values and is
/// updated in place; pass it empty on the first frame.
pub fn draw_bars(
    pixmap: &mut Pixmap,
    spectrum: Spectrum<'_>,
    previous: &mut Vec<f32>,
    scratch: &mut Vec<f32>,
    cfg: &VizConfig,
) {
    let width = cfg.size as f32;
    let height = cfg.size as f32;
    let bins = spectrum.len();
    if bins == 0 {
        return;
    }

    normalize_into(spectrum, scratch);
    if previous.len() != bins {
        previous.clear();
        previous.extend_from_slice(scratch);
    }

    let ts = Transform::from_scale(cfg.pixel_ratio, cfg.pixel_ratio);

    // Translucent wash instead of a clear: earlier frames linger as a
    // fading trail.
    let mut wash = Paint::default();
    wash.set_color(Color::from_rgba8(0, 0, 0, 51));
    if let Some(rect) = Rect::from_xywh(0.0, 0.0, width, height) {
        pixmap.fill_rect(rect, &wash, ts, None);
    }

    let bar_width = (width / bins as f32) * 1.5;
    let radius = (bar_width / 2.0).min(4.0);
    let mut x = 0.0f32;

    for i in 0..bins {
        if x >= width {
            break;
        }
        let value = smooth_toward(scratch[i], previous[i], cfg.bar_blend);
        let bar_height = (value * height).clamp(0.0, height);
        let top = height - bar_height;

        let hue = i as f32 / bins as f32 * 360.0;
        let [r, g, b] = hsl_to_rgb(hue, 1.0, 0.5);

        // Rounded top corners, square base.
        let mut pb = PathBuilder::new();
        pb.move_to(x + radius, top);
        pb.line_to(x + bar_width - radius, top);
        pb.quad_to(x + bar_width, top, x + bar_width, top + radius);
        pb.line_to(x + bar_width, height);
        pb.line_to(x, height);
        pb.line_to(x, top + radius);
        pb.quad_to(x, top, x + radius, top);
        if let Some(path) = pb.finish() {
            let stops = vec![
                GradientStop::new(0.0, Color::from_rgba8(r, g, b, 204)),
                GradientStop::new(1.0, Color::from_rgba8(r, g, b, 51)),
            ];
            if let Some(shader) = LinearGradient::new(
                Point::from_xy(x, top),
                Point::from_xy(x, height),
                stops,
                SpreadMode::Pad,
                Transform::identity(),
            ) {
                let mut paint = Paint::default();
                paint.anti_alias = true;
                paint.shader = shader;
                pixmap.fill_path(&path, &paint, FillRule::Winding, ts, None);
            }
        }

        x += bar_width + 1.0;
    }

    // Next frame interpolates from this frame's raw values.
    std::mem::swap(previous, scratch);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn smoothing_blends_between_frames() {
        assert_abs_diff_eq!(smooth_toward(1.0, 0.0, 0.9), 0.9);
        assert_abs_diff_eq!(smooth_toward(0.0, 1.0, 0.9), 0.1);
        // blend 1.0 snaps to current, 0.0 freezes the previous frame
        assert_abs_diff_eq!(smooth_toward(0.7, 0.2, 1.0), 0.7);
        assert_abs_diff_eq!(smooth_toward(0.7, 0.2, 0.0), 0.2);
    }

    #[test]
    fn previous_frame_is_replaced_by_current_values() {
        let mut cfg = VizConfig::default();
        cfg.mode = crate::viz::config::RenderMode::Bars;
        let mut pixmap = Pixmap::new(cfg.size, cfg.size).unwrap();

        let db = vec![-70.0f32; 64];
        let mut previous = Vec::new();
        let mut scratch = Vec::new();
        draw_bars(&mut pixmap, Spectrum::Db(&db), &mut previous, &mut scratch, &cfg);

        assert_eq!(previous.len(), 64);
        for &v in &previous {
            assert_abs_diff_eq!(v, 0.5, epsilon = 1e-6);
        }
    }

    #[test]
    fn loud_bars_paint_pixels_and_silence_only_washes() {
        let cfg = VizConfig::default();
        let mut pixmap = Pixmap::new(cfg.size, cfg.size).unwrap();
        let mut previous = Vec::new();
        let mut scratch = Vec::new();

        let silent = vec![-140.0f32; 128];
        draw_bars(&mut pixmap, Spectrum::Db(&silent), &mut previous, &mut scratch, &cfg);
        let after_silence: u64 = pixmap.data().iter().map(|&b| b as u64).sum();

        let loud = vec![0.0f32; 128];
        draw_bars(&mut pixmap, Spectrum::Db(&loud), &mut previous, &mut scratch, &cfg);
        let after_loud: u64 = pixmap.data().iter().map(|&b| b as u64).sum();
        assert!(after_loud > after_silence);
    }

    #[test]
    fn empty_spectrum_is_a_no_op() {
        let cfg = VizConfig::default();
        let mut pixmap = Pixmap::new(cfg.size, cfg.size).unwrap();
        let empty: Vec<f32> = Vec::new();
        let mut previous = Vec::new();
        let mut scratch = Vec::new();
        draw_bars(&mut pixmap, Spectrum::Db(&empty), &mut previous, &mut scratch, &cfg);
        assert!(pixmap.data().iter().all(|&b| b == 0));
    }
}
