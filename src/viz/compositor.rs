// src/viz/compositor.rs
//! Coloring and layered drawing of the ridge field.
//!
//! Each renderable ridge is drawn in three passes: a glow (wide,
//! translucent strokes standing in for a shadow blur), a
//! destination-out cutout that erases the rows stacked behind it, and
//! the visible stroke itself. Ridges draw top-to-bottom so a nearer
//! row's cutout carves into the rows above it.

use std::ops::Range;

use tiny_skia::{
    BlendMode, Color, FillRule, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, Point,
    Stroke, Transform,
};

use super::color::{lerp_rgb, Rgb, WHITE};
use super::config::VizConfig;
use super::field::Ridge;

/// The ridge indices that actually get drawn: everything between the
/// leading quiet rows and the trailing excluded rows.
pub fn renderable_range(ridge_count: usize, cfg: &VizConfig) -> Range<usize> {
    let start = (cfg.lead_rows + 1).min(ridge_count);
    let end = ridge_count.saturating_sub(cfg.tail_rows).max(start);
    start..end
}

/// Color and opacity for ridge `i` within the renderable range.
///
/// Position picks the base color along the configured gradient;
/// amplitude then fades it in from white, and opacity follows the
/// easing curve so quiet rows stay nearly invisible.
pub fn ridge_style(i: usize, range: &Range<usize>, amplitude: f32, cfg: &VizConfig) -> (Rgb, f32) {
    let row_range = range.end.saturating_sub(range.start + 1);
    let t = if row_range > 0 {
        (i - range.start) as f32 / row_range as f32
    } else {
        0.0
    };
    let base = lerp_rgb(cfg.color_start, cfg.color_end, t.clamp(0.0, 1.0));
    let amp = amplitude.clamp(0.0, 1.0);
    (lerp_rgb(WHITE, base, amp), cfg.easing.apply(amp))
}

/// Build a continuously-smooth path through `points` by chaining
/// quadratic segments: each raw point is a control point and the
/// midpoint to its successor is the segment end, with the last segment
/// landing on the final raw point directly.
pub fn smooth_path(points: &[Point]) -> Option<Path> {
    let mut pb = PathBuilder::new();
    match points {
        [] => return None,
        [_] => return None,
        [a, b] => {
            pb.move_to(a.x, a.y);
            pb.line_to(b.x, b.y);
        }
        _ => {
            pb.move_to(points[0].x, points[0].y);
            for pair in points[..points.len() - 1].windows(2) {
                let (p, next) = (pair[0], pair[1]);
                pb.quad_to(p.x, p.y, (p.x + next.x) / 2.0, (p.y + next.y) / 2.0);
            }
            let j = points.len() - 2;
            pb.quad_to(points[j].x, points[j].y, points[j + 1].x, points[j + 1].y);
        }
    }
    pb.finish()
}

fn rgba(color: Rgb, alpha: f32) -> Color {
    Color::from_rgba8(color[0], color[1], color[2], (alpha.clamp(0.0, 1.0) * 255.0) as u8)
}

fn stroke(width: f32) -> Stroke {
    Stroke {
        width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    }
}

/// Draw the frame's ridge field onto `pixmap`.
///
/// The surface is cleared first; every frame is rebuilt from nothing.
pub fn draw_ridges(pixmap: &mut Pixmap, ridges: &[Ridge], cfg: &VizConfig) {
    pixmap.fill(Color::TRANSPARENT);

    let ts = Transform::from_scale(cfg.pixel_ratio, cfg.pixel_ratio);
    let range = renderable_range(ridges.len(), cfg);

    for i in range.clone() {
        let ridge = &ridges[i];
        let Some(path) = smooth_path(&ridge.points) else {
            continue;
        };
        let (color, alpha) = ridge_style(i, &range, ridge.amplitude, cfg);

        let mut paint = Paint::default();
        paint.anti_alias = true;

        // Glow: tiny-skia has no shadow blur, so the halo is layered
        // widening strokes that fade outward; spread grows with alpha.
        let glow_width = cfg.line_width * cfg.glow_width_factor;
        if alpha > 0.0 {
            let spread = 16.0 + 32.0 * alpha;
            let halo_alpha = alpha.max(cfg.glow_alpha_floor);
            for (extra, fade) in [(spread, 0.08), (spread / 2.0, 0.16)] {
                paint.set_color(rgba(color, halo_alpha * fade));
                pixmap.stroke_path(&path, &paint, &stroke(glow_width + extra), ts, None);
            }
            paint.set_color(rgba(color, alpha * 0.5));
            pixmap.stroke_path(&path, &paint, &stroke(glow_width), ts, None);
        }

        // Cutout: erase whatever earlier rows painted under this fill.
        paint.set_color(rgba([0, 0, 0], alpha));
        paint.blend_mode = BlendMode::DestinationOut;
        pixmap.fill_path(&path, &paint, FillRule::Winding, ts, None);
        paint.blend_mode = BlendMode::default();

        // The visible line.
        paint.set_color(rgba(color, alpha));
        pixmap.stroke_path(&path, &paint, &stroke(cfg.line_width), ts, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viz::field::build_field;
    use crate::viz::sampler::{GridSampler, Spectrum};
    use approx::assert_abs_diff_eq;

    #[test]
    fn renderable_range_excludes_both_margins() {
        let cfg = VizConfig::default(); // lead 8, tail 6
        let range = renderable_range(49, &cfg);
        assert_eq!(range, 9..43);
    }

    #[test]
    fn renderable_range_survives_tiny_fields() {
        let cfg = VizConfig::default();
        assert!(renderable_range(0, &cfg).is_empty());
        assert!(renderable_range(5, &cfg).is_empty());
        assert!(renderable_range(10, &cfg).is_empty());
    }

    #[test]
    fn silent_ridges_are_white_and_fully_transparent() {
        let cfg = VizConfig::default();
        let range = renderable_range(49, &cfg);
        let (color, alpha) = ridge_style(range.start, &range, 0.0, &cfg);
        assert_eq!(color, WHITE);
        assert_abs_diff_eq!(alpha, cfg.easing.apply(0.0));
        assert_abs_diff_eq!(alpha, 0.0);
    }

    #[test]
    fn saturated_ridges_take_the_full_base_color() {
        let cfg = VizConfig::default()
            .with_gradient("#4c2cff", "#ff1aff")
            .unwrap();
        let range = renderable_range(49, &cfg);

        let (first, alpha) = ridge_style(range.start, &range, 1.0, &cfg);
        assert_eq!(first, [0x4c, 0x2c, 0xff]);
        assert_abs_diff_eq!(alpha, 1.0);

        let (last, _) = ridge_style(range.end - 1, &range, 1.0, &cfg);
        assert_eq!(last, [0xff, 0x1a, 0xff]);
    }

    #[test]
    fn smooth_path_handles_short_inputs() {
        assert!(smooth_path(&[]).is_none());
        assert!(smooth_path(&[Point::from_xy(1.0, 1.0)]).is_none());
        assert!(smooth_path(&[Point::from_xy(0.0, 0.0), Point::from_xy(4.0, 2.0)]).is_some());
    }

    #[test]
    fn smooth_path_spans_the_full_row() {
        let points: Vec<Point> = (0..10)
            .map(|i| Point::from_xy(i as f32 * 8.0, 100.0))
            .collect();
        let path = smooth_path(&points).unwrap();
        let b = path.bounds();
        assert_abs_diff_eq!(b.left(), 0.0);
        assert_abs_diff_eq!(b.right(), 72.0);
    }

    #[test]
    fn drawing_a_loud_frame_produces_pixels() {
        let cfg = VizConfig::default();
        let db = vec![0.0f32; 1024];
        let sampler = GridSampler::new(Spectrum::Db(&db), &cfg);
        let ridges = build_field(&sampler, &cfg);

        let mut pixmap = Pixmap::new(cfg.size, cfg.size).unwrap();
        draw_ridges(&mut pixmap, &ridges, &cfg);
        assert!(pixmap.data().iter().any(|&b| b != 0));
    }

    #[test]
    fn drawing_a_silent_frame_leaves_the_surface_clear() {
        // Every alpha is ease(0) == 0, so nothing lands on the canvas.
        let cfg = VizConfig::default();
        let db = vec![-140.0f32; 1024];
        let sampler = GridSampler::new(Spectrum::Db(&db), &cfg);
        let ridges = build_field(&sampler, &cfg);

        let mut pixmap = Pixmap::new(cfg.size, cfg.size).unwrap();
        draw_ridges(&mut pixmap, &ridges, &cfg);
        assert!(pixmap.data().iter().all(|&b| b == 0));
    }
}
