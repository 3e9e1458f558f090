// src/viz/field.rs
//! Line-field construction: one deformed polyline ("ridge") per grid
//! row, displaced by the sampled amplitudes.

use tiny_skia::Point;

use super::config::VizConfig;
use super::sampler::GridSampler;

/// One grid row rendered as a deformed curve.
#[derive(Debug, Clone)]
pub struct Ridge {
    /// Points across the row, both grid edges included.
    pub points: Vec<Point>,
    /// Mean of the row's point amplitudes, used for coloring.
    pub amplitude: f32,
}

/// Build the frame's ridges from scratch.
///
/// Rows and columns both run over `step ..= size - step` so the field
/// reaches both grid edges without gaps. Displacement grows toward the
/// horizontal center and vanishes within `edge_margin` of the sides;
/// its sign comes from `cfg.direction`.
pub fn build_field(sampler: &GridSampler<'_>, cfg: &VizConfig) -> Vec<Ridge> {
    let size = cfg.size as f32;
    let step = cfg.step;
    if step == 0 || cfg.size < 2 * step {
        return Vec::new();
    }

    let sign = cfg.direction.sign();
    let half = size / 2.0;
    let mut ridges = Vec::with_capacity((cfg.size / step) as usize);

    let mut row_idx = 0usize;
    let mut row_y = step;
    while row_y <= cfg.size - step {
        let mut points = Vec::with_capacity((cfg.size / step) as usize);
        let mut sum = 0.0f32;

        let mut col_idx = 0usize;
        let mut col_x = step;
        while col_x <= cfg.size - step {
            let amplitude = sampler.amplitude(row_idx, col_idx);
            let x = col_x as f32;
            let distance_to_center = (x - half).abs();
            let variance = (half - cfg.edge_margin - distance_to_center).max(0.0);
            let displacement = amplitude * variance / 2.0 * sign;

            points.push(Point::from_xy(x, row_y as f32 + displacement));
            sum += amplitude;
            col_idx += 1;
            col_x += step;
        }

        let amplitude = if points.is_empty() { 0.0 } else { sum / points.len() as f32 };
        ridges.push(Ridge { points, amplitude });
        row_idx += 1;
        row_y += step;
    }

    ridges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viz::config::DisplacementDirection;
    use crate::viz::sampler::Spectrum;
    use approx::assert_abs_diff_eq;

    #[test]
    fn grid_dimensions_match_the_step_arithmetic() {
        let cfg = VizConfig::default(); // size=400, step=8
        let db = vec![-140.0f32; 1024];
        let sampler = GridSampler::new(Spectrum::Db(&db), &cfg);
        let ridges = build_field(&sampler, &cfg);

        // step ..= size - step inclusive: (size - 2*step)/step + 1.
        let expected = ((cfg.size - 2 * cfg.step) / cfg.step + 1) as usize;
        assert_eq!(expected, 49);
        assert_eq!(ridges.len(), expected);
        for ridge in &ridges {
            assert_eq!(ridge.points.len(), expected);
        }
    }

    #[test]
    fn silent_field_is_flat() {
        let cfg = VizConfig::default();
        let db = vec![-140.0f32; 1024];
        let sampler = GridSampler::new(Spectrum::Db(&db), &cfg);
        for (row_idx, ridge) in build_field(&sampler, &cfg).iter().enumerate() {
            let row_y = (cfg.step + row_idx as u32 * cfg.step) as f32;
            assert_eq!(ridge.amplitude, 0.0);
            for p in &ridge.points {
                assert_abs_diff_eq!(p.y, row_y);
            }
        }
    }

    #[test]
    fn saturated_field_reaches_the_row_maximum() {
        let cfg = VizConfig::default();
        let db = vec![0.0f32; 1024];
        let sampler = GridSampler::new(Spectrum::Db(&db), &cfg);
        let ridges = build_field(&sampler, &cfg);

        let half = cfg.size as f32 / 2.0;
        for (row_idx, ridge) in ridges.iter().enumerate() {
            if row_idx <= cfg.lead_rows {
                continue;
            }
            assert_abs_diff_eq!(ridge.amplitude, 1.0);
            let row_y = (cfg.step + row_idx as u32 * cfg.step) as f32;
            for p in &ridge.points {
                let variance = (half - cfg.edge_margin - (p.x - half).abs()).max(0.0);
                // Default direction is Up: displacement is negative.
                assert_abs_diff_eq!(p.y, row_y - variance / 2.0, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn displacement_sign_follows_the_configured_direction() {
        let mut cfg = VizConfig::default();
        cfg.direction = DisplacementDirection::Down;
        let db = vec![0.0f32; 1024];
        let sampler = GridSampler::new(Spectrum::Db(&db), &cfg);
        let ridges = build_field(&sampler, &cfg);

        let mid = &ridges[20];
        let row_y = (cfg.step + 20 * cfg.step) as f32;
        let center = mid.points.len() / 2;
        assert!(mid.points[center].y > row_y);
    }

    #[test]
    fn edge_columns_never_displace() {
        // Columns within edge_margin of either side have zero variance.
        let mut cfg = VizConfig::default();
        cfg.edge_margin = 200.0; // margin covers the whole half-width
        let db = vec![0.0f32; 1024];
        let sampler = GridSampler::new(Spectrum::Db(&db), &cfg);
        for (row_idx, ridge) in build_field(&sampler, &cfg).iter().enumerate() {
            let row_y = (cfg.step + row_idx as u32 * cfg.step) as f32;
            for p in &ridge.points {
                assert_abs_diff_eq!(p.y, row_y);
            }
        }
    }

    #[test]
    fn undersized_surface_yields_no_field() {
        let mut cfg = VizConfig::default();
        cfg.size = 8;
        cfg.step = 8;
        let db = vec![0.0f32; 64];
        let sampler = GridSampler::new(Spectrum::Db(&db), &cfg);
        assert!(build_field(&sampler, &cfg).is_empty());
    }
}
