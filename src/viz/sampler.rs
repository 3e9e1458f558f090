// src/viz/sampler.rs
//! Spectrum sampling: maps grid coordinates onto frequency bins and
//! reads back normalized amplitudes.

use super::config::{SpectrumScale, VizConfig};

/// Linear range remap: v in [a, b] -> [c, d].
pub fn map_range(v: f32, a: f32, b: f32, c: f32, d: f32) -> f32 {
    (v - a) * (d - c) / (b - a) + c
}

/// A borrowed view of one frame's spectrum, on either scale.
#[derive(Debug, Clone, Copy)]
pub enum Spectrum<'a> {
    Db(&'a [f32]),
    Byte(&'a [u8]),
}

impl<'a> Spectrum<'a> {
    pub fn len(&self) -> usize {
        match self {
            Spectrum::Db(s) => s.len(),
            Spectrum::Byte(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The bin's value normalized to [0,1], NaN-sanitized and clamped.
    fn normalized(&self, idx: usize) -> f32 {
        let raw = match self {
            Spectrum::Db(s) => (s[idx] + 140.0) / 140.0,
            Spectrum::Byte(s) => s[idx] as f32 / 255.0,
        };
        if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 1.0) }
    }

    /// The scale this view carries, matching `VizConfig::scale`.
    pub fn scale(&self) -> SpectrumScale {
        match self {
            Spectrum::Db(_) => SpectrumScale::Decibel,
            Spectrum::Byte(_) => SpectrumScale::Byte,
        }
    }
}

/// Samples one frame's spectrum over the visualizer grid.
pub struct GridSampler<'a> {
    spectrum: Spectrum<'a>,
    /// Steps per grid axis.
    total_steps: f32,
    /// Grid positions at or below this row never produce amplitude.
    lead_rows: usize,
    /// Highest bin index the grid maps onto.
    max_bin: usize,
}

impl<'a> GridSampler<'a> {
    pub fn new(spectrum: Spectrum<'a>, cfg: &VizConfig) -> Self {
        debug_assert_eq!(spectrum.scale(), cfg.scale);
        let bins = spectrum.len();
        let max_bin = if bins == 0 {
            0
        } else {
            (((bins - 1) as f32 * cfg.bin_fraction.clamp(0.0, 1.0)).floor() as usize)
                .min(bins - 1)
        };
        Self {
            spectrum,
            total_steps: cfg.total_steps() as f32,
            lead_rows: cfg.lead_rows,
            max_bin,
        }
    }

    /// Amplitude in [0,1] for grid cell (`row_idx`, `col_idx`).
    ///
    /// The flattened grid position `row * T + col` is remapped onto
    /// the bin range, skipping the leading quiet rows so the top
    /// margin stays flat regardless of spectrum content.
    pub fn amplitude(&self, row_idx: usize, col_idx: usize) -> f32 {
        if row_idx <= self.lead_rows || self.spectrum.is_empty() {
            return 0.0;
        }
        let t = self.total_steps;
        let lo = self.lead_rows as f32 * t;
        let hi = t * t;
        // Degenerate grid (size == step): no range to map, stay flat.
        if hi <= lo {
            return 0.0;
        }
        let pos = row_idx as f32 * t + col_idx as f32;
        let bin = map_range(pos, lo, hi, 0.0, self.max_bin as f32).floor();
        let bin = (bin.max(0.0) as usize).min(self.spectrum.len() - 1);
        self.spectrum.normalized(bin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn cfg() -> VizConfig {
        VizConfig::default()
    }

    #[test]
    fn map_range_is_affine_at_endpoints() {
        assert_abs_diff_eq!(map_range(3.0, 3.0, 9.0, -1.0, 5.0), -1.0);
        assert_abs_diff_eq!(map_range(9.0, 3.0, 9.0, -1.0, 5.0), 5.0);
        assert_abs_diff_eq!(map_range(6.0, 3.0, 9.0, -1.0, 5.0), 2.0);
    }

    #[test]
    fn floor_spectrum_yields_zero_everywhere() {
        let db = vec![-140.0f32; 1024];
        let sampler = GridSampler::new(Spectrum::Db(&db), &cfg());
        for row in 0..50 {
            for col in 0..50 {
                assert_eq!(sampler.amplitude(row, col), 0.0);
            }
        }
    }

    #[test]
    fn ceiling_spectrum_saturates_past_lead_rows() {
        let db = vec![0.0f32; 1024];
        let c = cfg();
        let sampler = GridSampler::new(Spectrum::Db(&db), &c);
        for row in (c.lead_rows + 1)..40 {
            for col in 0..40 {
                assert_eq!(sampler.amplitude(row, col), 1.0);
            }
        }
    }

    #[test]
    fn lead_rows_stay_quiet_regardless_of_content() {
        let db = vec![0.0f32; 1024];
        let c = cfg();
        let sampler = GridSampler::new(Spectrum::Db(&db), &c);
        for row in 0..=c.lead_rows {
            for col in 0..50 {
                assert_eq!(sampler.amplitude(row, col), 0.0);
            }
        }
    }

    #[test]
    fn amplitude_is_always_in_unit_range() {
        // Out-of-contract values (above ceiling, below floor, NaN) must
        // still come out clamped and finite.
        let db = vec![25.0f32, -500.0, f32::NAN, -70.0];
        let sampler = GridSampler::new(Spectrum::Db(&db), &cfg());
        for row in 0..60 {
            for col in 0..60 {
                let a = sampler.amplitude(row, col);
                assert!((0.0..=1.0).contains(&a), "amplitude {a} out of range");
            }
        }
    }

    #[test]
    fn byte_scale_normalizes_to_unit_range() {
        let bytes = vec![255u8; 512];
        let sampler = GridSampler::new(Spectrum::Byte(&bytes), &cfg());
        assert_eq!(sampler.amplitude(20, 10), 1.0);
        let silent = vec![0u8; 512];
        let sampler = GridSampler::new(Spectrum::Byte(&silent), &cfg());
        assert_eq!(sampler.amplitude(20, 10), 0.0);
    }

    #[test]
    fn degenerate_grid_does_not_panic() {
        let db = vec![0.0f32; 64];
        let mut c = cfg();
        c.size = 8;
        c.step = 8;
        let sampler = GridSampler::new(Spectrum::Db(&db), &c);
        assert_eq!(sampler.amplitude(30, 30), 0.0);
    }

    #[test]
    fn empty_spectrum_does_not_panic() {
        let db: Vec<f32> = Vec::new();
        let sampler = GridSampler::new(Spectrum::Db(&db), &cfg());
        assert_eq!(sampler.amplitude(20, 20), 0.0);
    }

    #[test]
    fn bin_fraction_limits_the_mapped_range() {
        let mut db = vec![-140.0f32; 1000];
        // Only the top 10% of bins are loud; with bin_fraction 0.9 the
        // grid never reaches them.
        for v in db.iter_mut().skip(900) {
            *v = 0.0;
        }
        let mut c = cfg();
        c.bin_fraction = 0.9;
        let sampler = GridSampler::new(Spectrum::Db(&db), &c);
        for row in 0..50 {
            for col in 0..50 {
                assert_eq!(sampler.amplitude(row, col), 0.0);
            }
        }
    }
}
