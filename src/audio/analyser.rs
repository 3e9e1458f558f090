// src/audio/analyser.rs
//! Spectrum analysis tap shared between the playback path and the
//! visualizer.
//!
//! The playback thread writes raw samples into a ring buffer through
//! `SampleCapture`; the render loop reads the current magnitude
//! spectrum once per frame. The tap is configured once at construction
//! and never reconfigured, so the single writer and single reader
//! touch disjoint state.

use std::sync::{Arc, Mutex};

use ringbuf::{traits::*, HeapRb};
use rustfft::{num_complex::Complex, FftPlanner};

/// Silence floor of the dB spectrum.
pub const MIN_DB: f32 = -140.0;
/// Ceiling of the dB spectrum.
pub const MAX_DB: f32 = 0.0;

/// FFT state behind a mutex so spectrum reads take `&self`.
struct FftState {
    planner: FftPlanner<f32>,
    scratch: Vec<Complex<f32>>,
    /// Time-smoothed linear magnitudes carried between reads.
    smoothed: Vec<f32>,
    db: Vec<f32>,
}

/// A fixed-configuration frequency analysis tap.
///
/// `frequency_bin_count()` is constant for the analyser's lifetime;
/// spectrum reads are non-blocking and serve the floor value when not
/// enough audio has been captured yet.
pub struct Analyser {
    fft_size: usize,
    /// Exponential smoothing of magnitudes between reads; 0 disables.
    smoothing: f32,
    samples: Arc<Mutex<HeapRb<f32>>>,
    state: Mutex<FftState>,
}

impl Analyser {
    /// Create a tap with the given FFT size (rounded up to a power of
    /// two) and near-raw smoothing.
    pub fn new(fft_size: usize) -> Self {
        Self::with_smoothing(fft_size, 0.01)
    }

    pub fn with_smoothing(fft_size: usize, smoothing: f32) -> Self {
        let fft_size = fft_size.max(32).next_power_of_two();
        let bins = fft_size / 2;
        Self {
            fft_size,
            smoothing: smoothing.clamp(0.0, 1.0),
            samples: Arc::new(Mutex::new(HeapRb::new(fft_size * 8))),
            state: Mutex::new(FftState {
                planner: FftPlanner::new(),
                scratch: vec![Complex::new(0.0, 0.0); fft_size],
                smoothed: vec![0.0; bins],
                db: vec![MIN_DB; bins],
            }),
        }
    }

    /// Number of frequency bins served per read. Constant.
    pub fn frequency_bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Handle to the sample ring for the playback path to write into.
    pub fn capture_buffer(&self) -> Arc<Mutex<HeapRb<f32>>> {
        self.samples.clone()
    }

    /// Fill `buf` with the current spectrum in dBFS, clamped to
    /// [-140, 0]. `buf` must be `frequency_bin_count()` long.
    pub fn fill_db_spectrum(&self, buf: &mut [f32]) {
        debug_assert_eq!(buf.len(), self.frequency_bin_count());
        let Ok(mut state) = self.state.lock() else {
            buf.fill(MIN_DB);
            return;
        };
        if self.compute(&mut state) {
            let n = buf.len().min(state.db.len());
            buf[..n].copy_from_slice(&state.db[..n]);
        } else {
            buf.fill(MIN_DB);
        }
    }

    /// Fill `buf` with the current spectrum mapped linearly from
    /// [-140, 0] dB onto 0-255.
    pub fn fill_byte_spectrum(&self, buf: &mut [u8]) {
        debug_assert_eq!(buf.len(), self.frequency_bin_count());
        let Ok(mut state) = self.state.lock() else {
            buf.fill(0);
            return;
        };
        if self.compute(&mut state) {
            for (out, &db) in buf.iter_mut().zip(state.db.iter()) {
                *out = (((db - MIN_DB) / (MAX_DB - MIN_DB)) * 255.0).round() as u8;
            }
        } else {
            buf.fill(0);
        }
    }

    /// Run the windowed FFT over the latest captured samples.
    /// Returns false when the ring does not hold a full frame yet.
    fn compute(&self, state: &mut FftState) -> bool {
        {
            let Ok(ring) = self.samples.lock() else {
                return false;
            };
            let available = ring.occupied_len();
            if available < self.fft_size {
                return false;
            }
            // Newest fft_size samples, Hann-windowed to limit leakage.
            let start = available - self.fft_size;
            for (i, (slot, sample)) in state
                .scratch
                .iter_mut()
                .zip(ring.iter().skip(start))
                .enumerate()
            {
                let window = 0.5
                    * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / self.fft_size as f32).cos());
                *slot = Complex::new(sample * window, 0.0);
            }
        }

        let fft = state.planner.plan_fft_forward(self.fft_size);
        fft.process(&mut state.scratch);

        let scale = 1.0 / self.fft_size as f32;
        let tau = self.smoothing;
        for i in 0..self.fft_size / 2 {
            let c = state.scratch[i];
            let mag = (c.re * c.re + c.im * c.im).sqrt() * scale;
            state.smoothed[i] = tau * state.smoothed[i] + (1.0 - tau) * mag;
            let db = 20.0 * state.smoothed[i].max(1e-10).log10();
            state.db[i] = db.clamp(MIN_DB, MAX_DB);
        }
        true
    }
}
