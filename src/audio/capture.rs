// src/audio/capture.rs
//! Pass-through playback source that feeds the analyser's sample ring.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use ringbuf::{traits::*, HeapRb};
use rodio::Source;

/// Wraps a playback source and copies every sample into the analysis
/// ring on its way to the output device. Oldest samples are dropped
/// when the ring is full, so the tap always sees the most recent audio.
pub struct CaptureSource<S> {
    inner: S,
    ring: Arc<Mutex<HeapRb<f32>>>,
}

impl<S> CaptureSource<S> {
    pub fn new(inner: S, ring: Arc<Mutex<HeapRb<f32>>>) -> Self {
        Self { inner, ring }
    }
}

impl<S> Iterator for CaptureSource<S>
where
    S: Source<Item = f32>,
{
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let sample = self.inner.next()?;
        if let Ok(mut ring) = self.ring.lock() {
            if ring.is_full() {
                let _ = ring.try_pop();
            }
            let _ = ring.try_push(sample);
        }
        Some(sample)
    }
}

impl<S> Source for CaptureSource<S>
where
    S: Source<Item = f32>,
{
    fn current_frame_len(&self) -> Option<usize> {
        self.inner.current_frame_len()
    }

    fn channels(&self) -> u16 {
        self.inner.channels()
    }

    fn sample_rate(&self) -> u32 {
        self.inner.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.inner.total_duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rodio::source::SineWave;

    #[test]
    fn samples_pass_through_and_land_in_the_ring() {
        let ring = Arc::new(Mutex::new(HeapRb::<f32>::new(64)));
        let source = SineWave::new(440.0);
        let mut capture = CaptureSource::new(source, ring.clone());

        let heard: Vec<f32> = (&mut capture).take(32).collect();
        assert_eq!(heard.len(), 32);

        let ring = ring.lock().unwrap();
        let captured: Vec<f32> = ring.iter().copied().collect();
        assert_eq!(captured, heard);
    }

    #[test]
    fn full_ring_keeps_the_newest_samples() {
        let ring = Arc::new(Mutex::new(HeapRb::<f32>::new(8)));
        let source = SineWave::new(440.0);
        let mut capture = CaptureSource::new(source, ring.clone());

        let heard: Vec<f32> = (&mut capture).take(100).collect();
        let ring = ring.lock().unwrap();
        let captured: Vec<f32> = ring.iter().copied().collect();
        assert_eq!(captured, heard[92..]);
    }
}
