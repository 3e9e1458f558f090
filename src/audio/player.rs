// src/audio/player.rs
//! Playback transport built on rodio, with the analyser tap wired into
//! the playback path.
//!
//! The output stream lives on a dedicated audio thread commanded over
//! a channel; play/pause/resume/stop return immediately and the thread
//! mirrors its state into atomic flags for the UI.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

use anyhow::Result;
use ringbuf::{traits::*, HeapRb};
use rodio::{Decoder, OutputStream, Sink, Source};

use super::capture::CaptureSource;
use super::metadata::{load_metadata, TrackMetadata};

enum Command {
    Play(PathBuf),
    Pause,
    Resume,
    Stop,
}

/// The playback transport: start/pause/resume/stop a track while
/// feeding the shared analysis ring.
pub struct Player {
    cmd_tx: Sender<Command>,
    playing: Arc<AtomicBool>,
    paused: Arc<AtomicBool>,
    /// Metadata of the most recently started track, if loaded.
    pub metadata: Option<TrackMetadata>,
}

impl Player {
    /// Create an idle transport writing captured samples into `ring`
    /// (obtained from `Analyser::capture_buffer`).
    pub fn new(ring: Arc<Mutex<HeapRb<f32>>>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let playing = Arc::new(AtomicBool::new(false));
        let paused = Arc::new(AtomicBool::new(false));

        let thread_playing = playing.clone();
        let thread_paused = paused.clone();
        thread::spawn(move || audio_thread(cmd_rx, ring, thread_playing, thread_paused));

        Self {
            cmd_tx,
            playing,
            paused,
            metadata: None,
        }
    }

    /// Stop any prior playback and start playing `path`.
    pub fn play(&mut self, path: &PathBuf) -> Result<()> {
        self.cmd_tx.send(Command::Play(path.clone())).ok();
        Ok(())
    }

    /// Load metadata for `path` without touching transport state; safe
    /// from a background thread.
    pub fn load_metadata(path: PathBuf) -> Result<TrackMetadata> {
        load_metadata(path)
    }

    pub fn pause(&mut self) {
        let _ = self.cmd_tx.send(Command::Pause);
    }

    pub fn resume(&mut self) {
        let _ = self.cmd_tx.send(Command::Resume);
    }

    pub fn stop(&mut self) {
        let _ = self.cmd_tx.send(Command::Stop);
    }

    /// True while a sink exists (playing or paused).
    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }
}

/// Owns the output stream and the current sink for its whole lifetime.
fn audio_thread(
    cmd_rx: Receiver<Command>,
    ring: Arc<Mutex<HeapRb<f32>>>,
    playing: Arc<AtomicBool>,
    paused: Arc<AtomicBool>,
) {
    // No output device: drain commands so senders never block, then
    // exit when the transport is dropped. The UI keeps working mute.
    let Ok((_stream, handle)) = OutputStream::try_default() else {
        while cmd_rx.recv().is_ok() {}
        return;
    };

    let mut sink: Option<Sink> = None;

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            Command::Play(path) => {
                if let Some(s) = sink.take() {
                    s.stop();
                }
                // Stale samples from the previous track would show up
                // as a ghost spectrum on the first frames.
                if let Ok(mut r) = ring.lock() {
                    r.clear();
                }

                let started = start_track(&handle, &path, &ring);
                playing.store(started.is_some(), Ordering::SeqCst);
                paused.store(false, Ordering::SeqCst);
                sink = started;
            }
            Command::Pause => {
                if let Some(s) = &sink {
                    s.pause();
                    paused.store(true, Ordering::SeqCst);
                }
            }
            Command::Resume => {
                if let Some(s) = &sink {
                    s.play();
                    paused.store(false, Ordering::SeqCst);
                }
            }
            Command::Stop => {
                if let Some(s) = sink.take() {
                    s.stop();
                }
                playing.store(false, Ordering::SeqCst);
                paused.store(false, Ordering::SeqCst);
            }
        }
    }

    if let Some(s) = sink.take() {
        s.stop();
    }
}

/// Decode `path` and queue it on a fresh sink, tapped for analysis.
fn start_track(
    handle: &rodio::OutputStreamHandle,
    path: &PathBuf,
    ring: &Arc<Mutex<HeapRb<f32>>>,
) -> Option<Sink> {
    let sink = Sink::try_new(handle).ok()?;
    let file = File::open(path).ok()?;
    let source = Decoder::new(BufReader::new(file)).ok()?;
    let tapped = CaptureSource::new(source.convert_samples::<f32>(), ring.clone());
    sink.append(tapped);
    sink.play();
    Some(sink)
}
