// src/app/state.rs
//! Application state management.

use std::{
    path::PathBuf,
    sync::mpsc::{Receiver, Sender},
    sync::Arc,
    thread,
};

use anyhow::{Context, Result};
use crossterm::event::KeyEvent;
use ratatui::{widgets::ListState, Frame};
use ratatui_image::picker::{Picker, ProtocolType};

use crate::{
    audio::{Analyser, Player, TrackMetadata},
    fs::{browser::Entry, load_entries, tail_path, FileCategory},
    ui::{
        keybindings::{key_to_action, NavigationAction},
        layout::compute_layout,
        widgets::{render_file_list, render_player_panel, render_visual},
    },
    viz::{color::Rgb, VizConfig, Visualizer},
};

/// Gradient presets cycled with `g`; first color paints the top rows,
/// last the bottom rows. "white" leaves the ridges untinted.
const GRADIENTS: &[(&str, &str, &str)] = &[
    ("white", "#ffffff", "#ffffff"),
    ("sunset", "#ff7e5f", "#feb47b"),
    ("aqua", "#43e97b", "#38f9d7"),
    ("ruby", "#ff0000", "#ff512f"),
    ("pink", "#db29ff", "#ff00bf"),
];

/// Main application state.
pub struct App {
    /// Current directory being browsed
    pub current_dir: PathBuf,
    /// Directory entries
    pub entries: Vec<Entry>,
    /// List widget state
    pub state: ListState,
    /// Currently selected index
    pub selected: usize,

    /// The analysis tap, owned here and shared by handle with the
    /// transport (writer) and the visualizer (reader).
    pub analyser: Arc<Analyser>,
    /// Playback transport
    pub player: Player,
    /// The visualizer surface
    pub visualizer: Visualizer,

    /// Elapsed playback time in seconds
    pub elapsed: u64,
    /// Total track duration in seconds
    pub duration: u64,
    /// Index of currently playing track in entries (if any)
    pub current_track_index: Option<usize>,

    /// Image picker for the visualizer frame
    picker: Picker,
    /// Gradient presets parsed up front so cycling cannot fail
    gradients: Vec<(&'static str, Rgb, Rgb)>,
    gradient_idx: usize,

    /// Metadata channel (background loader -> UI)
    meta_tx: Sender<TrackMetadata>,
    meta_rx: Receiver<TrackMetadata>,
}

impl App {
    /// Create a new application instance.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let mut state = ListState::default();
        state.select(Some(0));

        // Fall back to a fixed font size when the stdio query fails
        // (e.g. terminals without a graphics protocol).
        let mut picker =
            Picker::from_query_stdio().unwrap_or_else(|_| Picker::from_fontsize((8, 12)));
        picker.set_protocol_type(ProtocolType::Kitty);

        // The original analysis tap: 2^14-point FFT, near-raw smoothing.
        let analyser = Arc::new(Analyser::with_smoothing(1 << 14, 0.01));
        let player = Player::new(analyser.capture_buffer());

        let gradients: Vec<(&'static str, Rgb, Rgb)> = GRADIENTS
            .iter()
            .map(|(name, start, end)| {
                Ok((
                    *name,
                    crate::viz::color::parse_hex(start)?,
                    crate::viz::color::parse_hex(end)?,
                ))
            })
            .collect::<Result<_>>()
            .context("invalid gradient preset")?;

        let cfg = VizConfig {
            pixel_ratio: 2.0,
            ..VizConfig::default()
        };
        let visualizer = Visualizer::new(cfg, analyser.clone())?;

        let (meta_tx, meta_rx) = std::sync::mpsc::channel::<TrackMetadata>();

        Ok(Self {
            current_dir: cwd.clone(),
            entries: load_entries(&cwd),
            state,
            selected: 0,

            analyser,
            player,
            visualizer,

            elapsed: 0,
            duration: 1,
            current_track_index: None,

            picker,
            gradients,
            gradient_idx: 0,

            meta_tx,
            meta_rx,
        })
    }

    /// Handle a key event and return true if the app should quit.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        match key_to_action(&key) {
            NavigationAction::Down => {
                if self.selected + 1 < self.entries.len() {
                    self.selected += 1;
                }
            }
            NavigationAction::Up => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            NavigationAction::Enter => self.open_selected(),
            NavigationAction::Back => {
                if self.current_dir.pop() {
                    self.entries = load_entries(&self.current_dir);
                    self.selected = 0;
                }
            }
            NavigationAction::TogglePause => {
                if self.player.is_paused() {
                    self.player.resume();
                } else {
                    self.player.pause();
                }
            }
            NavigationAction::Stop => {
                self.player.stop();
                self.elapsed = 0;
                self.current_track_index = None;
            }
            NavigationAction::NextTrack => self.play_adjacent_track(1),
            NavigationAction::PreviousTrack => self.play_adjacent_track(-1),
            NavigationAction::CycleGradient => self.cycle_gradient(),
            NavigationAction::ToggleMode => self.visualizer.toggle_mode(),
            NavigationAction::Quit => {
                self.shutdown();
                return true;
            }
            NavigationAction::None => {}
        }

        self.state.select(Some(self.selected));
        false
    }

    /// Per-frame work: advance the visualizer and drain the metadata
    /// channel.
    pub fn frame(&mut self) {
        self.visualizer.tick();
        if let Ok(meta) = self.meta_rx.try_recv() {
            self.duration = meta.duration_secs.max(1);
            self.player.metadata = Some(meta);
        }
    }

    /// Called once a second while the loop runs.
    pub fn tick_elapsed(&mut self) {
        if self.player.is_playing() && !self.player.is_paused() {
            self.elapsed = (self.elapsed + 1).min(self.duration);
        }
    }

    /// Tear everything down; safe to call more than once.
    pub fn shutdown(&mut self) {
        self.player.stop();
        self.visualizer.shutdown();
    }

    /// Draw the application UI.
    pub fn draw(&mut self, f: &mut Frame<'_>) {
        let layout = compute_layout(f.area());

        let title = format!(" {}", tail_path(&self.current_dir, 3));
        render_file_list(f, layout.files, &title, &self.entries, &mut self.state);

        render_player_panel(
            f,
            layout.player,
            self.player.metadata.as_ref(),
            self.gradients[self.gradient_idx].0,
            self.elapsed,
            self.duration,
            self.player.is_playing(),
            self.player.is_paused(),
        );

        render_visual(f, layout.visual, &mut self.picker, &self.visualizer);
    }

    fn open_selected(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let (name, is_dir, category, _) = &self.entries[self.selected];
        let path = self.current_dir.join(name);

        if *is_dir {
            self.current_dir.push(name);
            self.entries = load_entries(&self.current_dir);
            self.selected = 0;
        } else if *category == FileCategory::Audio {
            self.start_track(path, self.selected);
        }
    }

    fn cycle_gradient(&mut self) {
        self.gradient_idx = (self.gradient_idx + 1) % self.gradients.len();
        let (_, start, end) = self.gradients[self.gradient_idx];
        self.visualizer.set_gradient(start, end);
    }

    fn start_track(&mut self, path: PathBuf, entry_idx: usize) {
        if self.player.play(&path).is_err() {
            return;
        }
        self.player.metadata = None;
        self.elapsed = 0;
        self.duration = 1;
        self.current_track_index = Some(entry_idx);

        // Metadata loads off-thread so probing a large file never
        // stalls a frame.
        let tx = self.meta_tx.clone();
        thread::spawn(move || {
            if let Ok(meta) = Player::load_metadata(path) {
                let _ = tx.send(meta);
            }
        });
    }

    /// Play the next or previous audio track relative to the current
    /// one. `direction`: 1 for next, -1 for previous, wrapping.
    fn play_adjacent_track(&mut self, direction: i32) {
        let audio_indices: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, (_, is_dir, cat, _))| !is_dir && *cat == FileCategory::Audio)
            .map(|(i, _)| i)
            .collect();

        if audio_indices.is_empty() {
            return;
        }

        let current_pos = self
            .current_track_index
            .and_then(|idx| audio_indices.iter().position(|&i| i == idx));

        let next_pos = match current_pos {
            Some(pos) => {
                let new_pos = pos as i32 + direction;
                if new_pos < 0 {
                    audio_indices.len() - 1
                } else if new_pos >= audio_indices.len() as i32 {
                    0
                } else {
                    new_pos as usize
                }
            }
            None => {
                if direction > 0 { 0 } else { audio_indices.len() - 1 }
            }
        };

        let entry_idx = audio_indices[next_pos];
        let (name, _, _, _) = &self.entries[entry_idx];
        let path = self.current_dir.join(name);

        self.start_track(path, entry_idx);
        self.selected = entry_idx;
        self.state.select(Some(entry_idx));
    }
}
