// src/lib.rs
//! Ridgeline - a terminal music player with a frequency-reactive
//! ridgeline visualizer.
//!
//! This library provides all the core functionality for the ridgeline player.

pub mod app;
pub mod audio;
pub mod fs;
pub mod ui;
pub mod viz;
