// src/ui/widgets/mod.rs
//! Custom widgets for the ridgeline UI.

pub mod file_list;
pub mod player_panel;
pub mod visual;

// Re-export widget rendering functions
pub use file_list::render_file_list;
pub use player_panel::render_player_panel;
pub use visual::render_visual;
