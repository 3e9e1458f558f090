// src/ui/keybindings.rs
//! Keyboard input handling and key mappings.

use crossterm::event::{KeyCode, KeyEvent};

/// Actions derived from key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationAction {
    Up,
    Down,
    Enter,
    Back,
    TogglePause,
    Stop,
    NextTrack,
    PreviousTrack,
    /// Cycle through the gradient presets for the visualizer.
    CycleGradient,
    /// Switch between ridge and bar rendering.
    ToggleMode,
    Quit,
    None,
}

/// Convert a key event to a navigation action.
pub fn key_to_action(key: &KeyEvent) -> NavigationAction {
    match key.code {
        KeyCode::Down => NavigationAction::Down,
        KeyCode::Up => NavigationAction::Up,
        KeyCode::Enter | KeyCode::Right => NavigationAction::Enter,
        KeyCode::Left => NavigationAction::Back,
        KeyCode::Char(' ') => NavigationAction::TogglePause,
        KeyCode::Char('s') => NavigationAction::Stop,
        KeyCode::Char('n') | KeyCode::Char('>') => NavigationAction::NextTrack,
        KeyCode::Char('p') | KeyCode::Char('<') => NavigationAction::PreviousTrack,
        KeyCode::Char('g') => NavigationAction::CycleGradient,
        KeyCode::Char('m') => NavigationAction::ToggleMode,
        KeyCode::Char('q') => NavigationAction::Quit,
        _ => NavigationAction::None,
    }
}
