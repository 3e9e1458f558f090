// src/ui/layout.rs
//! Layout computation for the UI panels.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Computed pane areas for one frame.
pub struct ComputedLayout {
    /// File browser, left column.
    pub files: Rect,
    /// Player panel above the visualizer.
    pub player: Rect,
    /// Visualizer surface, the showpiece pane.
    pub visual: Rect,
}

/// Split the terminal: browser on the left, player panel and the
/// visualizer stacked on the right.
pub fn compute_layout(area: Rect) -> ComputedLayout {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(10)])
        .split(columns[1]);

    ComputedLayout {
        files: columns[0],
        player: right[0],
        visual: right[1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panes_tile_the_terminal() {
        let area = Rect::new(0, 0, 120, 40);
        let l = compute_layout(area);
        assert_eq!(l.files.x, 0);
        assert_eq!(l.player.x, l.visual.x);
        assert_eq!(l.player.y, 0);
        assert!(l.visual.height >= 10);
        assert_eq!(l.files.width + l.player.width, 120);
    }
}
