// src/ui/widgets/visual.rs
//! Presents the visualizer's pixmap through the terminal graphics
//! protocol.

use image::DynamicImage;
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders},
    Frame,
};
use ratatui_image::{picker::Picker, Image, Resize};

use crate::viz::Visualizer;

/// Render the visualizer pane: a square area centered in the pane,
/// filled with the current frame.
pub fn render_visual(f: &mut Frame<'_>, area: Rect, picker: &mut Picker, viz: &Visualizer) {
    f.render_widget(
        Block::default().borders(Borders::ALL).title("Visualizer (m: mode)"),
        area,
    );
    if area.width < 4 || area.height < 4 {
        return;
    }

    let inner = Rect::new(area.x + 1, area.y + 1, area.width - 2, area.height - 2);
    let frame = DynamicImage::ImageRgba8(viz.frame_image());

    let proto_size = Rect::new(0, 0, inner.width, inner.height);
    if let Ok(proto) = picker.new_protocol(frame, proto_size, Resize::Fit(None)) {
        f.render_widget(Image::new(&proto), inner);
    }
}
