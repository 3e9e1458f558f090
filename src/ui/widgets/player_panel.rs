// src/ui/widgets/player_panel.rs
//! Player information panel widget.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::audio::TrackMetadata;

/// Render the player information panel.
pub fn render_player_panel(
    f: &mut Frame<'_>,
    area: Rect,
    metadata: Option<&TrackMetadata>,
    gradient_name: &str,
    elapsed: u64,
    duration: u64,
    is_playing: bool,
    is_paused: bool,
) {
    f.render_widget(
        Block::default().borders(Borders::ALL).title("Player"),
        area,
    );

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    if let Some(TrackMetadata {
        tags,
        properties,
        duration_secs,
    }) = metadata
    {
        let mut lines = vec![format!("Duration: {}s", duration_secs)];
        for (k, v) in tags {
            lines.push(format!("{}: {}", k, v));
        }
        for (k, v) in properties {
            lines.push(format!("{}: {}", k, v));
        }
        f.render_widget(
            Paragraph::new(lines.join("\n")).wrap(Wrap { trim: true }),
            inner[0],
        );
    } else {
        f.render_widget(
            Paragraph::new("No track playing").wrap(Wrap { trim: true }),
            inner[0],
        );
    }

    let play_pause_icon = if !is_playing {
        Span::styled(" ⏵ ", Style::default().fg(Color::Gray))
    } else if is_paused {
        Span::styled(" ⏵ ", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(" ⏸ ", Style::default().fg(Color::Green))
    };

    let controls = Line::from(vec![
        Span::styled(" ⏮ ", Style::default().fg(Color::Cyan)),
        Span::raw(" "),
        Span::styled(" ⏹ ", Style::default().fg(Color::Red)),
        Span::raw(" "),
        play_pause_icon,
        Span::raw(" "),
        Span::styled(" ⏭ ", Style::default().fg(Color::Cyan)),
        Span::raw("   "),
        Span::styled(
            format!("gradient: {gradient_name} (g)"),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(
        Paragraph::new(controls).alignment(Alignment::Center),
        inner[1],
    );

    let ratio = (elapsed as f64 / duration.max(1) as f64).clamp(0.0, 1.0);
    let time_label = format!(
        "{}:{:02} / {}:{:02}",
        elapsed / 60,
        elapsed % 60,
        duration / 60,
        duration % 60
    );
    f.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::ITALIC))
            .ratio(ratio)
            .label(time_label),
        inner[2],
    );
}
