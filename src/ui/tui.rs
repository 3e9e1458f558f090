// src/ui/tui.rs
//! Terminal setup and the frame loop.
//!
//! The loop is the display's refresh driver: every iteration advances
//! the visualizer exactly one frame, draws the UI, then waits out the
//! remainder of the frame budget polling for input. Frames never
//! overlap; the visualizer tick completes before the next draw starts.

use std::{
    io,
    time::{Duration, Instant},
};

use anyhow::Result;
use crossterm::{
    event::{self, Event as CEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::App;

/// ~30 fps; the terminal image protocol is the bottleneck well before
/// the render pipeline is.
const FRAME_BUDGET: Duration = Duration::from_millis(33);

pub fn run() -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = event_loop(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    let mut app = App::new()?;
    let mut last_frame = Instant::now();
    let mut last_second = Instant::now();

    loop {
        app.frame();
        terminal.draw(|f| app.draw(f))?;

        let timeout = FRAME_BUDGET
            .checked_sub(last_frame.elapsed())
            .unwrap_or_default();
        if event::poll(timeout)? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.on_key(key) {
                    break;
                }
            }
        }
        last_frame = Instant::now();

        if last_second.elapsed() >= Duration::from_secs(1) {
            app.tick_elapsed();
            last_second = Instant::now();
        }
    }

    app.shutdown();
    Ok(())
}
