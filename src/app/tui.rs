//! Terminal management
//!
//! Owns the crossterm backend, switches the terminal into and out of raw
//! alternate-screen mode, and waits for key presses between redraws.

use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::{
    io::{self, Stdout},
    time::Duration,
};
use tracing::debug;

/// Smallest terminal the screens are laid out for
pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 20;

/// Whether `area` is large enough for the quiz screens
pub fn fits(area: Rect) -> bool {
    area.width >= MIN_WIDTH && area.height >= MIN_HEIGHT
}

/// Terminal handle. Restores the terminal when dropped.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Longest wait for input before the caller redraws
    poll_timeout: Duration,
    /// Raw mode and alternate screen are on
    active: bool,
}

impl Tui {
    pub fn new(poll_timeout: Duration) -> io::Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        Ok(Self {
            terminal,
            poll_timeout,
            active: false,
        })
    }

    /// Enter raw mode on the alternate screen
    pub fn init(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        self.active = true;
        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        Ok(())
    }

    /// Leave raw mode. Does nothing when the terminal was never set up or is
    /// already restored.
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        debug!("Terminal restored");
        Ok(())
    }

    pub fn is_size_adequate(&self) -> io::Result<bool> {
        Ok(fits(self.terminal.size()?))
    }

    pub fn draw<F>(&mut self, render: F) -> io::Result<()>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(render)?;
        Ok(())
    }

    /// Replace the whole screen with a resize hint
    pub fn draw_too_small(&mut self) -> io::Result<()> {
        self.draw(|f| {
            let warning = Paragraph::new(format!(
                "Terminal too small. Please resize to at least {}x{}.",
                MIN_WIDTH, MIN_HEIGHT
            ))
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
            f.render_widget(warning, f.size());
        })
    }

    /// Wait up to the poll timeout for a key press. Releases and repeats
    /// (reported on Windows) are skipped, as are mouse and resize events.
    pub fn next_key(&mut self) -> io::Result<Option<KeyEvent>> {
        if !event::poll(self.poll_timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
            _ => Ok(None),
        }
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
