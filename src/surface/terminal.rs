//! The real terminal, driven through crossterm commands.
//!
//! Output is queued and only reaches the terminal on [`Surface::flush`].
//! Raw mode is enabled just for the duration of a key read, so ordinary
//! `println!` output between component calls keeps working. Ctrl+C
//! during a key read comes back as an `Interrupted` error.

use std::io::{self, Write};

use crossterm::cursor::{self, Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode, Clear, ClearType};
use crossterm::queue;

use super::{check_interrupt, Surface};

/// A [`Surface`] over any writer connected to a terminal (normally stdout).
#[derive(Debug)]
pub struct CrosstermSurface<W: Write> {
    out: W,
}

impl CrosstermSurface<io::Stdout> {
    pub fn stdout() -> Self {
        CrosstermSurface::new(io::stdout())
    }
}

impl<W: Write> CrosstermSurface<W> {
    pub fn new(out: W) -> Self {
        CrosstermSurface { out }
    }
}

/// Read events until a key press arrives.
///
/// Release and repeat events (reported on some platforms) are skipped,
/// as are mouse, focus and resize events.
fn next_key_press() -> io::Result<KeyEvent> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(key);
            }
        }
    }
}

impl<W: Write> Surface for CrosstermSurface<W> {
    fn move_cursor(&mut self, column: u16, row: u16) -> io::Result<()> {
        queue!(self.out, MoveTo(column, row))
    }

    fn set_foreground(&mut self, color: Color) -> io::Result<()> {
        queue!(self.out, SetForegroundColor(color))
    }

    fn set_background(&mut self, color: Color) -> io::Result<()> {
        queue!(self.out, SetBackgroundColor(color))
    }

    fn reset_colors(&mut self) -> io::Result<()> {
        queue!(self.out, ResetColor)
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        queue!(self.out, Print(text))
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        // \r\n rather than \n: correct whether or not raw mode is on
        queue!(self.out, Print(text), Print("\r\n"))
    }

    fn clear_line(&mut self, row: u16) -> io::Result<()> {
        queue!(self.out, MoveTo(0, row), Clear(ClearType::CurrentLine))
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        if visible {
            queue!(self.out, Show)
        } else {
            queue!(self.out, Hide)
        }
    }

    fn read_key(&mut self, hide_echo: bool) -> io::Result<KeyEvent> {
        self.out.flush()?;

        enable_raw_mode()?;
        let key = next_key_press();
        // Restore cooked mode even when the read failed
        disable_raw_mode()?;
        let key = check_interrupt(key?)?;

        if !hide_echo {
            if let KeyCode::Char(c) = key.code {
                queue!(self.out, Print(c))?;
                self.out.flush()?;
            }
        }
        Ok(key)
    }

    fn read_line(&mut self) -> io::Result<String> {
        self.out.flush()?;

        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    fn width(&mut self) -> io::Result<u16> {
        let (columns, _rows) = terminal::size()?;
        Ok(columns)
    }

    fn cursor_row(&mut self) -> io::Result<u16> {
        self.out.flush()?;
        let (_column, row) = cursor::position()?;
        Ok(row)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
