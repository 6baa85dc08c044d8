//! Terminal access boundary.
//!
//! Every component draws through a [`Surface`] handed to it per call;
//! nothing holds a global terminal. Two backends:
//! - [`CrosstermSurface`]: the real terminal, via crossterm commands
//! - [`MemorySurface`]: an in-memory character grid with scripted input
//!
//! [`SharedSurface`] serialises access when several threads draw on one
//! terminal. Each component update is a cursor move followed by writes, so
//! the lock has to span the whole update, not a single primitive.

mod terminal;
mod memory;

use std::io;
use std::sync::{Arc, Mutex};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::Color;

pub use self::terminal::CrosstermSurface;
pub use self::memory::{Cell, MemorySurface};

/// Columns a tab advances to (multiples of this).
pub const TAB_STOP: u16 = 8;

/// Primitive terminal operations the components are built on.
///
/// Coordinates are zero-based `(column, row)`.
pub trait Surface {
    /// Place the cursor at `(column, row)`.
    fn move_cursor(&mut self, column: u16, row: u16) -> io::Result<()>;

    fn set_foreground(&mut self, color: Color) -> io::Result<()>;

    fn set_background(&mut self, color: Color) -> io::Result<()>;

    /// Return to the terminal's default colours.
    fn reset_colors(&mut self) -> io::Result<()>;

    /// Write text at the cursor, advancing it.
    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Write text followed by a line break (cursor to column 0 of the next row).
    fn write_line(&mut self, text: &str) -> io::Result<()>;

    /// Blank an entire row. The cursor ends at column 0 of that row.
    fn clear_line(&mut self, row: u16) -> io::Result<()>;

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()>;

    /// Block until a key is pressed. No timeout.
    ///
    /// With `hide_echo` false, a printable key is echoed at the cursor.
    fn read_key(&mut self, hide_echo: bool) -> io::Result<KeyEvent>;

    /// Block until a full line is entered; the terminator is stripped.
    fn read_line(&mut self) -> io::Result<String>;

    /// Terminal width in columns.
    fn width(&mut self) -> io::Result<u16>;

    /// Row the cursor is currently on.
    fn cursor_row(&mut self) -> io::Result<u16>;

    /// Push queued output to the terminal.
    fn flush(&mut self) -> io::Result<()>;
}

/// Ctrl+C, whatever the case of the letter.
pub fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c' | 'C'))
}

/// Turn a Ctrl+C press into an `Interrupted` error.
///
/// Raw mode suppresses SIGINT while a key is read, so the key itself has
/// to carry the interrupt back out to the caller.
pub(crate) fn check_interrupt(key: KeyEvent) -> io::Result<KeyEvent> {
    if is_interrupt(&key) {
        Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted by Ctrl+C"))
    } else {
        Ok(key)
    }
}

/// A surface shared between threads.
///
/// Cloning yields another handle to the same surface.
#[derive(Debug)]
pub struct SharedSurface<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> Clone for SharedSurface<S> {
    fn clone(&self) -> Self {
        SharedSurface {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Surface> SharedSurface<S> {
    pub fn new(surface: S) -> Self {
        SharedSurface {
            inner: Arc::new(Mutex::new(surface)),
        }
    }

    /// Run `f` with exclusive access to the surface.
    ///
    /// Everything `f` draws lands on the terminal without interleaving
    /// from other holders. A poisoned lock is recovered: the panicking
    /// writer may have left a half-drawn row, but the surface itself is
    /// still usable.
    pub fn with<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        let mut guard = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut *guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn shared_surface_serialises_move_and_write() {
        let shared = SharedSurface::new(MemorySurface::new(20, 8));

        let handles: Vec<_> = (0..8u16)
            .map(|row| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        shared.with(|s| {
                            s.move_cursor(0, row).unwrap();
                            s.write(&format!("row{row}")).unwrap();
                        });
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        shared.with(|s| {
            for row in 0..8u16 {
                assert_eq!(s.row_text(row), format!("row{row}"));
            }
        });
    }

    #[test]
    fn ctrl_c_is_an_interrupt() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let err = check_interrupt(ctrl_c).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Interrupted);

        let plain_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(check_interrupt(plain_c).unwrap(), plain_c);
        assert!(!is_interrupt(&KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn clones_point_at_the_same_surface() {
        let a = SharedSurface::new(MemorySurface::new(10, 2));
        let b = a.clone();
        a.with(|s| s.write("hi").unwrap());
        b.with(|s| assert_eq!(s.row_text(0), "hi"));
    }
}
