//! Blocking line input and "press a key to continue" waits.
//!
//! Thin conveniences over a [`Surface`]; they keep no state between calls.

use std::fmt::Display;
use std::str::FromStr;

use crossterm::event::KeyCode;
use log::trace;

use crate::error::{Error, Result};
use crate::surface::Surface;

/// Print `message` on a fresh line, then block until `key` is pressed.
///
/// Other keys are echoed and otherwise ignored. Ending the program
/// afterwards is the caller's business. Ctrl+C ends the wait with an
/// `Interrupted` I/O error.
pub fn wait_for_key<S: Surface>(surface: &mut S, key: KeyCode, message: &str) -> Result<()> {
    surface.write_line("")?;
    surface.write_line(message)?;
    surface.flush()?;
    loop {
        let pressed = surface.read_key(false)?;
        if pressed.code == key {
            return Ok(());
        }
        trace!("waiting for {key:?}, got {:?}", pressed.code);
    }
}

/// Default message for [`wait_for_key`], naming the key.
pub fn exit_message(key: KeyCode) -> String {
    format!("Press {key} to exit...")
}

/// Print `prompt`, read one line and parse it as `T`.
///
/// With `newline`, input is taken on the line below the prompt.
///
/// # Errors
/// `Parse` when the line does not convert to `T`.
pub fn read_value<S, T>(surface: &mut S, prompt: &str, newline: bool) -> Result<T>
where
    S: Surface,
    T: FromStr,
    T::Err: Display,
{
    surface.write(&format!("{prompt} "))?;
    if newline {
        surface.write_line("")?;
    }
    let line = surface.read_line()?;
    line.parse::<T>()
        .map_err(|e| Error::Parse(format!("{line:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;
    use crossterm::event::{KeyEvent, KeyModifiers};

    #[test]
    fn wait_returns_on_the_named_key_only() {
        let mut s = MemorySurface::new(40, 5);
        s.push_chars("ab");
        s.push_key(KeyCode::Enter);
        s.push_chars("c");

        wait_for_key(&mut s, KeyCode::Enter, "Press Enter to exit...").unwrap();
        assert_eq!(s.pending_keys(), 1);
        assert_eq!(s.row_text(1), "Press Enter to exit...");
        assert_eq!(s.row_text(2), "ab");
    }

    #[test]
    fn ctrl_c_ends_the_wait_with_an_interrupt() {
        let mut s = MemorySurface::new(40, 5);
        s.push_chars("a");
        s.push_keys([KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)]);
        s.push_key(KeyCode::Enter);

        let err = wait_for_key(&mut s, KeyCode::Enter, "Press Enter to exit...").unwrap_err();
        assert!(err.is_interrupted());
        assert_eq!(s.pending_keys(), 1);
    }

    #[test]
    fn exit_message_names_the_key() {
        assert_eq!(exit_message(KeyCode::Enter), "Press Enter to exit...");
    }

    #[test]
    fn read_value_parses_numbers() {
        let mut s = MemorySurface::new(40, 5);
        s.push_line("42");
        let n: u32 = read_value(&mut s, "How many?", false).unwrap();
        assert_eq!(n, 42);
        assert_eq!(s.row_text(0), "How many? 42");
    }

    #[test]
    fn read_value_on_next_line() {
        let mut s = MemorySurface::new(40, 5);
        s.push_line("Ada");
        let name: String = read_value(&mut s, "Name:", true).unwrap();
        assert_eq!(name, "Ada");
        assert_eq!(s.row_text(0), "Name:");
        assert_eq!(s.row_text(1), "Ada");
    }

    #[test]
    fn unparsable_line_is_a_parse_error() {
        let mut s = MemorySurface::new(40, 5);
        s.push_line("lots");
        let err = read_value::<_, i32>(&mut s, "How many?", false).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
