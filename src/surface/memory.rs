//! In-memory terminal: a character grid with scripted input.
//!
//! Behaves like a plain terminal closely enough to check what a component
//! leaves on screen: writes overwrite cells, tabs skip to the next tab stop
//! without erasing, text wraps at the right edge, and a line break on the
//! last row scrolls the grid up. Every character written is also kept in a
//! transcript, and rows touched since the last [`MemorySurface::reset_touched`]
//! are tracked, so tests can check how much was redrawn.

use std::collections::{BTreeSet, VecDeque};
use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::Color;

use super::{check_interrupt, Surface, TAB_STOP};

/// One character cell and the colours it was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            ch: ' ',
            foreground: None,
            background: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MemorySurface {
    width: u16,
    height: u16,
    rows: Vec<Vec<Cell>>,
    column: u16,
    row: u16,
    foreground: Option<Color>,
    background: Option<Color>,
    cursor_visible: bool,
    keys: VecDeque<KeyEvent>,
    lines: VecDeque<String>,
    transcript: String,
    touched: BTreeSet<u16>,
}

impl MemorySurface {
    /// A blank grid with the cursor at the top-left corner.
    pub fn new(width: u16, height: u16) -> Self {
        MemorySurface {
            width,
            height,
            rows: vec![vec![Cell::default(); usize::from(width)]; usize::from(height)],
            column: 0,
            row: 0,
            foreground: None,
            background: None,
            cursor_visible: true,
            keys: VecDeque::new(),
            lines: VecDeque::new(),
            transcript: String::new(),
            touched: BTreeSet::new(),
        }
    }

    /// Queue key presses for [`Surface::read_key`], in order.
    pub fn push_keys(&mut self, keys: impl IntoIterator<Item = KeyEvent>) {
        self.keys.extend(keys);
    }

    /// Queue a bare key code (no modifiers).
    pub fn push_key(&mut self, code: KeyCode) {
        self.keys.push_back(KeyEvent::new(code, KeyModifiers::NONE));
    }

    /// Queue every character of `text` as a separate key press.
    pub fn push_chars(&mut self, text: &str) {
        for c in text.chars() {
            self.push_key(KeyCode::Char(c));
        }
    }

    /// Queue a line for [`Surface::read_line`].
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
    }

    /// Keys queued but not yet read.
    pub fn pending_keys(&self) -> usize {
        self.keys.len()
    }

    /// Text of a row with trailing blanks removed.
    pub fn row_text(&self, row: u16) -> String {
        self.rows
            .get(usize::from(row))
            .map(|cells| cells.iter().map(|c| c.ch).collect::<String>())
            .unwrap_or_default()
            .trim_end()
            .to_string()
    }

    pub fn cell(&self, column: u16, row: u16) -> Cell {
        self.rows
            .get(usize::from(row))
            .and_then(|cells| cells.get(usize::from(column)))
            .copied()
            .unwrap_or_default()
    }

    pub fn cursor(&self) -> (u16, u16) {
        (self.column, self.row)
    }

    pub fn is_cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Every character written since creation, in order.
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// How many times `ch` has been written, overwrites included.
    pub fn count_written(&self, ch: char) -> usize {
        self.transcript.chars().filter(|&c| c == ch).count()
    }

    /// Rows written to or cleared since the last reset.
    pub fn touched_rows(&self) -> &BTreeSet<u16> {
        &self.touched
    }

    pub fn reset_touched(&mut self) {
        self.touched.clear();
    }

    fn line_break(&mut self) {
        self.column = 0;
        if self.row + 1 < self.height {
            self.row += 1;
        } else if self.height > 0 {
            self.rows.remove(0);
            self.rows.push(vec![Cell::default(); usize::from(self.width)]);
        }
    }

    fn put(&mut self, ch: char) {
        self.transcript.push(ch);
        match ch {
            '\n' => self.line_break(),
            '\r' => self.column = 0,
            '\t' => {
                let next = (self.column / TAB_STOP + 1) * TAB_STOP;
                self.column = next.min(self.width.saturating_sub(1));
            }
            _ => {
                if self.column >= self.width {
                    self.line_break();
                }
                if let Some(cell) = self
                    .rows
                    .get_mut(usize::from(self.row))
                    .and_then(|cells| cells.get_mut(usize::from(self.column)))
                {
                    *cell = Cell {
                        ch,
                        foreground: self.foreground,
                        background: self.background,
                    };
                }
                self.touched.insert(self.row);
                self.column += 1;
            }
        }
    }
}

fn exhausted(what: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::UnexpectedEof,
        format!("no scripted {what} left"),
    )
}

impl Surface for MemorySurface {
    fn move_cursor(&mut self, column: u16, row: u16) -> io::Result<()> {
        self.column = column.min(self.width.saturating_sub(1));
        self.row = row.min(self.height.saturating_sub(1));
        Ok(())
    }

    fn set_foreground(&mut self, color: Color) -> io::Result<()> {
        self.foreground = Some(color);
        Ok(())
    }

    fn set_background(&mut self, color: Color) -> io::Result<()> {
        self.background = Some(color);
        Ok(())
    }

    fn reset_colors(&mut self) -> io::Result<()> {
        self.foreground = None;
        self.background = None;
        Ok(())
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        text.chars().for_each(|c| self.put(c));
        Ok(())
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.write(text)?;
        self.put('\n');
        Ok(())
    }

    fn clear_line(&mut self, row: u16) -> io::Result<()> {
        if let Some(cells) = self.rows.get_mut(usize::from(row)) {
            cells.fill(Cell::default());
            self.touched.insert(row);
        }
        self.move_cursor(0, row)
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        self.cursor_visible = visible;
        Ok(())
    }

    /// Pops the next scripted key. An empty script is an `UnexpectedEof`
    /// error rather than a hang; a scripted Ctrl+C is `Interrupted`, as on
    /// the real terminal.
    fn read_key(&mut self, hide_echo: bool) -> io::Result<KeyEvent> {
        let key = self.keys.pop_front().ok_or_else(|| exhausted("keys"))?;
        let key = check_interrupt(key)?;
        if !hide_echo {
            if let KeyCode::Char(c) = key.code {
                self.put(c);
            }
        }
        Ok(key)
    }

    fn read_line(&mut self) -> io::Result<String> {
        let line = self.lines.pop_front().ok_or_else(|| exhausted("lines"))?;
        // Echo like a cooked-mode terminal
        self.write_line(&line)?;
        Ok(line)
    }

    fn width(&mut self) -> io::Result<u16> {
        Ok(self.width)
    }

    fn cursor_row(&mut self) -> io::Result<u16> {
        Ok(self.row)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
