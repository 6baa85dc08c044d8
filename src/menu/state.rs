//! Menu state algebra: pure types, zero effects.
//!
//! A menu's navigation is a small state machine over the selected index.
//! Keys are mapped to [`Action`]s, and the transition function turns
//! (index, action) into a [`Transition`] that the drawing layer acts on.

use crate::surface::TAB_STOP;
use crate::types::HighlightStyle;

// ============================================================================
// MODES
// ============================================================================

/// How a menu is drawn and driven.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuMode {
    /// Options prefixed `"N: "`, chosen by pressing a digit key.
    Numbered,
    /// One option drawn as a highlight bar, moved with the arrow keys.
    Highlighted(Highlight),
}

/// Mode data for a highlighted menu, resolved at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub style: HighlightStyle,
    /// Columns the highlight bar covers, lead spaces included.
    pub width: u16,
}

/// Where a menu sits on screen, fixed by its first render.
///
/// Every option occupies exactly one row; the prompt may wrap over
/// several.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Row option 0 is drawn on.
    pub origin: u16,
    /// Rows the prompt took above the options.
    pub prompt_rows: u16,
    /// Terminal width the menu was laid out for.
    pub columns: u16,
}

impl Region {
    /// First row of the prompt.
    pub fn top(&self) -> u16 {
        self.origin.saturating_sub(self.prompt_rows)
    }

    /// Columns an option row has after the leading tab.
    pub fn room(&self) -> u16 {
        option_room(self.columns)
    }

    /// Characters the prompt can show without leaving its rows.
    pub fn prompt_capacity(&self) -> usize {
        usize::from(self.prompt_rows) * usize::from(self.columns)
    }
}

/// Columns left on a row of a `columns`-wide terminal after the tab stop.
pub fn option_room(columns: u16) -> u16 {
    columns.saturating_sub(TAB_STOP)
}

/// Rows `text` fills when written from column 0 of a `columns`-wide terminal.
///
/// Text that exactly fills its last row does not spill onto another.
pub fn rows_for(text: &str, columns: u16) -> u16 {
    let len = text.chars().count();
    let columns = usize::from(columns.max(1));
    u16::try_from(len.div_ceil(columns).max(1)).unwrap_or(u16::MAX)
}

impl MenuMode {
    pub fn is_numbered(&self) -> bool {
        matches!(self, MenuMode::Numbered)
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Direction of a cursor move. Both directions wrap around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Semantic input, decoupled from raw key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(Direction),
    /// A digit key `1..=9`, carrying its value.
    Digit(u8),
    /// Accept the current selection.
    Confirm,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing changes. Out-of-range digits land here.
    Stay,
    /// The selection moved; both rows need repainting.
    Move { from: usize, to: usize },
    /// Terminal state: the option at this index was chosen.
    Select(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_mode_is_recognised() {
        assert!(MenuMode::Numbered.is_numbered());
        let highlighted = MenuMode::Highlighted(Highlight {
            style: HighlightStyle::default(),
            width: 54,
        });
        assert!(!highlighted.is_numbered());
    }

    #[test]
    fn prompt_rows_count_wrapped_lines() {
        assert_eq!(rows_for("", 40), 1);
        assert_eq!(rows_for("Pick one", 40), 1);
        assert_eq!(rows_for(&"p".repeat(40), 40), 1);
        assert_eq!(rows_for(&"p".repeat(41), 40), 2);
        assert_eq!(rows_for(&"p".repeat(90), 40), 3);
    }

    #[test]
    fn region_measures_from_the_prompt_top() {
        let region = Region {
            origin: 5,
            prompt_rows: 2,
            columns: 40,
        };
        assert_eq!(region.top(), 3);
        assert_eq!(region.room(), 32);
        assert_eq!(region.prompt_capacity(), 80);
    }

    #[test]
    fn transitions_are_distinguishable() {
        assert_ne!(Transition::Stay, Transition::Select(0));
        assert_ne!(
            Transition::Move { from: 0, to: 1 },
            Transition::Move { from: 1, to: 0 }
        );
    }
}
