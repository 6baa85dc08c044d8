//! Shared value types: construction parameters and results.

use crossterm::style::Color;
use serde::{Deserialize, Serialize};

use crate::theme;

// ============================================================================
// RESULTS
// ============================================================================

/// The option a user picked: zero-based index and its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub index: usize,
    pub label: String,
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Look and behaviour of a highlighted menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightStyle {
    /// Highlight bar width before the trailing margin is added. Grows to
    /// the longest label when a label is longer.
    pub min_width: u16,
    /// Columns appended after the widest of `min_width` and the longest label.
    pub trail: u16,
    pub foreground: Color,
    pub background: Color,
    /// Erase the menu once a selection is made.
    pub clear_after_selection: bool,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            min_width: 50,
            trail: 4,
            foreground: theme::HIGHLIGHT_FOREGROUND,
            background: theme::HIGHLIGHT_BACKGROUND,
            clear_after_selection: true,
        }
    }
}

/// Glyphs a progress bar is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarStyle {
    pub fill: char,
    pub left: char,
    pub right: char,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            fill: '=',
            left: '[',
            right: ']',
        }
    }
}

/// Output format for reporting a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable sentence.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}
