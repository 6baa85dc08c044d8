//! Colour constants.
//!
//! The highlighted menu row is drawn in inverted-looking colours: dark
//! text on a light bar. Everything else uses the terminal's defaults.

use crossterm::style::Color;

/// Text colour of the highlighted menu row.
pub const HIGHLIGHT_FOREGROUND: Color = Color::Black;

/// Bar colour of the highlighted menu row.
pub const HIGHLIGHT_BACKGROUND: Color = Color::White;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_colours_contrast() {
        assert_ne!(HIGHLIGHT_FOREGROUND, HIGHLIGHT_BACKGROUND);
    }
}
