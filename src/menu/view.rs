//! Menu drawing: full renders, two-row repaints, region clears.
//!
//! Rows are addressed through the menu's [`Region`]: options sit one per
//! row from the origin line down, the prompt fills the rows just above.
//! Option text is cut to the room left after the tab stop so that no
//! option ever wraps onto a second row.

use crate::error::Result;
use crate::surface::Surface;

use super::state::{option_room, rows_for, Highlight, MenuMode, Region};

/// Lead between the tab stop and a highlighted menu's label.
const LEAD: &str = "  ";

/// `text` cut or space-padded to exactly `width` columns.
fn pad(text: &str, width: u16) -> String {
    format!("{text:<width$.width$}", width = usize::from(width))
}

/// `text` cut to at most `width` columns.
fn fit(text: &str, width: u16) -> String {
    format!("{text:.width$}", width = usize::from(width))
}

/// An unselected option row after the leading tab.
fn plain_text(mode: &MenuMode, room: u16, index: usize, label: &str) -> String {
    match mode {
        MenuMode::Numbered => fit(&format!("{}: {label}", index + 1), room),
        MenuMode::Highlighted(highlight) => pad(&format!("{LEAD}{label}"), highlight.width),
    }
}

/// Write the highlight bar for `label` at the cursor, leaving colours reset.
fn write_highlighted<S: Surface>(surface: &mut S, label: &str, highlight: &Highlight) -> Result<()> {
    surface.write("\t")?;
    surface.set_background(highlight.style.background)?;
    surface.set_foreground(highlight.style.foreground)?;
    surface.write(&pad(&format!("{LEAD}{label}"), highlight.width))?;
    surface.reset_colors()?;
    Ok(())
}

/// Write option `index` at the cursor, highlighted if it is `selected`.
fn write_option<S: Surface>(
    surface: &mut S,
    mode: &MenuMode,
    room: u16,
    options: &[String],
    index: usize,
    selected: usize,
) -> Result<()> {
    match mode {
        MenuMode::Highlighted(highlight) if index == selected => {
            write_highlighted(surface, &options[index], highlight)
        }
        _ => {
            surface.write(&format!("\t{}", plain_text(mode, room, index, &options[index])))?;
            Ok(())
        }
    }
}

/// First render, flowing down from the cursor with line breaks.
///
/// Line breaks (rather than absolute moves) let the terminal scroll when
/// the menu starts near the bottom. The cursor row is sampled before
/// drawing; the origin line is that row plus the prompt's rows, less
/// whatever the terminal scrolled by on the way.
pub fn render_initial<S: Surface>(
    surface: &mut S,
    columns: u16,
    prompt: &str,
    options: &[String],
    mode: &MenuMode,
    selected: usize,
) -> Result<Region> {
    let start = surface.cursor_row()?;
    let prompt_rows = rows_for(prompt, columns);
    let room = option_room(columns);

    surface.write_line(prompt)?;
    for i in 0..options.len() {
        write_option(surface, mode, room, options, i, selected)?;
        surface.write_line("")?;
    }
    surface.flush()?;

    let drawn = prompt_rows.saturating_add(row_offset(options.len()));
    let end = surface.cursor_row()?;
    let scrolled = start.saturating_add(drawn).saturating_sub(end);
    Ok(Region {
        origin: start.saturating_add(prompt_rows).saturating_sub(scrolled),
        prompt_rows,
        columns,
    })
}

/// Redraw prompt and every option in place.
///
/// The prompt keeps the rows it had at the first render; a longer one is
/// cut to fit them.
pub fn render_in_place<S: Surface>(
    surface: &mut S,
    region: &Region,
    prompt: &str,
    options: &[String],
    mode: &MenuMode,
    selected: usize,
) -> Result<()> {
    for row in region.top()..region.origin {
        surface.clear_line(row)?;
    }
    surface.move_cursor(0, region.top())?;
    let shown: String = prompt.chars().take(region.prompt_capacity()).collect();
    surface.write(&shown)?;

    for i in 0..options.len() {
        surface.clear_line(option_row(region.origin, i))?;
        write_option(surface, mode, region.room(), options, i, selected)?;
    }
    surface.flush()?;
    Ok(())
}

/// Move the highlight from one row to another, touching only those two rows.
///
/// The old row is rewritten plain and padded to the highlight width so
/// no part of the bar survives.
pub fn repaint_selection<S: Surface>(
    surface: &mut S,
    region: &Region,
    options: &[String],
    highlight: &Highlight,
    from: usize,
    to: usize,
) -> Result<()> {
    surface.move_cursor(0, option_row(region.origin, from))?;
    surface.write("\t")?;
    surface.write(&pad(&format!("{LEAD}{}", options[from]), highlight.width))?;

    surface.move_cursor(0, option_row(region.origin, to))?;
    write_highlighted(surface, &options[to], highlight)?;

    surface.flush()?;
    Ok(())
}

/// Blank the prompt rows and every option row, parking the cursor where
/// the prompt began.
pub fn clear_region<S: Surface>(surface: &mut S, region: &Region, len: usize) -> Result<()> {
    for row in region.top()..option_row(region.origin, len) {
        surface.clear_line(row)?;
    }
    surface.move_cursor(0, region.top())?;
    surface.flush()?;
    Ok(())
}

fn row_offset(index: usize) -> u16 {
    u16::try_from(index).unwrap_or(u16::MAX)
}

/// Terminal row of option `index`.
pub fn option_row(origin: u16, index: usize) -> u16 {
    origin.saturating_add(row_offset(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_cuts_and_fills_to_width() {
        assert_eq!(pad("  Beta", 8), "  Beta  ");
        assert_eq!(pad("  Alphabet", 6), "  Alph");
    }

    #[test]
    fn numbered_rows_are_cut_to_the_room() {
        let label = "a long label";
        assert_eq!(plain_text(&MenuMode::Numbered, 8, 0, label), "1: a lon");
        assert_eq!(plain_text(&MenuMode::Numbered, 40, 2, label), "3: a long label");
    }
}
