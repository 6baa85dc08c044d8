//! Selection menus drawn directly onto the terminal grid.
//!
//! Organised like the rest of the crate's interactive code:
//! - `state`: pure types (MenuMode, Action, Transition)
//! - `update`: pure key mapping and transitions
//! - `view`: drawing through a [`Surface`]
//!
//! [`Menu`] ties them together. A numbered menu is redrawn only when asked;
//! a highlighted menu repaints exactly two rows per move, however many
//! options it has.

pub mod state;
pub mod update;
pub mod view;

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::surface::Surface;
use crate::types::{HighlightStyle, Selection};

use self::state::{option_room, Action, Direction, Highlight, MenuMode, Region, Transition};

/// Digit keys `1`-`9` are the only choices a numbered menu has.
pub const MAX_NUMBERED_OPTIONS: usize = 9;

/// A prompt with a fixed list of options and a selection cursor.
#[derive(Debug)]
pub struct Menu {
    prompt: String,
    options: Vec<String>,
    selected: usize,
    region: Region,
    mode: MenuMode,
}

impl Menu {
    /// Draw a numbered menu at the cursor.
    ///
    /// # Errors
    /// `Configuration` for an empty list or more than nine options.
    pub fn numbered<S, I, T>(surface: &mut S, prompt: impl Into<String>, options: I) -> Result<Self>
    where
        S: Surface,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let options = collect_options(options)?;
        if options.len() > MAX_NUMBERED_OPTIONS {
            return Err(Error::Configuration(format!(
                "numbered menus support at most {MAX_NUMBERED_OPTIONS} options, got {}",
                options.len()
            )));
        }
        let columns = surface.width()?;
        Menu::create(surface, columns, prompt.into(), options, MenuMode::Numbered)
    }

    /// Draw a highlighted menu at the cursor with the default style.
    pub fn highlighted<S, I, T>(surface: &mut S, prompt: impl Into<String>, options: I) -> Result<Self>
    where
        S: Surface,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Menu::highlighted_with_style(surface, prompt, options, HighlightStyle::default())
    }

    /// Draw a highlighted menu at the cursor.
    ///
    /// The terminal width is sampled once here to size the highlight bar.
    ///
    /// # Errors
    /// `Configuration` for an empty list.
    pub fn highlighted_with_style<S, I, T>(
        surface: &mut S,
        prompt: impl Into<String>,
        options: I,
        style: HighlightStyle,
    ) -> Result<Self>
    where
        S: Surface,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let options = collect_options(options)?;
        let columns = surface.width()?;
        let width = highlight_width(&options, &style, columns);
        Menu::create(
            surface,
            columns,
            prompt.into(),
            options,
            MenuMode::Highlighted(Highlight { style, width }),
        )
    }

    fn create<S: Surface>(
        surface: &mut S,
        columns: u16,
        prompt: String,
        options: Vec<String>,
        mode: MenuMode,
    ) -> Result<Self> {
        surface.set_cursor_visible(false)?;
        let region = view::render_initial(surface, columns, &prompt, &options, &mode, 0)?;
        debug!(
            "menu drawn at row {} under a {}-row prompt: {} options, numbered={}",
            region.origin,
            region.prompt_rows,
            options.len(),
            mode.is_numbered()
        );
        Ok(Menu {
            prompt,
            options,
            selected: 0,
            region,
            mode,
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Replace the prompt. Shown on the next [`Menu::display`], within the
    /// rows the first prompt took; anything longer is cut off.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Row option 0 is drawn on.
    pub fn origin(&self) -> u16 {
        self.region.origin
    }

    /// Rows the menu occupies, fixed at the first render.
    pub fn region(&self) -> Region {
        self.region
    }

    pub fn mode(&self) -> &MenuMode {
        &self.mode
    }

    /// Redraw the whole menu in place.
    pub fn display<S: Surface>(&self, surface: &mut S) -> Result<()> {
        view::render_in_place(
            surface,
            &self.region,
            &self.prompt,
            &self.options,
            &self.mode,
            self.selected,
        )
    }

    /// Move the selection one step, wrapping at either end.
    ///
    /// A highlighted menu repaints the old and new rows; a numbered menu
    /// has nothing to show for it. Returns the new index.
    pub fn move_selection<S: Surface>(&mut self, surface: &mut S, direction: Direction) -> Result<usize> {
        if let Transition::Move { from, to } =
            update::update(self.selected, self.options.len(), Action::Move(direction))
        {
            self.apply_move(surface, from, to)?;
        }
        Ok(self.selected)
    }

    /// Block on key presses until an option is chosen.
    ///
    /// Keys that mean nothing in this mode are dropped silently. There is
    /// no timeout: without input this waits forever. On return the cursor
    /// is visible again and, for numbered menus or when the style asks
    /// for it, the menu is erased.
    ///
    /// # Errors
    /// `Io` from the surface; Ctrl+C arrives as an `Interrupted` one
    /// (see [`Error::is_interrupted`]) and leaves the menu on screen.
    pub fn get_selection<S: Surface>(&mut self, surface: &mut S) -> Result<Selection> {
        loop {
            let key = surface.read_key(true)?;
            let Some(action) = update::map_key(&self.mode, key) else {
                trace!("ignored key {:?}", key.code);
                continue;
            };

            match update::update(self.selected, self.options.len(), action) {
                Transition::Stay => trace!("no transition for {action:?}"),
                Transition::Move { from, to } => self.apply_move(surface, from, to)?,
                Transition::Select(index) => {
                    self.selected = index;
                    return self.finish(surface);
                }
            }
        }
    }

    fn apply_move<S: Surface>(&mut self, surface: &mut S, from: usize, to: usize) -> Result<()> {
        if let MenuMode::Highlighted(highlight) = &self.mode {
            view::repaint_selection(surface, &self.region, &self.options, highlight, from, to)?;
        }
        self.selected = to;
        Ok(())
    }

    fn finish<S: Surface>(&self, surface: &mut S) -> Result<Selection> {
        let clear = match &self.mode {
            MenuMode::Numbered => true,
            MenuMode::Highlighted(highlight) => highlight.style.clear_after_selection,
        };
        if clear {
            view::clear_region(surface, &self.region, self.options.len())?;
        } else {
            // Leave the menu on screen and continue below it
            surface.move_cursor(0, view::option_row(self.region.origin, self.options.len()))?;
        }
        surface.set_cursor_visible(true)?;
        surface.flush()?;

        let selection = Selection {
            index: self.selected,
            label: self.options[self.selected].clone(),
        };
        debug!("selected option {} ({})", selection.index, selection.label);
        Ok(selection)
    }
}

fn collect_options<I, T>(options: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let options: Vec<String> = options.into_iter().map(Into::into).collect();
    if options.is_empty() {
        return Err(Error::Configuration("a menu needs at least one option".into()));
    }
    Ok(options)
}

/// Highlight bar width for these options on a terminal this wide.
///
/// Starts from the wider of `min_width` and the longest label, adds the
/// trailing margin, then shrinks to the room left after the tab stop so
/// the bar never wraps. Labels too long for the bar are cut when drawn.
pub fn highlight_width(options: &[String], style: &HighlightStyle, terminal_width: u16) -> u16 {
    let longest = options
        .iter()
        .map(|o| o.chars().count())
        .max()
        .unwrap_or(0);
    let longest = u16::try_from(longest).unwrap_or(u16::MAX);

    let wanted = style.min_width.max(longest).saturating_add(style.trail);
    wanted.min(option_room(terminal_width))
}

// ============================================================================
// TESTS
// ============================================================================
