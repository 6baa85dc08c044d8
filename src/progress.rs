//! Single-row progress bars with incremental redraw.
//!
//! Layout on a terminal `W` columns wide, with `A = W - 7` fill cells:
//!
//! ```text
//! col 0      1 ..= A        A+1  A+2  A+3 ..
//!     [      ==========      ]   ' '  42%
//! ```
//!
//! Each update writes the new percentage and only the fill cells that
//! became due since the last update. Fill counts are always derived from
//! the absolute progress value, never accumulated from deltas, so the
//! number of cells written after any non-decreasing sequence of updates
//! is exactly `floor(progress * A / 100)`.

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::surface::Surface;
use crate::types::BarStyle;

/// Columns reserved for the braces, a space and the widest percentage: `"[] 100%"`.
pub const RESERVED_COLUMNS: u16 = 7;

/// Progress at which a bar counts as finished. Below 100 so integer
/// rounding at the boundary still lets a bar complete.
pub const DONE_THRESHOLD: u8 = 99;

const MAX_PROGRESS: u8 = 100;

// ============================================================================
// GEOMETRY
// ============================================================================

/// Column arithmetic for a bar, fixed by the terminal width at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarGeometry {
    available: u16,
}

impl BarGeometry {
    /// # Errors
    /// `Configuration` when the terminal has no room for a single fill cell.
    pub fn for_width(terminal_width: u16) -> Result<Self> {
        match terminal_width.checked_sub(RESERVED_COLUMNS) {
            Some(available) if available > 0 => Ok(BarGeometry { available }),
            _ => Err(Error::Configuration(format!(
                "terminal is {terminal_width} columns wide; a progress bar needs at least {}",
                RESERVED_COLUMNS + 1
            ))),
        }
    }

    /// Number of fill cells between the braces.
    pub fn available(&self) -> u16 {
        self.available
    }

    /// Progress points one fill cell stands for.
    pub fn char_worth(&self) -> f64 {
        100.0 / f64::from(self.available)
    }

    /// Fill cells due at `progress`: `floor(progress / char_worth)`,
    /// computed in integers.
    pub fn filled(&self, progress: u8) -> u16 {
        let cells = u32::from(progress.min(MAX_PROGRESS)) * u32::from(self.available) / 100;
        // progress ≤ 100 keeps cells ≤ available
        u16::try_from(cells).unwrap_or(self.available)
    }

    pub fn right_brace_column(&self) -> u16 {
        self.available + 1
    }

    /// Column the percentage digits start at (after the brace and a space).
    pub fn percent_column(&self) -> u16 {
        self.available + 3
    }
}

// ============================================================================
// INDICATOR
// ============================================================================

/// A progress bar pinned to one terminal row.
///
/// Bars sharing a terminal must sit on distinct rows; nothing checks this.
#[derive(Debug)]
pub struct ProgressIndicator {
    row: u16,
    progress: u8,
    filled: u16,
    geometry: BarGeometry,
    style: BarStyle,
    done: bool,
}

fn clamp_progress(value: i32) -> u8 {
    u8::try_from(value.clamp(0, i32::from(MAX_PROGRESS))).unwrap_or(MAX_PROGRESS)
}

impl ProgressIndicator {
    /// Draw a bar with the default glyphs on `row`.
    pub fn new<S: Surface>(surface: &mut S, initial: i32, row: u16) -> Result<Self> {
        ProgressIndicator::with_style(surface, initial, row, BarStyle::default())
    }

    /// Draw a bar on `row`. The terminal width is sampled once, here.
    ///
    /// Values above 100 are treated as 100.
    ///
    /// # Errors
    /// `InvalidArgument` for negative `initial`; `Configuration` when the
    /// terminal is too narrow.
    pub fn with_style<S: Surface>(
        surface: &mut S,
        initial: i32,
        row: u16,
        style: BarStyle,
    ) -> Result<Self> {
        if initial < 0 {
            return Err(Error::InvalidArgument(format!(
                "initial progress cannot be negative, got {initial}"
            )));
        }
        let geometry = BarGeometry::for_width(surface.width()?)?;
        let progress = clamp_progress(initial);
        let done = progress >= DONE_THRESHOLD;
        let filled = if done {
            geometry.available()
        } else {
            geometry.filled(progress)
        };

        let bar = ProgressIndicator {
            row,
            progress,
            filled,
            geometry,
            style,
            done,
        };
        bar.render(surface)?;
        debug!(
            "progress bar on row {row}: {} cells, starting at {progress}%",
            geometry.available()
        );
        Ok(bar)
    }

    fn render<S: Surface>(&self, surface: &mut S) -> Result<()> {
        surface.move_cursor(0, self.row)?;
        surface.write(&self.style.left.to_string())?;
        surface.write(&self.fill(self.filled))?;
        surface.move_cursor(self.geometry.right_brace_column(), self.row)?;
        surface.write(&format!("{} {}%", self.style.right, self.progress))?;
        surface.flush()?;
        Ok(())
    }

    fn fill(&self, cells: u16) -> String {
        self.style.fill.to_string().repeat(usize::from(cells))
    }

    /// Advance the bar to `value`.
    ///
    /// Once the bar is done every call is a no-op, whatever the value.
    /// Leaves the shared cursor on the bar's row.
    ///
    /// # Errors
    /// `InvalidArgument` if `value` is below the current progress; nothing
    /// is drawn and the state is unchanged.
    pub fn set_progress<S: Surface>(&mut self, surface: &mut S, value: i32) -> Result<()> {
        if self.done {
            trace!("row {}: already done, ignoring {value}", self.row);
            return Ok(());
        }
        if value < i32::from(self.progress) {
            return Err(Error::InvalidArgument(format!(
                "progress cannot decrease: currently {}, asked for {value}",
                self.progress
            )));
        }
        let value = clamp_progress(value);

        if value >= DONE_THRESHOLD {
            let remaining = self.geometry.available() - self.filled;
            surface.move_cursor(self.filled + 1, self.row)?;
            surface.write(&self.fill(remaining))?;
            surface.move_cursor(self.geometry.right_brace_column(), self.row)?;
            surface.write(&format!("{} {value}%", self.style.right))?;
            surface.flush()?;

            self.filled = self.geometry.available();
            self.progress = value;
            self.done = true;
            debug!("row {}: finished at {value}%", self.row);
            return Ok(());
        }

        surface.move_cursor(self.geometry.percent_column(), self.row)?;
        surface.write(&format!("{value}%"))?;

        let due = self.geometry.filled(value);
        if due > self.filled {
            surface.move_cursor(self.filled + 1, self.row)?;
            surface.write(&self.fill(due - self.filled))?;
        }
        surface.flush()?;

        self.filled = due;
        self.progress = value;
        Ok(())
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Fill cells currently drawn.
    pub fn filled_count(&self) -> u16 {
        self.filled
    }

    pub fn row(&self) -> u16 {
        self.row
    }

    pub fn geometry(&self) -> BarGeometry {
        self.geometry
    }

    pub fn style(&self) -> BarStyle {
        self.style
    }

    /// Glyph for cells filled from now on. Cells already drawn keep theirs.
    pub fn set_fill(&mut self, fill: char) {
        self.style.fill = fill;
    }

    /// Braces used by future redraws of the brace positions.
    pub fn set_braces(&mut self, left: char, right: char) {
        self.style.left = left;
        self.style.right = right;
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{MemorySurface, SharedSurface};
    use rayon::prelude::*;

    /// 87 columns leaves 80 fill cells: one cell per 1.25%.
    const WIDTH: u16 = 87;

    fn surface() -> MemorySurface {
        MemorySurface::new(WIDTH, 10)
    }

    fn fill_cells(surface: &MemorySurface, row: u16) -> usize {
        surface.row_text(row).chars().filter(|&c| c == '=').count()
    }

    #[test]
    fn geometry_reserves_braces_and_percentage() {
        let g = BarGeometry::for_width(WIDTH).unwrap();
        assert_eq!(g.available(), 80);
        assert!((g.char_worth() - 1.25).abs() < f64::EPSILON);
        assert_eq!(g.right_brace_column(), 81);
        assert_eq!(g.percent_column(), 83);
    }

    #[test]
    fn geometry_filled_matches_floor_of_char_worth() {
        for width in [8u16, 20, 47, 80, 87, 133, 250] {
            let g = BarGeometry::for_width(width).unwrap();
            for p in 0..=100u8 {
                let expected = (f64::from(p) * f64::from(g.available()) / 100.0).floor() as u16;
                assert_eq!(g.filled(p), expected, "width {width}, progress {p}");
            }
        }
    }

    #[test]
    fn narrow_terminal_is_a_configuration_error() {
        assert!(matches!(BarGeometry::for_width(7), Err(Error::Configuration(_))));
        assert!(matches!(BarGeometry::for_width(0), Err(Error::Configuration(_))));
        assert_eq!(BarGeometry::for_width(8).unwrap().available(), 1);
    }

    #[test]
    fn negative_initial_progress_is_rejected() {
        let mut s = surface();
        let err = ProgressIndicator::new(&mut s, -1, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(s.transcript(), "");
    }

    #[test]
    fn initial_render_draws_braces_and_percentage() {
        let mut s = surface();
        let bar = ProgressIndicator::new(&mut s, 10, 3).unwrap();
        let expected = format!("[{}{}] 10%", "=".repeat(8), " ".repeat(72));
        assert_eq!(s.row_text(3), expected);
        assert_eq!(bar.filled_count(), 8);
        assert!(!bar.is_done());
    }

    #[test]
    fn fifty_then_hundred_on_eighty_cells() {
        let mut s = surface();
        let mut bar = ProgressIndicator::new(&mut s, 0, 2).unwrap();

        bar.set_progress(&mut s, 50).unwrap();
        assert_eq!(bar.filled_count(), 40);
        assert_eq!(
            s.row_text(2),
            format!("[{}{}] 50%", "=".repeat(40), " ".repeat(40))
        );

        bar.set_progress(&mut s, 100).unwrap();
        assert_eq!(bar.filled_count(), 80);
        assert!(bar.is_done());
        assert_eq!(s.row_text(2), format!("[{}] 100%", "=".repeat(80)));
    }

    #[test]
    fn cumulative_fill_is_independent_of_step_sizes() {
        let sequences: [&[i32]; 6] = [
            &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13],
            &[33, 66, 98],
            &[7, 7, 13, 50, 97],
            &[1, 98],
            &[5, 10, 15, 20, 25, 30, 35, 40, 45, 50, 55, 60, 65, 70, 75, 80, 85, 90, 95],
            &[3, 3, 3, 64],
        ];
        for width in [20u16, 87, 101] {
            for sequence in sequences {
                let mut s = MemorySurface::new(width, 2);
                let mut bar = ProgressIndicator::new(&mut s, 0, 0).unwrap();
                for &p in sequence {
                    bar.set_progress(&mut s, p).unwrap();
                }
                let last = u8::try_from(*sequence.last().unwrap()).unwrap();
                let expected = bar.geometry().filled(last);
                assert_eq!(s.count_written('='), usize::from(expected), "{sequence:?} at {width}");
                assert_eq!(fill_cells(&s, 0), usize::from(expected));
            }
        }
    }

    #[test]
    fn finishing_fills_exactly_the_available_cells() {
        for start in [0, 1, 40, 98] {
            let mut s = surface();
            let mut bar = ProgressIndicator::new(&mut s, start, 0).unwrap();
            bar.set_progress(&mut s, 100).unwrap();
            assert_eq!(s.count_written('='), 80, "starting at {start}");
        }
    }

    #[test]
    fn decreasing_progress_fails_and_changes_nothing() {
        let mut s = surface();
        let mut bar = ProgressIndicator::new(&mut s, 0, 1).unwrap();
        bar.set_progress(&mut s, 50).unwrap();
        let before = s.transcript().to_string();

        let err = bar.set_progress(&mut s, 30).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(bar.progress(), 50);
        assert_eq!(bar.filled_count(), 40);
        assert_eq!(s.transcript(), before);
    }

    #[test]
    fn ninety_nine_counts_as_done() {
        let mut s = surface();
        let mut bar = ProgressIndicator::new(&mut s, 0, 0).unwrap();
        bar.set_progress(&mut s, 98).unwrap();
        assert!(!bar.is_done());
        bar.set_progress(&mut s, 99).unwrap();
        assert!(bar.is_done());
        assert_eq!(bar.filled_count(), 80);
        assert_eq!(s.row_text(0), format!("[{}] 99%", "=".repeat(80)));
    }

    #[test]
    fn updates_after_done_are_noops() {
        let mut s = surface();
        let mut bar = ProgressIndicator::new(&mut s, 0, 0).unwrap();
        bar.set_progress(&mut s, 100).unwrap();
        let before = s.transcript().to_string();

        bar.set_progress(&mut s, 100).unwrap();
        bar.set_progress(&mut s, 20).unwrap();
        assert!(bar.is_done());
        assert_eq!(bar.progress(), 100);
        assert_eq!(s.transcript(), before);
    }

    #[test]
    fn values_above_hundred_are_clamped() {
        let mut s = surface();
        let mut bar = ProgressIndicator::new(&mut s, 0, 0).unwrap();
        bar.set_progress(&mut s, 250).unwrap();
        assert_eq!(bar.progress(), 100);
        assert!(s.row_text(0).ends_with("] 100%"));
    }

    #[test]
    fn starting_at_done_draws_a_full_bar() {
        let mut s = surface();
        let bar = ProgressIndicator::new(&mut s, 100, 0).unwrap();
        assert!(bar.is_done());
        assert_eq!(s.row_text(0), format!("[{}] 100%", "=".repeat(80)));
    }

    #[test]
    fn custom_glyphs_apply_to_new_writes() {
        let mut s = surface();
        let style = BarStyle {
            fill: '#',
            left: '<',
            right: '>',
        };
        let mut bar = ProgressIndicator::with_style(&mut s, 0, 0, style).unwrap();
        bar.set_progress(&mut s, 10).unwrap();
        bar.set_fill('*');
        bar.set_progress(&mut s, 20).unwrap();

        let row = s.row_text(0);
        assert!(row.starts_with(&format!("<{}{}", "#".repeat(8), "*".repeat(8))));
        assert!(row.ends_with("> 20%"));
    }

    #[test]
    fn set_braces_changes_the_finishing_brace() {
        let mut s = surface();
        let mut bar = ProgressIndicator::new(&mut s, 0, 0).unwrap();
        bar.set_braces('(', ')');
        bar.set_progress(&mut s, 100).unwrap();
        assert!(s.row_text(0).starts_with('['));
        assert!(s.row_text(0).ends_with(") 100%"));
    }

    #[test]
    fn round_robin_bars_stay_on_their_rows() {
        let mut s = surface();
        let mut bars: Vec<_> = (0..3)
            .map(|row| ProgressIndicator::new(&mut s, 0, row).unwrap())
            .collect();
        for step in 1..=10 {
            for (i, bar) in bars.iter_mut().enumerate() {
                let value = i32::try_from(step * (i + 1) * 4).unwrap();
                bar.set_progress(&mut s, value).unwrap();
            }
        }
        assert_eq!(fill_cells(&s, 0), 32);
        assert_eq!(fill_cells(&s, 1), 64);
        assert_eq!(fill_cells(&s, 2), 80);
        assert!(bars[2].is_done());
        assert!(s.row_text(0).ends_with("] 40%"));
        assert!(s.row_text(1).ends_with("] 80%"));
        assert!(s.row_text(2).ends_with("] 100%"));
    }

    #[test]
    fn parallel_updates_through_a_shared_surface() {
        let shared = SharedSurface::new(MemorySurface::new(WIDTH, 8));
        let mut bars: Vec<_> = (0..8u16)
            .map(|row| shared.with(|s| ProgressIndicator::new(s, 0, row)).unwrap())
            .collect();

        bars.par_iter_mut().for_each(|bar| {
            for p in (2..=100).step_by(2) {
                shared.with(|s| bar.set_progress(s, p)).unwrap();
            }
        });

        shared.with(|s| {
            for row in 0..8 {
                assert_eq!(s.row_text(row), format!("[{}] 100%", "=".repeat(80)));
            }
        });
        assert!(bars.iter().all(ProgressIndicator::is_done));
    }
}
