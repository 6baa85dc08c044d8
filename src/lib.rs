//! cellkit: selection menus and progress bars drawn straight onto the terminal grid.

pub mod error;
pub mod logging;
pub mod menu;
pub mod progress;
pub mod prompt;
pub mod report;
pub mod surface;
pub mod theme;
pub mod types;

pub use error::{Error, Result};
pub use menu::Menu;
pub use progress::ProgressIndicator;
pub use surface::{CrosstermSurface, MemorySurface, SharedSurface, Surface};
pub use types::{BarStyle, HighlightStyle, OutputFormat, Selection};
