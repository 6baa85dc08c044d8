//! File logging.
//!
//! The terminal is the UI, so log records go to a file instead.

use std::fs::File;
use std::path::Path;

use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use crate::error::{Error, Result};

/// Send `log` records at `level` and above to a freshly created file.
///
/// # Errors
/// `Io` if the file cannot be created; `Configuration` if a logger is
/// already installed for this process.
pub fn init_file_logger(path: &Path, level: LevelFilter) -> Result<()> {
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let file = File::create(path)?;
    WriteLogger::init(level, config, file)
        .map_err(|e| Error::Configuration(format!("logger already installed: {e}")))
}
