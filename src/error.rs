//! Error taxonomy for menus, progress bars and prompts.
//!
//! Ignored keystrokes are not errors: they never surface here.

use std::io;

use thiserror::Error;

/// Everything a component operation can fail with.
#[derive(Debug, Error)]
pub enum Error {
    /// A component was constructed with parameters it cannot render.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An argument is outside what the operation accepts.
    /// The component's state and rendered output are left unchanged.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A line read by a prompt could not be converted to the requested type.
    #[error("could not parse input: {0}")]
    Parse(String),

    /// The terminal could not be read from or written to.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// The user pressed Ctrl+C while a component was waiting for a key.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == io::ErrorKind::Interrupted)
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
