// Error type shared by the tab/split core and the desktop shell.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    /// A tab or divider index that does not refer to a live entry.
    /// The operation that raised it changed nothing.
    #[error("index {index} out of range (len {len})")]
    InvalidIndex { index: usize, len: usize },

    /// The manager has no active tab. Only reachable after the session terminated.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    #[error("failed to create render surface: {0}")]
    SurfaceCreation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ShellResult<T> = Result<T, ShellError>;

impl ShellError {
    pub fn surface_creation(msg: impl Into<String>) -> Self {
        Self::SurfaceCreation(msg.into())
    }

    /// Checks `index` against `len`, the way every index-taking operation does.
    pub(crate) fn check_index(index: usize, len: usize) -> ShellResult<()> {
        if index < len {
            Ok(())
        } else {
            Err(Self::InvalidIndex { index, len })
        }
    }
}
