//! Error types for `idxfm-core`.
//!
//! All fallible operations in the core library return [`CoreResult<T>`],
//! which is an alias for `Result<T, CoreError>`.

use std::path::{Path, PathBuf};

/// Unified error type for all core operations.
///
/// Each variant captures just enough context for the caller to display
/// a meaningful message or take corrective action.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The target path does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// The process lacks permission to access the path.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// A directory was expected but the path points to something else.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An entry index fell outside the current directory listing.
    #[error("index {index} out of range (listing has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    /// User input could not be interpreted (e.g. a non-numeric index).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A copy or move target lies inside the source directory.
    #[error("cannot place a directory inside itself: {0}")]
    InvalidDestination(PathBuf),

    /// A copy target is the source itself.
    #[error("source and destination are the same file: {0}")]
    SameFile(PathBuf),

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// A bulk operation stopped part-way through the selection.
    ///
    /// `completed` lists the selected paths that were already processed
    /// before `source` occurred.
    #[error("{source} ({} of the selection already processed)", .completed.len())]
    Aborted {
        completed: Vec<PathBuf>,
        #[source]
        source: Box<CoreError>,
    },

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Maps an [`std::io::Error`] raised while touching `path` onto the
    /// matching variant, keeping the path for display.
    pub fn from_io(err: std::io::Error, path: &Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => CoreError::PermissionDenied(path.to_path_buf()),
            _ => CoreError::Io(err),
        }
    }

    /// Returns the innermost error, looking through [`CoreError::Aborted`].
    pub fn root_cause(&self) -> &CoreError {
        match self {
            CoreError::Aborted { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Convenience alias used throughout `idxfm-core`.
pub type CoreResult<T> = Result<T, CoreError>;
