//! The current-directory cursor.
//!
//! The [`Navigator`] trait is the navigation capability; the selection
//! tracker only ever reads through it. [`DirectoryNavigator`] is the
//! filesystem-backed implementation.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};
use crate::fs::entry::FileEntry;
use crate::nav::listing::{list_directory, ListingOptions};

/// Navigation over a single current directory.
pub trait Navigator {
    /// Returns the current directory verbatim.
    fn current_dir(&self) -> &Path;
    /// Replaces the current directory. Existence is not checked here; the
    /// next listing reports a bad path.
    fn set_current_dir(&mut self, path: PathBuf);
    /// Lists the immediate children of the current directory, in index order.
    fn list_directory_contents(&self) -> CoreResult<Vec<FileEntry>>;
    /// Enters the directory at position `index` of a fresh listing.
    fn navigate_to_index(&mut self, index: usize) -> CoreResult<()>;
    /// Moves to the parent directory. Returns `false` (and stays put) when
    /// the current path has no parent.
    fn go_to_parent(&mut self) -> bool;
}

/// Filesystem-backed [`Navigator`].
///
/// The start directory is resolved once at construction and kept so the
/// user can jump back to it with [`DirectoryNavigator::go_to_start`].
#[derive(Debug, Clone)]
pub struct DirectoryNavigator {
    current_dir: PathBuf,
    start_dir: PathBuf,
    options: ListingOptions,
}

impl DirectoryNavigator {
    /// Creates a navigator at `start`, or at the user's home directory when
    /// `start` is `None`.
    pub fn new(start: Option<PathBuf>) -> Self {
        let start_dir = start.unwrap_or_else(home_dir);
        tracing::debug!("navigator starting at {}", start_dir.display());
        Self {
            current_dir: start_dir.clone(),
            start_dir,
            options: ListingOptions::default(),
        }
    }

    /// Returns the navigator with `options` applied to every listing.
    pub fn with_listing(self, options: ListingOptions) -> Self {
        Self { options, ..self }
    }

    /// Returns the directory the navigator was created at.
    pub fn start_dir(&self) -> &Path {
        &self.start_dir
    }

    /// Returns the listing options in effect.
    pub fn listing_options(&self) -> ListingOptions {
        self.options
    }

    /// Resets the current directory to the start directory.
    pub fn go_to_start(&mut self) {
        self.current_dir = self.start_dir.clone();
    }
}

impl Navigator for DirectoryNavigator {
    fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    fn set_current_dir(&mut self, path: PathBuf) {
        self.current_dir = path;
    }

    fn list_directory_contents(&self) -> CoreResult<Vec<FileEntry>> {
        list_directory(&self.current_dir, self.options)
    }

    fn navigate_to_index(&mut self, index: usize) -> CoreResult<()> {
        let entries = self.list_directory_contents()?;
        let entry = entries.get(index).ok_or(CoreError::IndexOutOfRange {
            index,
            len: entries.len(),
        })?;

        if !entry.is_dir() {
            return Err(CoreError::NotADirectory(entry.path().to_path_buf()));
        }

        tracing::debug!("entering {}", entry.path().display());
        self.current_dir = entry.path().to_path_buf();
        Ok(())
    }

    fn go_to_parent(&mut self) -> bool {
        match self.current_dir.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                self.current_dir = parent.to_path_buf();
                true
            }
            _ => false,
        }
    }
}

/// Resolves the user's home directory from `HOME`, falling back to `/`
/// when it is unset or empty.
pub fn home_dir() -> PathBuf {
    home_or_root(std::env::var_os("HOME"))
}

fn home_or_root(home: Option<OsString>) -> PathBuf {
    match home {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => PathBuf::from("/"),
    }
}
