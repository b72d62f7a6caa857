//! Index-based selection over a directory snapshot.
//!
//! The tracker never trusts an earlier listing: every selection re-reads
//! the navigator's current directory and resolves indices against that
//! fresh snapshot. Two selections with the same indices against a
//! directory that changed in between may therefore pick different files.

use std::path::PathBuf;

use crate::error::{CoreError, CoreResult};
use crate::fs::entry::FileEntry;
use crate::nav::navigator::Navigator;

/// Selection capability: snapshot a listing, resolve indices, hold paths.
pub trait Selector {
    /// Re-reads the navigator's listing, stores it as the snapshot and
    /// returns it.
    fn load_directory_contents(&mut self, nav: &dyn Navigator) -> CoreResult<&[FileEntry]>;
    /// Replaces the selection with the entries at `indices` of a fresh
    /// snapshot, in the given order. Duplicates are kept.
    fn select_by_indices(
        &mut self,
        nav: &dyn Navigator,
        indices: &[usize],
    ) -> CoreResult<&[PathBuf]>;
    /// Returns the current selection.
    fn selected(&self) -> &[PathBuf];
    /// Empties the selection.
    fn clear_selection(&mut self);
}

/// Default [`Selector`] holding the last snapshot and the selected paths.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    snapshot: Vec<FileEntry>,
    selected: Vec<PathBuf>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the listing captured by the last load or selection.
    pub fn snapshot(&self) -> &[FileEntry] {
        &self.snapshot
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

impl Selector for Selection {
    fn load_directory_contents(&mut self, nav: &dyn Navigator) -> CoreResult<&[FileEntry]> {
        self.snapshot = nav.list_directory_contents()?;
        Ok(&self.snapshot)
    }

    /// A single out-of-range index fails the whole call and leaves the
    /// selection empty: every index is checked before anything is added.
    fn select_by_indices(
        &mut self,
        nav: &dyn Navigator,
        indices: &[usize],
    ) -> CoreResult<&[PathBuf]> {
        self.load_directory_contents(nav)?;
        self.selected.clear();

        let len = self.snapshot.len();
        if let Some(&index) = indices.iter().find(|&&i| i >= len) {
            return Err(CoreError::IndexOutOfRange { index, len });
        }

        self.selected = indices
            .iter()
            .map(|&i| self.snapshot[i].path().to_path_buf())
            .collect();

        tracing::debug!(
            "selected {} path(s) in {}",
            self.selected.len(),
            nav.current_dir().display()
        );
        Ok(&self.selected)
    }

    fn selected(&self) -> &[PathBuf] {
        &self.selected
    }

    fn clear_selection(&mut self) {
        self.selected.clear();
    }
}
