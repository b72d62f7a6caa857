//! Ordering and filtering of directory listings.
//!
//! Indices handed to the user are positions in a listing, so the listing
//! order has to be reproducible: two reads of an unchanged directory must
//! produce the same sequence.

use std::path::Path;

use crate::error::CoreResult;
use crate::fs::entry::FileEntry;
use crate::fs::ops::read_directory;

/// How a directory is turned into an indexed listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingOptions {
    /// Include entries whose name starts with `.`.
    pub show_hidden: bool,
    /// Put directories before files.
    pub dirs_first: bool,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            show_hidden: true,
            dirs_first: false,
        }
    }
}

/// Reads `path` and returns its entries filtered and sorted per `options`.
///
/// # Errors
///
/// Same as [`read_directory`].
pub fn list_directory(path: &Path, options: ListingOptions) -> CoreResult<Vec<FileEntry>> {
    let entries = read_directory(path)?;
    let visible = filter_hidden(&entries, options.show_hidden);
    Ok(sort_entries(&visible, options.dirs_first))
}

/// Returns a new vector sorted case-insensitively by name.
///
/// Names that differ only by case fall back to a byte-wise comparison so
/// the order is total.
pub fn sort_entries(entries: &[FileEntry], dirs_first: bool) -> Vec<FileEntry> {
    let mut sorted: Vec<FileEntry> = entries.to_vec();

    sorted.sort_by(|a, b| {
        if dirs_first {
            let dir_cmp = b.is_dir().cmp(&a.is_dir());
            if dir_cmp != std::cmp::Ordering::Equal {
                return dir_cmp;
            }
        }

        a.name()
            .to_lowercase()
            .cmp(&b.name().to_lowercase())
            .then_with(|| a.name().cmp(b.name()))
    });

    sorted
}

/// Returns only non-hidden entries unless `show_hidden` is set.
pub fn filter_hidden(entries: &[FileEntry], show_hidden: bool) -> Vec<FileEntry> {
    if show_hidden {
        return entries.to_vec();
    }
    entries.iter().filter(|e| !e.is_hidden()).cloned().collect()
}
