//! File entry representation.

use std::path::{Path, PathBuf};

use unicode_normalization::UnicodeNormalization;

/// A single file or directory entry in a directory listing.
///
/// `FileEntry` is immutable. The stored path is the fully qualified path
/// of the entry on disk; the name is the NFC-normalised last component,
/// intended for display only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    path: PathBuf,
    name: String,
    size: u64,
    is_dir: bool,
    is_hidden: bool,
    is_symlink: bool,
}

impl FileEntry {
    /// Creates a new `FileEntry` from a path and its metadata.
    ///
    /// Hidden files are detected by a leading `.` in the file name.
    /// Directory sizes are set to `0`.
    pub fn new(path: PathBuf, metadata: &std::fs::Metadata) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().nfc().collect::<String>())
            .unwrap_or_default();
        let is_hidden = name.starts_with('.');

        Self {
            path,
            name,
            size: if metadata.is_dir() { 0 } else { metadata.len() },
            is_dir: metadata.is_dir(),
            is_hidden,
            is_symlink: metadata.is_symlink(),
        }
    }

    /// Stats `path` and builds an entry for it.
    ///
    /// Symlinks are followed for the directory check so a link to a
    /// directory lists as a directory; a dangling link is reported as a
    /// plain (non-directory) symlink.
    pub fn read(path: PathBuf) -> std::io::Result<Self> {
        let link_meta = std::fs::symlink_metadata(&path)?;
        if !link_meta.is_symlink() {
            return Ok(Self::new(path, &link_meta));
        }

        let entry = match std::fs::metadata(&path) {
            Ok(target_meta) => Self::new(path, &target_meta),
            Err(_) => Self::new(path, &link_meta),
        };
        Ok(Self {
            is_symlink: true,
            ..entry
        })
    }

    /// Returns the full path of this entry.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the file or directory name (last component of the path).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the file size in bytes. Always `0` for directories.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns `true` if this entry is (or links to) a directory.
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Returns `true` if the name starts with `.`.
    pub fn is_hidden(&self) -> bool {
        self.is_hidden
    }

    /// Returns `true` if this entry is a symbolic link.
    pub fn is_symlink(&self) -> bool {
        self.is_symlink
    }
}
