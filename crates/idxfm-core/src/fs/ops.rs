//! Directory reading and single-path file operations.
//!
//! These are the primitives the bulk operator applies to each selected
//! path. Each one works on exactly one source path and fails fast.

use std::path::{Path, PathBuf};

use filetime::FileTime;

use crate::error::{CoreError, CoreResult};
use crate::fs::entry::FileEntry;

/// Reads the immediate contents of a directory and returns them as [`FileEntry`] values.
///
/// The returned entries are **unsorted**. Use [`crate::nav::listing::sort_entries`]
/// to put them in a stable order before handing out indices.
/// Entries that vanish or cannot be stat'ed between the directory read and
/// the stat are skipped.
///
/// # Errors
///
/// - [`CoreError::NotFound`] — the path does not exist.
/// - [`CoreError::NotADirectory`] — the path is not a directory.
/// - [`CoreError::PermissionDenied`] — read access is denied.
/// - [`CoreError::Io`] — any other I/O error.
pub fn read_directory(path: &Path) -> CoreResult<Vec<FileEntry>> {
    if !path.exists() {
        return Err(CoreError::NotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(CoreError::NotADirectory(path.to_path_buf()));
    }

    let read_dir = std::fs::read_dir(path).map_err(|e| CoreError::from_io(e, path))?;

    let mut entries = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = match dir_entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!("skipping unreadable entry in {}: {e}", path.display());
                continue;
            }
        };
        match FileEntry::read(dir_entry.path()) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                tracing::warn!("skipping {}: {e}", dir_entry.path().display());
            }
        }
    }

    Ok(entries)
}

/// Works out where `src` lands when copied or moved to `destination`.
///
/// An existing directory destination receives the item under its own
/// base name; any other destination is taken as the full target path.
pub fn resolve_target(src: &Path, destination: &Path) -> PathBuf {
    if destination.is_dir() {
        match src.file_name() {
            Some(name) => destination.join(name),
            None => destination.to_path_buf(),
        }
    } else {
        destination.to_path_buf()
    }
}

/// Copies a file, symlink, or directory (recursively) to `dest`.
///
/// `dest` is the full target path, not a containing directory; see
/// [`resolve_target`]. Missing parent directories of `dest` are created.
/// With `preserve_times`, access and modification times are carried over
/// to every copied item.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `src` does not exist.
/// - [`CoreError::SameFile`] if `dest` is `src` itself.
/// - [`CoreError::InvalidDestination`] if `src` is a directory and `dest` lies inside it.
/// - [`CoreError::Io`] for any I/O failure during copy.
pub fn copy_file(src: &Path, dest: &Path, preserve_times: bool) -> CoreResult<()> {
    let meta = std::fs::symlink_metadata(src).map_err(|e| CoreError::from_io(e, src))?;

    // Copying a file onto itself truncates it before reading.
    if is_same_file(src, dest) {
        return Err(CoreError::SameFile(dest.to_path_buf()));
    }

    if meta.is_dir() {
        ensure_outside(src, dest)?;
        copy_dir_recursive(src, dest, preserve_times, 0)?;
    } else {
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        copy_leaf(src, dest, &meta, preserve_times)?;
    }

    Ok(())
}

/// Maximum recursion depth for copy_dir_recursive to prevent symlink loops.
const MAX_COPY_DEPTH: usize = 64;

fn copy_dir_recursive(
    src: &Path,
    dest: &Path,
    preserve_times: bool,
    depth: usize,
) -> CoreResult<()> {
    if depth > MAX_COPY_DEPTH {
        return Err(CoreError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("maximum recursion depth ({MAX_COPY_DEPTH}) exceeded during copy"),
        )));
    }

    std::fs::create_dir_all(dest)?;

    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let entry_path = entry.path();
        let target = dest.join(entry.file_name());

        // file_type() does not follow symlinks
        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&entry_path, &target, preserve_times, depth + 1)?;
        } else {
            let meta = std::fs::symlink_metadata(&entry_path)?;
            copy_leaf(&entry_path, &target, &meta, preserve_times)?;
        }
    }

    // Directory attributes go last: children would bump mtime, and a
    // read-only mode would block writing them.
    let meta = std::fs::metadata(src)?;
    if preserve_times {
        apply_times(dest, &meta, false)?;
    }
    std::fs::set_permissions(dest, meta.permissions())?;

    Ok(())
}

fn copy_leaf(
    src: &Path,
    dest: &Path,
    meta: &std::fs::Metadata,
    preserve_times: bool,
) -> CoreResult<()> {
    if meta.is_symlink() {
        // Copy symlink as symlink rather than following it
        let link_target = std::fs::read_link(src)?;
        #[cfg(unix)]
        std::os::unix::fs::symlink(&link_target, dest)?;
        #[cfg(not(unix))]
        {
            let _ = link_target;
            std::fs::copy(src, dest)?;
        }
    } else {
        std::fs::copy(src, dest)?;
    }

    if preserve_times {
        apply_times(dest, meta, meta.is_symlink())?;
    }
    Ok(())
}

fn apply_times(dest: &Path, meta: &std::fs::Metadata, is_symlink: bool) -> CoreResult<()> {
    let atime = FileTime::from_last_access_time(meta);
    let mtime = FileTime::from_last_modification_time(meta);
    if is_symlink {
        filetime::set_symlink_file_times(dest, atime, mtime)?;
    } else {
        filetime::set_file_times(dest, atime, mtime)?;
    }
    Ok(())
}

fn ensure_outside(src: &Path, dest: &Path) -> CoreResult<()> {
    let src = normalize(src);
    let dest_normalized = normalize(dest);
    if dest_normalized != src && dest_normalized.starts_with(&src) {
        return Err(CoreError::InvalidDestination(dest.to_path_buf()));
    }
    Ok(())
}

fn is_same_file(src: &Path, dest: &Path) -> bool {
    if normalize(src) == normalize(dest) {
        return true;
    }
    // Hard links and symlinks pointing back at the source.
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        if let (Ok(a), Ok(b)) = (std::fs::symlink_metadata(src), std::fs::metadata(dest)) {
            return a.dev() == b.dev() && a.ino() == b.ino();
        }
    }
    false
}

/// Absolute form of `path` with `..` resolved, without following a
/// symlink in the last component.
///
/// The longest existing ancestor is canonicalized; the components below
/// it are applied lexically, since they do not exist yet.
fn normalize(path: &Path) -> PathBuf {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => normalize_existing(parent).join(name),
        _ => normalize_existing(path),
    }
}

fn normalize_existing(path: &Path) -> PathBuf {
    let mut base = path.to_path_buf();
    let mut missing = Vec::new();
    loop {
        if let Ok(canonical) = std::fs::canonicalize(&base) {
            base = canonical;
            break;
        }
        let mut components = base.components();
        match components.next_back() {
            Some(last) => {
                missing.push(last.as_os_str().to_os_string());
                base = components.as_path().to_path_buf();
            }
            None => break,
        }
    }

    for part in missing.into_iter().rev() {
        if part == ".." {
            base.pop();
        } else if part != "." {
            base.push(part);
        }
    }
    base
}

/// Moves a file or directory to a new location.
///
/// `dest` is the full target path; missing parent directories are created.
/// Attempts a fast `rename` first. Only when the rename crosses a device
/// boundary does it fall back to copy + delete, keeping timestamps on the
/// copy.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `src` does not exist.
/// - [`CoreError::InvalidDestination`] if `src` is a directory and `dest` lies inside it.
/// - [`CoreError::PermissionDenied`] if the rename is refused.
/// - [`CoreError::Io`] for any other I/O failure, e.g. a non-empty directory at `dest`.
pub fn move_file(src: &Path, dest: &Path) -> CoreResult<()> {
    // symlink_metadata: a dangling link is still movable
    let meta = std::fs::symlink_metadata(src).map_err(|e| CoreError::from_io(e, src))?;
    if meta.is_dir() {
        ensure_outside(src, dest)?;
    }
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }

    match std::fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::CrossesDevices => {
            tracing::debug!(
                "rename {} -> {} crosses devices, falling back to copy + delete",
                src.display(),
                dest.display()
            );
            copy_file(src, dest, true)?;
            delete_file(src)?;
            Ok(())
        }
        Err(e) => Err(CoreError::from_io(e, src)),
    }
}

/// Deletes a file or directory (recursively).
///
/// Symlinks are removed as links; their targets are left alone.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `path` does not exist.
/// - [`CoreError::PermissionDenied`] if removal is refused.
/// - [`CoreError::Io`] for any other I/O failure during deletion.
pub fn delete_file(path: &Path) -> CoreResult<()> {
    // Use symlink_metadata: does NOT follow symlinks
    let meta = std::fs::symlink_metadata(path).map_err(|e| CoreError::from_io(e, path))?;

    if meta.is_dir() {
        std::fs::remove_dir_all(path).map_err(|e| CoreError::from_io(e, path))?;
    } else {
        std::fs::remove_file(path).map_err(|e| CoreError::from_io(e, path))?;
    }

    Ok(())
}
