//! Copy, move, and delete applied to every selected path.
//!
//! Bulk operations are fail-fast and not transactional: paths are
//! processed in selection order, the first failure stops the loop, and
//! whatever was already copied, moved, or deleted stays that way. The
//! selection is cleared once the loop ends, whether it finished or not.
//! A failure is reported as [`CoreError::Aborted`], which lists the paths
//! that were processed before it.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};
use crate::fs::ops::{copy_file, delete_file, move_file, resolve_target};
use crate::nav::selection::Selector;

/// Which bulk operation produced a [`BulkReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkKind {
    Copy,
    Move,
    Delete,
}

impl fmt::Display for BulkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            BulkKind::Copy => "copied",
            BulkKind::Move => "moved",
            BulkKind::Delete => "deleted",
        };
        f.write_str(verb)
    }
}

/// One successfully processed selection item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Processed {
    /// The selected path.
    pub source: PathBuf,
    /// Where it ended up. `None` for deletions.
    pub target: Option<PathBuf>,
}

/// Outcome of a bulk operation that processed the whole selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkReport {
    kind: BulkKind,
    processed: Vec<Processed>,
}

impl BulkReport {
    fn new(kind: BulkKind) -> Self {
        Self {
            kind,
            processed: Vec::new(),
        }
    }

    pub fn kind(&self) -> BulkKind {
        self.kind
    }

    pub fn processed(&self) -> &[Processed] {
        &self.processed
    }

    pub fn len(&self) -> usize {
        self.processed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processed.is_empty()
    }
}

/// Bulk-operation capability over a [`Selector`]'s current selection.
pub trait BulkOperator {
    /// Copies every selected path into `destination`.
    fn copy_files(
        &self,
        selector: &mut dyn Selector,
        destination: &Path,
    ) -> CoreResult<BulkReport>;
    /// Moves every selected path into `destination`.
    fn move_files(
        &self,
        selector: &mut dyn Selector,
        destination: &Path,
    ) -> CoreResult<BulkReport>;
    /// Deletes every selected path, directories recursively.
    fn delete_files(&self, selector: &mut dyn Selector) -> CoreResult<BulkReport>;
}

/// Filesystem-backed [`BulkOperator`].
#[derive(Debug, Clone, Copy)]
pub struct FileOperator {
    preserve_timestamps: bool,
}

impl Default for FileOperator {
    fn default() -> Self {
        Self {
            preserve_timestamps: true,
        }
    }
}

impl FileOperator {
    pub fn new(preserve_timestamps: bool) -> Self {
        Self {
            preserve_timestamps,
        }
    }
}

impl BulkOperator for FileOperator {
    fn copy_files(
        &self,
        selector: &mut dyn Selector,
        destination: &Path,
    ) -> CoreResult<BulkReport> {
        let preserve = self.preserve_timestamps;
        run_transfer(selector, BulkKind::Copy, destination, |src, target| {
            copy_file(src, target, preserve)
        })
    }

    fn move_files(
        &self,
        selector: &mut dyn Selector,
        destination: &Path,
    ) -> CoreResult<BulkReport> {
        run_transfer(selector, BulkKind::Move, destination, move_file)
    }

    fn delete_files(&self, selector: &mut dyn Selector) -> CoreResult<BulkReport> {
        run_bulk(selector, BulkKind::Delete, |path| {
            delete_file(path)?;
            Ok(None)
        })
    }
}

/// Shared shape of copy and move: each source lands at
/// [`resolve_target`]`(source, destination)`.
///
/// Several sources cannot share one non-directory destination, so that
/// case fails up front with [`CoreError::NotADirectory`].
fn run_transfer<F>(
    selector: &mut dyn Selector,
    kind: BulkKind,
    destination: &Path,
    mut transfer: F,
) -> CoreResult<BulkReport>
where
    F: FnMut(&Path, &Path) -> CoreResult<()>,
{
    if selector.selected().len() > 1 && !destination.is_dir() {
        selector.clear_selection();
        return Err(CoreError::NotADirectory(destination.to_path_buf()));
    }

    run_bulk(selector, kind, |src| {
        let target = resolve_target(src, destination);
        transfer(src, &target)?;
        Ok(Some(target))
    })
}

fn run_bulk<F>(selector: &mut dyn Selector, kind: BulkKind, mut apply: F) -> CoreResult<BulkReport>
where
    F: FnMut(&Path) -> CoreResult<Option<PathBuf>>,
{
    let paths = selector.selected().to_vec();
    let mut report = BulkReport::new(kind);
    let mut failure = None;

    for path in paths {
        match apply(&path) {
            Ok(target) => {
                match &target {
                    Some(t) => tracing::info!("{kind} {} -> {}", path.display(), t.display()),
                    None => tracing::info!("{kind} {}", path.display()),
                }
                report.processed.push(Processed {
                    source: path,
                    target,
                });
            }
            Err(e) => {
                failure = Some(e);
                break;
            }
        }
    }

    selector.clear_selection();

    match failure {
        None => Ok(report),
        Some(e) => {
            tracing::warn!(
                "{kind} aborted after {} path(s): {e}",
                report.processed.len()
            );
            Err(CoreError::Aborted {
                completed: report.processed.into_iter().map(|p| p.source).collect(),
                source: Box::new(e),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::navigator::{DirectoryNavigator, Navigator};
    use crate::nav::selection::Selection;
    use std::fs;
    use tempfile::TempDir;

    /// `work/` holds `a.txt`, `b.txt`, `docs/` (with `inner.txt`); `out/` is empty.
    fn setup() -> (TempDir, DirectoryNavigator, Selection, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let work = tmp.path().join("work");
        fs::create_dir(&work).unwrap();
        fs::write(work.join("a.txt"), "aaa").unwrap();
        fs::write(work.join("b.txt"), "bbb").unwrap();
        fs::create_dir(work.join("docs")).unwrap();
        fs::write(work.join("docs").join("inner.txt"), "inner").unwrap();
        let out = tmp.path().join("out");
        fs::create_dir(&out).unwrap();

        let nav = DirectoryNavigator::new(Some(work));
        (tmp, nav, Selection::new(), out)
    }

    fn names_in(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn copy_lands_every_basename_in_destination() {
        let (_tmp, nav, mut selection, out) = setup();
        selection.select_by_indices(&nav, &[0, 2]).unwrap();

        let report = FileOperator::default()
            .copy_files(&mut selection, &out)
            .unwrap();

        assert_eq!(report.kind(), BulkKind::Copy);
        assert_eq!(report.len(), 2);
        assert_eq!(names_in(&out), vec!["a.txt", "docs"]);
        assert_eq!(
            fs::read_to_string(out.join("docs").join("inner.txt")).unwrap(),
            "inner"
        );
        assert!(nav.current_dir().join("a.txt").exists());
        assert!(selection.selected().is_empty());
    }

    #[test]
    fn copy_single_item_to_new_path() {
        let (_tmp, nav, mut selection, out) = setup();
        selection.select_by_indices(&nav, &[1]).unwrap();
        let target = out.join("renamed.txt");

        let report = FileOperator::default()
            .copy_files(&mut selection, &target)
            .unwrap();

        assert_eq!(report.processed()[0].target.as_deref(), Some(target.as_path()));
        assert_eq!(fs::read_to_string(&target).unwrap(), "bbb");
    }

    #[test]
    fn copy_many_into_non_directory_fails_and_clears() {
        let (_tmp, nav, mut selection, out) = setup();
        selection.select_by_indices(&nav, &[0, 1]).unwrap();

        let err = FileOperator::default()
            .copy_files(&mut selection, &out.join("missing"))
            .unwrap_err();

        assert!(matches!(err, CoreError::NotADirectory(_)));
        assert!(selection.selected().is_empty());
        assert!(names_in(&out).is_empty());
    }

    #[test]
    fn copy_missing_path_aborts_with_not_found() {
        let (_tmp, nav, mut selection, out) = setup();
        selection.select_by_indices(&nav, &[0, 1]).unwrap();
        fs::remove_file(nav.current_dir().join("b.txt")).unwrap();

        let err = FileOperator::default()
            .copy_files(&mut selection, &out)
            .unwrap_err();

        match &err {
            CoreError::Aborted { completed, source } => {
                assert_eq!(completed, &vec![nav.current_dir().join("a.txt")]);
                assert!(
                    matches!(source.as_ref(), CoreError::NotFound(p) if p.ends_with("b.txt"))
                );
            }
            other => panic!("expected Aborted, got {other:?}"),
        }
        assert_eq!(names_in(&out), vec!["a.txt"]);
        assert!(selection.selected().is_empty());
    }

    #[test]
    fn copy_into_own_directory_leaves_file_intact() {
        let (_tmp, nav, mut selection, _out) = setup();
        selection.select_by_indices(&nav, &[0]).unwrap();

        let err = FileOperator::default()
            .copy_files(&mut selection, nav.current_dir())
            .unwrap_err();

        assert!(matches!(err.root_cause(), CoreError::SameFile(_)));
        assert_eq!(
            fs::read_to_string(nav.current_dir().join("a.txt")).unwrap(),
            "aaa"
        );
        assert!(selection.selected().is_empty());
    }

    #[test]
    fn copy_directory_into_itself_via_parent_component_is_rejected() {
        let (tmp, nav, mut selection, _out) = setup();
        selection.select_by_indices(&nav, &[2]).unwrap();
        let dest = tmp.path().join("out/../work/docs/inner");

        let err = FileOperator::default()
            .copy_files(&mut selection, &dest)
            .unwrap_err();

        assert!(matches!(err.root_cause(), CoreError::InvalidDestination(_)));
        assert_eq!(names_in(&nav.current_dir().join("docs")), vec!["inner.txt"]);
        assert!(selection.selected().is_empty());
    }

    #[test]
    fn move_relocates_and_clears() {
        let (_tmp, nav, mut selection, out) = setup();
        selection.select_by_indices(&nav, &[0, 2]).unwrap();

        FileOperator::default()
            .move_files(&mut selection, &out)
            .unwrap();

        assert_eq!(names_in(&out), vec!["a.txt", "docs"]);
        assert_eq!(names_in(nav.current_dir()), vec!["b.txt"]);
        assert!(selection.selected().is_empty());
    }

    #[test]
    fn move_duplicate_selection_fails_on_second() {
        let (_tmp, nav, mut selection, out) = setup();
        selection.select_by_indices(&nav, &[0, 0]).unwrap();

        let err = FileOperator::default()
            .move_files(&mut selection, &out)
            .unwrap_err();

        assert!(matches!(err.root_cause(), CoreError::NotFound(_)));
        assert_eq!(names_in(&out), vec!["a.txt"]);
        assert!(selection.selected().is_empty());
    }

    #[test]
    fn delete_removes_file_and_non_empty_directory() {
        let (_tmp, nav, mut selection, _out) = setup();
        selection.select_by_indices(&nav, &[0, 2]).unwrap();

        let report = FileOperator::default().delete_files(&mut selection).unwrap();

        assert_eq!(report.kind(), BulkKind::Delete);
        assert!(report.processed().iter().all(|p| p.target.is_none()));
        assert_eq!(names_in(nav.current_dir()), vec!["b.txt"]);
        assert!(selection.selected().is_empty());
    }

    #[test]
    fn delete_missing_path_reports_not_found() {
        let (_tmp, nav, mut selection, _out) = setup();
        selection.select_by_indices(&nav, &[1]).unwrap();
        fs::remove_file(nav.current_dir().join("b.txt")).unwrap();

        let err = FileOperator::default()
            .delete_files(&mut selection)
            .unwrap_err();

        assert!(matches!(err.root_cause(), CoreError::NotFound(_)));
        assert!(selection.selected().is_empty());
    }

    #[test]
    fn empty_selection_is_a_no_op() {
        let (_tmp, _nav, mut selection, out) = setup();

        let report = FileOperator::default()
            .copy_files(&mut selection, &out)
            .unwrap();

        assert!(report.is_empty());
        assert!(names_in(&out).is_empty());
    }

    #[test]
    fn kind_display() {
        assert_eq!(BulkKind::Copy.to_string(), "copied");
        assert_eq!(BulkKind::Move.to_string(), "moved");
        assert_eq!(BulkKind::Delete.to_string(), "deleted");
    }
}
