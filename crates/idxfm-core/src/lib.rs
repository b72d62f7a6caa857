//! idxfm core library — UI-agnostic file manager logic.
//!
//! `idxfm-core` binds a current-directory cursor to an index-based
//! selection and then to bulk file operations. It knows nothing about
//! terminals; the `idxfm` binary is a thin text menu on top of it.
//!
//! # Modules
//!
//! - [`fs`] — [`FileEntry`], directory reading, single-path copy/move/delete.
//! - [`nav`] — the [`Navigator`] cursor, listing order, and the [`Selector`] tracker.
//! - [`bulk`] — the [`BulkOperator`] applying copy/move/delete to a selection.
//! - [`command`] — menu commands and argument parsing.
//! - [`config`] — TOML-based user settings.
//! - [`error`] — Unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod bulk;
pub mod command;
pub mod config;
pub mod error;
pub mod fs;
pub mod nav;

pub use bulk::{BulkKind, BulkOperator, BulkReport, FileOperator, Processed};
pub use command::{expand_tilde, parse_index, parse_indices, resolve_destination, MenuCommand};
pub use config::settings::Config;
pub use error::{CoreError, CoreResult};
pub use fs::entry::FileEntry;
pub use fs::ops::{copy_file, delete_file, move_file, read_directory, resolve_target};
pub use nav::listing::{list_directory, ListingOptions};
pub use nav::navigator::{home_dir, DirectoryNavigator, Navigator};
pub use nav::selection::{Selection, Selector};
