//! File system abstractions for idxfm.
//!
//! This module provides the [`entry::FileEntry`] type and the single-path
//! primitives ([`ops::read_directory`], [`ops::copy_file`],
//! [`ops::move_file`], [`ops::delete_file`]) that the navigator and the
//! bulk operator are built on.

pub mod entry;
pub mod ops;
