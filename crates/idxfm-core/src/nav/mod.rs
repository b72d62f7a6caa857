//! Navigation and selection for idxfm.
//!
//! This module contains the [`navigator::Navigator`] trait with its
//! filesystem-backed [`navigator::DirectoryNavigator`], listing order and
//! filtering ([`listing`]), and the index-based [`selection`] tracker.

pub mod listing;
pub mod navigator;
pub mod selection;
