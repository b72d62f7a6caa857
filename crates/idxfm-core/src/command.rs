//! Menu commands and parsing of their text arguments.
//!
//! The frontend reads a menu choice, turns it into a [`MenuCommand`], and
//! reads at most one more line as the argument (an index, an index list,
//! or a destination path). The helpers here interpret those lines.

use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// Every entry of the text menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuCommand {
    Display,
    Navigate,
    Parent,
    Select,
    Copy,
    Move,
    Delete,
    Quit,
    ShowSelection,
    ClearSelection,
    GoToStart,
}

impl MenuCommand {
    /// All commands in menu order.
    pub const ALL: [MenuCommand; 11] = [
        MenuCommand::Display,
        MenuCommand::Navigate,
        MenuCommand::Parent,
        MenuCommand::Select,
        MenuCommand::Copy,
        MenuCommand::Move,
        MenuCommand::Delete,
        MenuCommand::Quit,
        MenuCommand::ShowSelection,
        MenuCommand::ClearSelection,
        MenuCommand::GoToStart,
    ];

    /// The key the user types to pick this command.
    pub fn key(self) -> &'static str {
        match self {
            MenuCommand::Display => "1",
            MenuCommand::Navigate => "2",
            MenuCommand::Parent => "3",
            MenuCommand::Select => "4",
            MenuCommand::Copy => "5",
            MenuCommand::Move => "6",
            MenuCommand::Delete => "7",
            MenuCommand::Quit => "8",
            MenuCommand::ShowSelection => "9",
            MenuCommand::ClearSelection => "0",
            MenuCommand::GoToStart => "h",
        }
    }

    /// Human-readable menu label.
    pub fn label(self) -> &'static str {
        match self {
            MenuCommand::Display => "Display directory",
            MenuCommand::Navigate => "Navigate into a subdirectory",
            MenuCommand::Parent => "Go to parent directory",
            MenuCommand::Select => "Select files",
            MenuCommand::Copy => "Copy selected",
            MenuCommand::Move => "Move selected",
            MenuCommand::Delete => "Delete selected",
            MenuCommand::Quit => "Quit",
            MenuCommand::ShowSelection => "Show selection",
            MenuCommand::ClearSelection => "Clear selection",
            MenuCommand::GoToStart => "Return to start directory",
        }
    }

    /// Looks up the command for a typed key. Surrounding whitespace and
    /// letter case are ignored.
    pub fn parse(input: &str) -> Option<Self> {
        let key = input.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

/// Parses a comma-separated list of entry indices.
///
/// Whitespace around items and empty items are ignored, so `"2, 0,,1"`
/// yields `[2, 0, 1]` and a blank line yields an empty list.
///
/// # Errors
///
/// [`CoreError::InvalidInput`] naming the first item that is not a
/// non-negative integer.
pub fn parse_indices(input: &str) -> CoreResult<Vec<usize>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse::<usize>()
                .map_err(|_| CoreError::InvalidInput(format!("not an index: {item}")))
        })
        .collect()
}

/// Parses a single entry index.
///
/// # Errors
///
/// [`CoreError::InvalidInput`] if `input` is not a non-negative integer.
pub fn parse_index(input: &str) -> CoreResult<usize> {
    let item = input.trim();
    item.parse::<usize>()
        .map_err(|_| CoreError::InvalidInput(format!("not an index: {item}")))
}

/// Expands a leading `~` or `~/` to `home`. Other paths are returned as-is.
pub fn expand_tilde(input: &str, home: &Path) -> PathBuf {
    if input == "~" {
        return home.to_path_buf();
    }
    match input.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => PathBuf::from(input),
    }
}

/// Turns a typed destination into a path: `~` is expanded and a relative
/// path is taken relative to `current_dir`.
///
/// # Errors
///
/// [`CoreError::InvalidInput`] for a blank destination.
pub fn resolve_destination(input: &str, current_dir: &Path, home: &Path) -> CoreResult<PathBuf> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CoreError::InvalidInput("empty destination".to_string()));
    }
    let path = expand_tilde(input, home);
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(current_dir.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_menu_keys() {
        assert_eq!(MenuCommand::parse("1"), Some(MenuCommand::Display));
        assert_eq!(MenuCommand::parse(" 8 \n"), Some(MenuCommand::Quit));
        assert_eq!(MenuCommand::parse("H"), Some(MenuCommand::GoToStart));
        assert_eq!(MenuCommand::parse("42"), None);
        assert_eq!(MenuCommand::parse(""), None);
    }

    #[test]
    fn keys_are_unique() {
        let mut keys: Vec<&str> = MenuCommand::ALL.iter().map(|c| c.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), MenuCommand::ALL.len());
    }

    #[test]
    fn every_key_parses_back() {
        for command in MenuCommand::ALL {
            assert_eq!(MenuCommand::parse(command.key()), Some(command));
        }
    }

    #[test]
    fn parse_indices_in_order_with_spaces() {
        assert_eq!(parse_indices("2, 0 ,1").unwrap(), vec![2, 0, 1]);
    }

    #[test]
    fn parse_indices_keeps_duplicates() {
        assert_eq!(parse_indices("1,1").unwrap(), vec![1, 1]);
    }

    #[test]
    fn parse_indices_blank_is_empty() {
        assert!(parse_indices("").unwrap().is_empty());
        assert!(parse_indices(" , ").unwrap().is_empty());
    }

    #[test]
    fn parse_indices_rejects_garbage() {
        let err = parse_indices("1,x").unwrap_err();
        assert_eq!(err.to_string(), "invalid input: not an index: x");
    }

    #[test]
    fn parse_indices_rejects_negative() {
        assert!(matches!(
            parse_indices("-1").unwrap_err(),
            CoreError::InvalidInput(_)
        ));
    }

    #[test]
    fn parse_single_index() {
        assert_eq!(parse_index(" 3 ").unwrap(), 3);
        assert!(parse_index("three").is_err());
    }

    #[test]
    fn tilde_expansion() {
        let home = Path::new("/home/u");
        assert_eq!(expand_tilde("~", home), PathBuf::from("/home/u"));
        assert_eq!(expand_tilde("~/docs", home), PathBuf::from("/home/u/docs"));
        assert_eq!(expand_tilde("~other", home), PathBuf::from("~other"));
        assert_eq!(expand_tilde("/tmp", home), PathBuf::from("/tmp"));
    }

    #[test]
    fn destination_relative_to_current_dir() {
        let dest = resolve_destination("backup", Path::new("/work"), Path::new("/home/u")).unwrap();
        assert_eq!(dest, PathBuf::from("/work/backup"));
    }

    #[test]
    fn destination_absolute_and_tilde() {
        let cwd = Path::new("/work");
        let home = Path::new("/home/u");
        assert_eq!(
            resolve_destination("/tmp/out", cwd, home).unwrap(),
            PathBuf::from("/tmp/out")
        );
        assert_eq!(
            resolve_destination(" ~/out ", cwd, home).unwrap(),
            PathBuf::from("/home/u/out")
        );
    }

    #[test]
    fn blank_destination_is_invalid() {
        let err = resolve_destination("  ", Path::new("/work"), Path::new("/home/u")).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }
}
