//! The interactive text menu.
//!
//! [`Menu`] owns the navigator, the selection and the operator, reads one
//! command at a time from its input and writes results to its output. Any
//! core error is printed and the loop carries on; only a broken output
//! stream ends it early.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use idxfm_core::{
    parse_index, parse_indices, resolve_destination, BulkOperator, BulkReport, CoreError,
    CoreResult, DirectoryNavigator, FileEntry, FileOperator, MenuCommand, Navigator, Selection,
    Selector,
};

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Frontend settings that are not part of the core components.
#[derive(Debug, Clone)]
pub struct MenuOptions {
    /// Used to expand `~` in destinations.
    pub home: PathBuf,
    pub confirm_delete: bool,
}

pub struct Menu<R, W> {
    navigator: DirectoryNavigator,
    selection: Selection,
    operator: FileOperator,
    options: MenuOptions,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(
        navigator: DirectoryNavigator,
        operator: FileOperator,
        options: MenuOptions,
        input: R,
        output: W,
    ) -> Self {
        Self {
            navigator,
            selection: Selection::new(),
            operator,
            options,
            input,
            output,
        }
    }

    /// Runs until the user quits or input ends.
    pub fn run(&mut self) -> std::io::Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("Your choice: ")? else {
                break;
            };

            let Some(command) = MenuCommand::parse(&choice) else {
                writeln!(self.output, "Invalid choice. Please try again.")?;
                continue;
            };

            tracing::debug!("menu command {command:?}");
            match self.dispatch(command) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(CoreError::Io(e)) if is_broken_output(&e) => return Err(e),
                Err(e) => self.report_error(&e)?,
            }
        }
        writeln!(self.output, "Goodbye!")?;
        Ok(())
    }

    fn dispatch(&mut self, command: MenuCommand) -> CoreResult<Flow> {
        match command {
            MenuCommand::Display => self.display_directory()?,
            MenuCommand::Navigate => {
                self.display_directory()?;
                let Some(line) = self.prompt("Enter navigation index: ")? else {
                    return Ok(Flow::Quit);
                };
                let index = parse_index(&line)?;
                self.navigator.navigate_to_index(index)?;
                self.display_directory()?;
            }
            MenuCommand::Parent => {
                if !self.navigator.go_to_parent() {
                    writeln!(self.output, "Already at the top of the tree.")?;
                }
                self.display_directory()?;
            }
            MenuCommand::Select => {
                self.display_directory()?;
                let Some(line) =
                    self.prompt("Enter file indices to select (comma-separated): ")?
                else {
                    return Ok(Flow::Quit);
                };
                let indices = parse_indices(&line)?;
                self.selection.select_by_indices(&self.navigator, &indices)?;
                self.show_selection()?;
            }
            MenuCommand::Copy => return self.transfer(true),
            MenuCommand::Move => return self.transfer(false),
            MenuCommand::Delete => return self.delete(),
            MenuCommand::ShowSelection => self.show_selection()?,
            MenuCommand::ClearSelection => {
                self.selection.clear_selection();
                writeln!(self.output, "Selection cleared.")?;
            }
            MenuCommand::GoToStart => {
                self.navigator.go_to_start();
                self.display_directory()?;
            }
            MenuCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn transfer(&mut self, copy: bool) -> CoreResult<Flow> {
        if self.selection.is_empty() {
            writeln!(self.output, "No files selected.")?;
            return Ok(Flow::Continue);
        }

        let question = if copy {
            "Enter destination path for copying: "
        } else {
            "Enter destination path for moving: "
        };
        let Some(line) = self.prompt(question)? else {
            return Ok(Flow::Quit);
        };
        let destination =
            resolve_destination(&line, self.navigator.current_dir(), &self.options.home)?;

        let report = if copy {
            self.operator.copy_files(&mut self.selection, &destination)?
        } else {
            self.operator.move_files(&mut self.selection, &destination)?
        };
        self.print_report(&report)?;
        Ok(Flow::Continue)
    }

    fn delete(&mut self) -> CoreResult<Flow> {
        let count = self.selection.selected().len();
        if count == 0 {
            writeln!(self.output, "No files selected.")?;
            return Ok(Flow::Continue);
        }

        if self.options.confirm_delete {
            let question = format!("Delete {count} selected item(s)? [y/N]: ");
            let Some(answer) = self.prompt(&question)? else {
                return Ok(Flow::Quit);
            };
            if !matches!(answer.trim(), "y" | "Y" | "yes") {
                writeln!(self.output, "Delete cancelled.")?;
                return Ok(Flow::Continue);
            }
        }

        let report = self.operator.delete_files(&mut self.selection)?;
        self.print_report(&report)?;
        Ok(Flow::Continue)
    }

    fn display_directory(&mut self) -> CoreResult<()> {
        let entries = match self.navigator.list_directory_contents() {
            Ok(entries) => entries,
            Err(CoreError::PermissionDenied(_)) => {
                writeln!(self.output, "Access denied to this directory.")?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        writeln!(self.output)?;
        writeln!(
            self.output,
            "Current Directory: {}",
            self.navigator.current_dir().display()
        )?;
        writeln!(self.output, "{}", "-".repeat(50))?;
        if entries.is_empty() {
            writeln!(self.output, "(empty)")?;
        }
        for (index, entry) in entries.iter().enumerate() {
            writeln!(self.output, "{index}. {}", listing_line(entry))?;
        }
        Ok(())
    }

    fn show_selection(&mut self) -> CoreResult<()> {
        let selected = self.selection.selected();
        if selected.is_empty() {
            writeln!(self.output, "No files selected.")?;
            return Ok(());
        }
        writeln!(self.output, "Selected files:")?;
        for path in selected {
            writeln!(self.output, " - {}", base_name(path))?;
        }
        Ok(())
    }

    fn print_report(&mut self, report: &BulkReport) -> CoreResult<()> {
        let verb = capitalize(&report.kind().to_string());
        writeln!(self.output, "{verb} {} item(s).", report.len())?;
        for item in report.processed() {
            if let Some(target) = &item.target {
                writeln!(
                    self.output,
                    " - {} -> {}",
                    base_name(&item.source),
                    target.display()
                )?;
            }
        }
        Ok(())
    }

    fn report_error(&mut self, err: &CoreError) -> std::io::Result<()> {
        tracing::warn!("command failed: {err}");
        writeln!(self.output, "An error occurred: {err}")?;
        if let CoreError::Aborted { completed, .. } = err {
            for path in completed {
                writeln!(self.output, "   done before failure: {}", path.display())?;
            }
        }
        Ok(())
    }

    fn print_menu(&mut self) -> std::io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "--- File Explorer ---")?;
        for command in MenuCommand::ALL {
            writeln!(self.output, "{}. {}", command.key(), command.label())?;
        }
        Ok(())
    }

    /// Writes `question` and reads one line. `None` at end of input.
    fn prompt(&mut self, question: &str) -> std::io::Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

fn is_broken_output(err: &std::io::Error) -> bool {
    matches!(
        err.kind(),
        std::io::ErrorKind::BrokenPipe | std::io::ErrorKind::WriteZero
    )
}

/// `📁 Folder: docs`, `📄 File: a.txt (3 B)`, with ` [link]` for symlinks.
fn listing_line(entry: &FileEntry) -> String {
    let mut line = if entry.is_dir() {
        format!("📁 Folder: {}", entry.name())
    } else {
        format!("📄 File: {} ({})", entry.name(), format_size(entry.size()))
    };
    if entry.is_symlink() {
        line.push_str(" [link]");
    }
    line
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
