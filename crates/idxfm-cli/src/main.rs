//! idxfm — browse a directory tree and copy, move, or delete entries
//! picked by index from a text menu.
//!
//! This binary parses the command line, loads the configuration, sets up
//! file logging, and hands stdin/stdout to the [`menu::Menu`] loop.

mod menu;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use idxfm_core::{expand_tilde, home_dir, Config, DirectoryNavigator, FileOperator};

use crate::menu::{Menu, MenuOptions};

#[derive(Debug, Parser)]
#[command(name = "idxfm", version, about = "Index-driven terminal file manager")]
struct Cli {
    /// Directory to start in (defaults to the configured start_dir, then $HOME)
    start_dir: Option<PathBuf>,

    /// Config file to use instead of ~/.config/idxfm/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the log (defaults to idxfm.log in the temp directory)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(path: &Path, verbose: bool) -> anyhow::Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // Logs go to a file so they never interleave with the menu.
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}

fn load_config(explicit: Option<&Path>, home: &Path) -> anyhow::Result<Config> {
    let config = match explicit {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::load_default(home).context("failed to load default config")?,
    };
    Ok(config)
}

/// Command line wins over the config file; relative paths are taken from
/// the working directory.
fn resolve_start_dir(
    cli: Option<PathBuf>,
    config: &Config,
    home: &Path,
) -> anyhow::Result<Option<PathBuf>> {
    let start = cli.or_else(|| {
        config
            .general
            .start_dir
            .as_deref()
            .map(|dir| expand_tilde(dir, home))
    });

    match start {
        Some(path) if path.is_relative() => {
            let cwd = std::env::current_dir().context("failed to get current directory")?;
            Ok(Some(cwd.join(path)))
        }
        other => Ok(other),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("idxfm.log"));
    init_logging(&log_path, cli.verbose)?;

    let home = home_dir();
    let config = load_config(cli.config.as_deref(), &home)?;
    let start = resolve_start_dir(cli.start_dir, &config, &home)?;

    let navigator = DirectoryNavigator::new(start).with_listing(config.listing_options());
    let operator = FileOperator::new(config.operations.preserve_timestamps);
    let options = MenuOptions {
        home,
        confirm_delete: config.operations.confirm_delete,
    };

    tracing::info!("idxfm started in {}", navigator.start_dir().display());

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut menu = Menu::new(navigator, operator, options, stdin.lock(), stdout.lock());
    menu.run()?;

    tracing::info!("idxfm exited");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_parses_all_flags() {
        let cli = Cli::parse_from([
            "idxfm",
            "/tmp",
            "--config",
            "/etc/idxfm.toml",
            "--log-file",
            "/tmp/x.log",
            "-v",
        ]);
        assert_eq!(cli.start_dir, Some(PathBuf::from("/tmp")));
        assert_eq!(cli.config, Some(PathBuf::from("/etc/idxfm.toml")));
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/x.log")));
        assert!(cli.verbose);
    }

    #[test]
    fn start_dir_prefers_command_line() {
        let mut config = Config::default();
        config.general.start_dir = Some("/from/config".to_string());

        let cli_dir = Some(PathBuf::from("/from/cli"));
        let start = resolve_start_dir(cli_dir, &config, Path::new("/home/u")).unwrap();

        assert_eq!(start, Some(PathBuf::from("/from/cli")));
    }

    #[test]
    fn start_dir_from_config_expands_tilde() {
        let mut config = Config::default();
        config.general.start_dir = Some("~/work".to_string());

        let start = resolve_start_dir(None, &config, Path::new("/home/u")).unwrap();

        assert_eq!(start, Some(PathBuf::from("/home/u/work")));
    }

    #[test]
    fn start_dir_defaults_to_none() {
        let start = resolve_start_dir(None, &Config::default(), Path::new("/home/u")).unwrap();
        assert!(start.is_none());
    }

    #[test]
    fn relative_start_dir_is_made_absolute() {
        let config = Config::default();
        let start = resolve_start_dir(Some(PathBuf::from("rel")), &config, Path::new("/home/u"))
            .unwrap()
            .unwrap();
        assert!(start.is_absolute());
        assert!(start.ends_with("rel"));
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let result = load_config(Some(&tmp.path().join("nope.toml")), tmp.path());
        assert!(result.is_err());
    }

    #[test]
    fn missing_default_config_falls_back() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = load_config(None, tmp.path()).unwrap();
        assert!(config.operations.confirm_delete);
    }
}
