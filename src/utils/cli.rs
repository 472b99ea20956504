//! Command-line argument parsing for trek.
//!
//! `trek [PATH]` launches the TUI in PATH (or the working directory). `--init` writes a
//! default config and exits. `--log FILE` (or `TREK_LOG`) enables the debug log.

use crate::config::Config;
use crate::utils::expand_home_path;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "trek", version, about = "Keyboard-driven terminal file browser")]
pub struct Args {
    /// Directory to open (defaults to the current directory)
    pub path: Option<String>,

    /// Write a default config file and exit
    #[arg(long)]
    pub init: bool,

    /// Write a debug log to FILE
    #[arg(long, value_name = "FILE", env = "TREK_LOG")]
    pub log: Option<PathBuf>,
}

pub enum CliAction {
    RunApp,
    RunAppAtPath(PathBuf),
    Exit,
}

/// Turns parsed arguments into what main should do.
pub fn handle_args(args: &Args) -> CliAction {
    if args.init {
        let config_path = Config::default_path();
        match Config::generate_default(&config_path) {
            Ok(()) => println!("Default config generated at {:?}", config_path),
            Err(e) => eprintln!("Error: {}", e),
        }
        return CliAction::Exit;
    }

    match args.path.as_deref() {
        Some(arg) if !arg.trim().is_empty() => CliAction::RunAppAtPath(expand_home_path(arg)),
        _ => CliAction::RunApp,
    }
}

/// Sets up the file logger. Without a log file, logging stays a no-op.
pub fn init_logging(path: Option<&Path>) {
    let Some(path) = path else {
        return;
    };
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    match File::create(path) {
        Ok(log_file) => {
            let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
        }
        Err(e) => eprintln!("Cannot open log file {}: {}", path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_path_and_flags() {
        let args = Args::parse_from(["trek", "/tmp", "--log", "trek.log"]);
        assert_eq!(args.path.as_deref(), Some("/tmp"));
        assert_eq!(args.log, Some(PathBuf::from("trek.log")));
        assert!(!args.init);
        assert!(matches!(handle_args(&args), CliAction::RunAppAtPath(p) if p == Path::new("/tmp")));
    }

    #[test]
    fn no_path_runs_in_cwd() {
        let args = Args::parse_from(["trek"]);
        assert!(matches!(handle_args(&args), CliAction::RunApp));
    }
}
