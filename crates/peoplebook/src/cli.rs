//! Command-line interface for peoplebook.
//!
//! The binary takes no subcommands; it always opens the interactive menu.
//! The flags below only adjust configuration and logging.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::logging::Verbosity;

/// peoplebook - Keep a small list of people in a JSON file
///
/// Opens an interactive menu to show, add, delete and search records and to
/// compute the average height.
#[derive(Debug, Parser)]
#[command(name = "peoplebook")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// People file to use instead of the configured one
    #[arg(long, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Result file to use instead of the configured one
    #[arg(long, value_name = "PATH")]
    pub result_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                2 => Verbosity::Debug,
                _ => Verbosity::Trace,
            }
        }
    }

    /// Apply the path overrides given on the command line.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(path) = &self.data_file {
            config.storage.data_path = Some(path.clone());
        }
        if let Some(path) = &self.result_file {
            config.storage.result_path = Some(path.clone());
        }
    }
}
