//! `peoplebook` - interactive record manager
//!
//! This binary loads the configuration, sets up logging and runs the menu on
//! the terminal.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use peoplebook::cli::Cli;
use peoplebook::{init_logging, Config, Shell};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let mut config = Config::load_from(cli.config.clone()).context("loading configuration")?;
    cli.apply_overrides(&mut config);
    debug!(
        "Using data file {} and result file {}",
        config.data_path().display(),
        config.result_path().display()
    );

    let stdin = io::stdin();
    let mut shell = Shell::from_config(&config, stdin.lock(), io::stdout())?;
    shell.run().context("running the menu")?;
    Ok(())
}
