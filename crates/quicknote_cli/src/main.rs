//! QuickNote command-line front end.
//!
//! # Responsibility
//! - Load configuration, start logging and open local storage.
//! - Run one screen action per invocation against the app shell.

use crate::cli::CliConfig;
use clap::Parser;
use quicknote_core::{init_logging_from_config, load_config, AppShell, SqliteLocalStorage};
use std::process::ExitCode;

mod cli;
mod commands;

fn main() -> ExitCode {
    let cli_config = CliConfig::parse();

    let config = match load_config(cli_config.config_file.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };

    if let Err(err) = init_logging_from_config(&config) {
        eprintln!("warning: logging disabled: {err}");
    }

    let storage = match SqliteLocalStorage::open(&config.storage_path) {
        Ok(storage) => storage,
        Err(err) => {
            eprintln!(
                "error: cannot open storage `{}`: {err}",
                config.storage_path.display()
            );
            return ExitCode::FAILURE;
        }
    };

    let mut app = match AppShell::start(storage, config.route_guard) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    match commands::run(&mut app, &config, cli_config.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
