//! keycalc CLI library
//!
//! Argument parsing, logging setup and the `press` and `tui` commands for
//! the `keycalc` binary.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

mod commands;
mod error;
mod logging;
mod press;
mod tui;

use std::path::Path;

use keycalc::config::FrontendConfig;

pub use commands::{Cli, Commands, OutputFormat, PressArgs};
pub use error::{CliError, CliResult};
pub use logging::{filter_directive, init_logging};
pub use press::{press_keys, run_press, PressOutcome};
pub use tui::run_tui;

/// Loads the configuration file, or the defaults when none is given
pub fn load_config(path: Option<&Path>) -> CliResult<FrontendConfig> {
    match path {
        Some(path) => Ok(FrontendConfig::from_json_file(path)?),
        None => Ok(FrontendConfig::default()),
    }
}
