//! Logging setup
//!
//! Filter precedence: `RUST_LOG`, then `-v` count, then `log_filter` from
//! the configuration.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use keycalc::config::FrontendConfig;
use tracing_subscriber::EnvFilter;

use crate::error::{CliError, CliResult};

/// Filter directive for a `-v` count, falling back to the configured one
#[must_use]
pub fn filter_directive(verbose: u8, config: &FrontendConfig) -> String {
    match verbose {
        0 => config.log_filter.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Installs the global subscriber
///
/// Logs go to `log_file` when given, else to stderr when `to_stderr` is
/// set; otherwise logging stays off.
pub fn init_logging(
    verbose: u8,
    config: &FrontendConfig,
    log_file: Option<&Path>,
    to_stderr: bool,
) -> CliResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directive(verbose, config)))
        .map_err(|e| CliError::logging(e.to_string()))?;

    let result = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None if to_stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
        None => return Ok(()),
    };
    result.map_err(|e| CliError::logging(e.to_string()))
}
