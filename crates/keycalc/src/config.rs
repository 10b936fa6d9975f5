//! Frontend configuration
//!
//! Engine limits are compile-time constants; only presentation knobs live
//! here.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors while loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("cannot read config {path}: {source}")]
    Io {
        /// Path that failed
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid JSON for [`FrontendConfig`]
    #[error("invalid config {path}: {source}")]
    Parse {
        /// Path that failed
        path: String,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}

/// Presentation settings shared by the terminal and DOM frontends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    /// How long the error cue stays visible, in milliseconds
    pub error_flash_ms: u64,
    /// Show the key help sidebar
    pub show_help: bool,
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            error_flash_ms: Self::DEFAULT_ERROR_FLASH_MS,
            show_help: true,
            log_filter: "info".to_string(),
        }
    }
}

impl FrontendConfig {
    /// Default error cue duration
    pub const DEFAULT_ERROR_FLASH_MS: u64 = 500;

    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Parses a JSON document
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Set the error cue duration
    #[must_use]
    pub fn with_error_flash_ms(mut self, ms: u64) -> Self {
        self.error_flash_ms = ms;
        self
    }

    /// Show or hide the help sidebar
    #[must_use]
    pub fn with_show_help(mut self, show: bool) -> Self {
        self.show_help = show;
        self
    }

    /// Set the fallback log filter
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Error cue duration
    #[must_use]
    pub const fn error_flash(&self) -> Duration {
        Duration::from_millis(self.error_flash_ms)
    }
}
