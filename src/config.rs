//! Typed configuration from environment variables.
//!
//! Everything has a default, so startup never fails on config. In local
//! dev, call `dotenvy::dotenv().ok()` before `from_env`.

use std::path::PathBuf;

/// Default log location, matching the layout the intake service has
/// always used.
pub const DEFAULT_LOG_PATH: &str = "data/emergency_log.csv";

#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the append-only case log.
    pub log_path: PathBuf,
    /// tracing filter directive (e.g. "info", "triageq=debug").
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            log_path: std::env::var("TRIAGEQ_LOG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_PATH)),
            log_level: std::env::var("TRIAGEQ_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            log_level: "info".to_string(),
        }
    }
}
