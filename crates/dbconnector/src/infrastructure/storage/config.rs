//! TOML-based configuration for the `dbconnector` tool.
//!
//! Reads `AppConfig` from `dbconnector/dbconnector.toml` under the user's
//! config directory (`%APPDATA%` on Windows, `$XDG_CONFIG_HOME` or
//! `~/.config` elsewhere), or from an explicit path given on the command
//! line.  Example:
//!
//! ```toml
//! [store]
//! path = "user_file.json"
//!
//! [session]
//! user = "emp_exercise_1"
//! policy = "auto"
//!
//! [session.initial_values]
//! driver = "{ODBC Driver 17 for SQL Server}"
//!
//! [logging]
//! level = "debug"
//! ```
//!
//! Every section and field is optional.  Fields annotated with
//! `#[serde(default = "some_fn")]` take `some_fn()` when absent, so the tool
//! works before any config file exists.

use std::path::{Path, PathBuf};

use dbconnector_core::{InitPolicy, SettingsMap};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::storage::attributes::DEFAULT_ATTRIBUTES_FILE;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level tool configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the attribute document lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

/// Session seeding.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    /// Identity activated on start.  Writes need one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// `"defaults"`, `"stored"` or `"auto"`.
    #[serde(default)]
    pub policy: InitPolicy,
    /// Values layered over defaults and stored overrides.
    #[serde(default)]
    pub initial_values: SettingsMap,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` level used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_ATTRIBUTES_FILE)
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Resolves the full path to the platform config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    platform_config_dir()
        .map(|dir| dir.join("dbconnector.toml"))
        .ok_or(ConfigError::NoPlatformConfigDir)
}

/// Loads `AppConfig` from the platform config file.
///
/// Without a platform config directory there is no file to read, so the
/// defaults are returned.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_or_default(config_file_path())
}

fn load_config_or_default(path: Result<PathBuf, ConfigError>) -> Result<AppConfig, ConfigError> {
    match path {
        Ok(path) => load_config_from(&path),
        Err(ConfigError::NoPlatformConfigDir) => Ok(AppConfig::default()),
        Err(e) => Err(e),
    }
}

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the
/// file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn platform_config_dir() -> Option<PathBuf> {
    let base = if cfg!(windows) {
        std::env::var_os("APPDATA").map(PathBuf::from)
    } else {
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
    };
    base.map(|dir| dir.join("dbconnector"))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
