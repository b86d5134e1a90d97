//! Configuration file loading.
//!
//! Configuration is TOML. An explicit `--config` path wins; otherwise the
//! user's configuration directory is probed for `runnel/config.toml`, and
//! defaults apply when neither exists.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use log::debug;

use runnel::{RunnelError, config::AppConfig};

/// Loads the application configuration.
///
/// # Errors
///
/// Returns `RunnelError` when an explicitly given file cannot be read or
/// does not parse as TOML. A missing *default* config file is not an
/// error.
pub fn load_config(path: Option<&String>) -> Result<AppConfig, RunnelError> {
    let resolved = match path {
        Some(explicit) => Some(PathBuf::from(explicit)),
        None => default_config_path().filter(|candidate| candidate.exists()),
    };

    let Some(file) = resolved else {
        debug!("No configuration file, using defaults");
        return Ok(AppConfig::default());
    };

    debug!(config_path:% = file.display(); "Loading configuration");
    let content = fs::read_to_string(&file)?;
    toml::from_str(&content)
        .map_err(|err| RunnelError::Config(format!("{}: {err}", file.display())))
}

fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "runnel")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
