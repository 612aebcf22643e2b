//! Configuration file discovery and loading
//!
//! Services resolve each setting in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Tiers 1 and 2 are handled by each service's clap definitions. This module
//! covers tier 3: locating the TOML file and loading it with graceful
//! degradation when it is absent.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "FACEWHO_CONFIG";

/// Logging configuration shared by all services
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Platform config file location for a module
///
/// `~/.config/facewho/<module>.toml` on Linux, the platform equivalent elsewhere.
pub fn default_config_path(module_name: &str) -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("facewho").join(format!("{}.toml", module_name)))
}

/// Pick the config file to load
///
/// An explicit path (from `--config` or `FACEWHO_CONFIG`) wins over the
/// platform default.
pub fn resolve_config_path(explicit: Option<&Path>, module_name: &str) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| default_config_path(module_name))
}

/// Load a TOML config file into `T`
///
/// A missing file is not fatal: a warning is logged and `T::default()` is
/// returned so the service can still start from flags and environment.
/// An unreadable or malformed file is an error.
pub fn load_toml_config<T>(path: Option<&Path>) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let Some(path) = path else {
        warn!("No config file location available, using defaults");
        return Ok(T::default());
    };

    if !path.exists() {
        warn!("Config file not found at {}, using defaults", path.display());
        return Ok(T::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    info!("Loaded config file {}", path.display());
    Ok(config)
}

/// Validate a credential or identifier (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Take the first valid value for a required setting
///
/// `candidates` are ordered highest priority first. Blank values are skipped.
pub fn require_setting<I>(name: &str, candidates: I) -> Result<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|v| is_valid_key(v))
        .map(|v| v.trim().to_string())
        .ok_or_else(|| Error::Config(format!("{} not configured", name)))
}

/// Validate an http(s) base URL and strip trailing slashes
pub fn normalize_base_url(name: &str, value: &str) -> Result<String> {
    let trimmed = value.trim().trim_end_matches('/');
    let has_scheme = trimmed.starts_with("http://") || trimmed.starts_with("https://");
    let has_host = trimmed
        .split_once("://")
        .map(|(_, rest)| !rest.is_empty())
        .unwrap_or(false);

    if has_scheme && has_host {
        Ok(trimmed.to_string())
    } else {
        Err(Error::InvalidInput(format!(
            "{} must be an http(s) URL, got '{}'",
            name, value
        )))
    }
}
