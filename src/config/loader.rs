//! Configuration file loading with precedence handling.

use crate::image::DEFAULT_IMAGE_CACHE_CAPACITY;
use crate::pagination::{DEFAULT_PAGE_SIZE, DEFAULT_THRESHOLD_SCREENS};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "REVFEED_CONFIG";

/// Environment variable overriding the page size.
pub const PAGE_SIZE_ENV: &str = "REVFEED_PAGE_SIZE";

/// Default number of body lines shown before the "show more" affordance.
pub const DEFAULT_TRUNCATION_LINES: usize = 3;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional. Corresponds to `~/.config/revfeed/config.toml`:
///
/// ```toml
/// page_size = 20
/// prefetch_screens = 2.5
/// truncation_lines = 3
/// fetch_latency_ms = 0
/// image_cache_capacity = 256
/// log_file_path = "/tmp/revfeed.log"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Reviews requested per page.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Prefetch threshold in viewport heights.
    #[serde(default)]
    pub prefetch_screens: Option<f64>,

    /// Body lines shown before truncation. `0` disables truncation.
    #[serde(default)]
    pub truncation_lines: Option<usize>,

    /// Simulated latency of every page fetch, in milliseconds.
    #[serde(default)]
    pub fetch_latency_ms: Option<u64>,

    /// Images kept in memory before the least recently used is evicted.
    #[serde(default)]
    pub image_cache_capacity: Option<usize>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Reviews requested per page, at least 1.
    pub page_size: usize,
    /// Prefetch threshold in viewport heights, finite and non-negative.
    pub prefetch_screens: f64,
    /// Body lines shown before truncation.
    pub truncation_lines: usize,
    /// Simulated fetch latency in milliseconds.
    pub fetch_latency_ms: u64,
    /// Image cache capacity, at least 1.
    pub image_cache_capacity: usize,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            prefetch_screens: DEFAULT_THRESHOLD_SCREENS,
            truncation_lines: DEFAULT_TRUNCATION_LINES,
            fetch_latency_ms: 0,
            image_cache_capacity: DEFAULT_IMAGE_CACHE_CAPACITY.get(),
            log_file_path: default_log_path(),
        }
    }
}

/// Overrides taken from command-line flags. `None` leaves the field alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    /// `--page-size`
    pub page_size: Option<usize>,
    /// `--latency-ms`
    pub fetch_latency_ms: Option<u64>,
    /// `--lines`
    pub truncation_lines: Option<usize>,
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/revfeed/revfeed.log` on Linux, or the platform
/// state directory elsewhere. Falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("revfeed").join("revfeed.log")
    } else {
        PathBuf::from("revfeed.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if the file doesn't exist.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path, `~/.config/revfeed/config.toml` on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("revfeed").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `REVFEED_CONFIG` environment variable
/// 3. Default path `~/.config/revfeed/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(format!("{CONFIG_ENV} is empty")));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// `REVFEED_PAGE_SIZE` overrides the page size. Unparseable values are
/// logged and ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var(PAGE_SIZE_ENV) {
        match raw.trim().parse::<usize>() {
            Ok(size) => config.page_size = size,
            Err(e) => warn!(value = %raw, error = %e, "Ignoring invalid {PAGE_SIZE_ENV}"),
        }
    }

    config
}

/// Merge config file into defaults to create resolved config.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        page_size: config.page_size.unwrap_or(defaults.page_size),
        prefetch_screens: config.prefetch_screens.unwrap_or(defaults.prefetch_screens),
        truncation_lines: config.truncation_lines.unwrap_or(defaults.truncation_lines),
        fetch_latency_ms: config.fetch_latency_ms.unwrap_or(defaults.fetch_latency_ms),
        image_cache_capacity: config
            .image_cache_capacity
            .unwrap_or(defaults.image_cache_capacity),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: &CliOverrides) -> ResolvedConfig {
    if let Some(size) = cli.page_size {
        config.page_size = size;
    }
    if let Some(latency) = cli.fetch_latency_ms {
        config.fetch_latency_ms = latency;
    }
    if let Some(lines) = cli.truncation_lines {
        config.truncation_lines = lines;
    }

    config
}

/// Clamp values that would break the pagination store or prefetch policy.
///
/// A zero page size becomes 1. A zero image cache capacity falls back to
/// the default. A negative or non-finite prefetch threshold
/// falls back to the default.
pub fn normalize(mut config: ResolvedConfig) -> ResolvedConfig {
    if config.page_size == 0 {
        warn!("page_size 0 is not allowed, using 1");
        config.page_size = 1;
    }
    if config.image_cache_capacity == 0 {
        warn!("image_cache_capacity 0 is not allowed, using default");
        config.image_cache_capacity = DEFAULT_IMAGE_CACHE_CAPACITY.get();
    }
    if !config.prefetch_screens.is_finite() || config.prefetch_screens < 0.0 {
        warn!(
            value = config.prefetch_screens,
            "Invalid prefetch_screens, using default"
        );
        config.prefetch_screens = DEFAULT_THRESHOLD_SCREENS;
    }
    config
}

/// Run the whole precedence chain: file, env, CLI, then normalization.
///
/// # Errors
///
/// Propagates [`ConfigError`] from [`load_config_with_precedence`].
pub fn resolve(
    config_path: Option<PathBuf>,
    cli: &CliOverrides,
) -> Result<ResolvedConfig, ConfigError> {
    let file = load_config_with_precedence(config_path)?;
    let merged = apply_env_overrides(merge_config(file));
    Ok(normalize(apply_cli_overrides(merged, cli)))
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
