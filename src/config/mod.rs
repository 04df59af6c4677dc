//! Configuration: TOML file, environment, and CLI flags merged into one
//! [`ResolvedConfig`].

pub mod loader;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, normalize, resolve,
    CliOverrides, ConfigError, ConfigFile, ResolvedConfig,
};
