//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod parse;

use std::path::PathBuf;

use idcard_core::IdCardConfig;

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("idcard")
        .join("config.json")
}

/// The file a command reads its configuration from: `--config` if given,
/// otherwise the default location.
pub fn effective_config_path(path: Option<&str>) -> PathBuf {
    path.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load the effective configuration file (defaults when the default file is
/// absent), then apply environment overrides.
///
/// An explicit `--config` path must exist.
pub fn load_config(path: Option<&str>) -> anyhow::Result<IdCardConfig> {
    let config_path = effective_config_path(path);
    let config = if path.is_some() || config_path.exists() {
        IdCardConfig::from_file(&config_path)?
    } else {
        IdCardConfig::default()
    };
    Ok(config.with_env_overrides())
}
