//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod convert;
pub mod extract;

use std::path::{Path, PathBuf};

use tracing::debug;

use suuji_core::SuujiConfig;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("suuji")
        .join("config.json")
}

/// Load the configuration from `config_path`, the default location, or built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<SuujiConfig> {
    if let Some(path) = config_path {
        debug!("Loading configuration from {}", path);
        return Ok(SuujiConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading configuration from {}", default_path.display());
        return Ok(SuujiConfig::from_file(&default_path)?);
    }

    Ok(SuujiConfig::default())
}
