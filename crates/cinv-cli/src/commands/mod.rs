//! Subcommands.

pub mod batch;
pub mod config;
pub mod process;

use std::path::{Path, PathBuf};

use cinv_core::models::config::CinvConfig;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cinv")
        .join("config.json")
}

/// Load the configuration from `--config`, else the default location if it
/// exists, else built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<CinvConfig> {
    if let Some(path) = config_path {
        return Ok(CinvConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        Ok(CinvConfig::from_file(&default_path)?)
    } else {
        Ok(CinvConfig::default())
    }
}
