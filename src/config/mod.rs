//! Configuration management for kalshi-tui.

mod settings;

pub use settings::{
    ApiConfig, Config, DEMO_BASE_URL, KeyBindings, PROD_BASE_URL, ThemeConfig, UiConfig,
};

use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "kalshi-tui", "kalshi-tui")
}

/// Get the configuration directory path.
pub fn config_dir() -> Result<PathBuf> {
    project_dirs()
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| Error::config("Could not determine config directory"))
}

/// `config.toml` in the config directory, or in the working directory when
/// no home directory can be found.
pub fn config_file() -> PathBuf {
    config_dir()
        .map(|dir| dir.join("config.toml"))
        .unwrap_or_else(|_| PathBuf::from("config.toml"))
}

/// Get the data directory path.
pub fn data_dir() -> Result<PathBuf> {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| Error::config("Could not determine data directory"))
}

/// Get the log directory path.
pub fn log_dir() -> Result<PathBuf> {
    data_dir().map(|dir| dir.join("logs"))
}
