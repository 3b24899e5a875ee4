use std::path::PathBuf;
use thiserror::Error;

/// Directory name below the XDG config home.
pub const APP_DIR: &str = "hyprtheme";

/// Configuration file name inside [`APP_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Failed to determine config directory: {0}")]
    ConfigDir(String),
}

/// The user's config home, `~/.config` on Unix like the rest of the
/// Hyprland tooling, otherwise the platform default.
pub fn get_config_home() -> Result<PathBuf, SetupError> {
    if cfg!(unix) {
        if let Some(home) = dirs::home_dir() {
            return Ok(home.join(".config"));
        }
    }

    dirs::config_dir()
        .ok_or_else(|| SetupError::ConfigDir("Unable to determine config directory".to_string()))
}

/// Get the standard configuration directory for the current platform
pub fn get_config_dir() -> Result<PathBuf, SetupError> {
    Ok(get_config_home()?.join(APP_DIR))
}

/// Get the standard configuration file path
pub fn get_config_file_path() -> Result<PathBuf, SetupError> {
    Ok(get_config_dir()?.join(CONFIG_FILE))
}
