//! Configuration for the `hyprtheme` command line.
//!
//! Settings come from `~/.config/hyprtheme/config.toml` (optional unless a
//! path is given explicitly) and from `HYPRTHEME__*` environment variables,
//! which take precedence. `HYPRTHEME__TARGETS__HYPR_CONFIG` sets
//! `[targets] hypr_config`.

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::Path;

pub mod app;
pub mod limits;
pub mod setup;
pub mod validation;

pub use app::{AppConfig, EffectiveConfig};
pub use validation::{ConfigLoadResult, ConfigValidationError};

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "HYPRTHEME";

/// Load configuration from `path`, or from the standard location when no
/// path is given. An explicit path must exist; the standard one may not.
pub fn load_config(path: Option<&Path>) -> ConfigLoadResult {
    let (file, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => match setup::get_config_file_path() {
            Ok(path) => (path, false),
            Err(e) => return ConfigLoadResult::LoadError(e.to_string()),
        },
    };
    load_from(&file, required, Environment::with_prefix(ENV_PREFIX))
}

fn load_from(file: &Path, required: bool, env: Environment) -> ConfigLoadResult {
    let file_source = File::from(file.to_path_buf())
        .format(FileFormat::Toml)
        .required(required);
    let env_source = env.separator("__").try_parsing(true);

    let config = match Config::builder()
        .add_source(file_source)
        .add_source(env_source)
        .build()
    {
        Ok(config) => config,
        Err(e) => {
            return ConfigLoadResult::LoadError(format!(
                "Configuration loading failed: {e}. Please check {} and HYPRTHEME__* environment variables.",
                file.display()
            ));
        }
    };

    match config.try_deserialize::<AppConfig>() {
        Ok(app_config) => ConfigLoadResult::Success(Box::new(app_config)),
        Err(e) => ConfigLoadResult::DeserializeError(format!("Failed to deserialize config: {e}")),
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct LoggingConfig {
    level: Option<String>,
    file: Option<String>,
}

impl LoggingConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }
}
