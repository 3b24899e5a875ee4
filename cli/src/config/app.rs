use super::{LoggingConfig, limits::*, validation::ConfigValidationError};
use engine::config::{DEFAULT_CURSOR_SIZE, DEFAULT_WORKERS, EngineConfig, TargetPaths};
use engine::registry::expand_tilde;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Overrides for individual deployment destinations.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TargetsConfig {
    hypr_config: Option<String>,
    waybar_css: Option<String>,
    ghostty_dir: Option<String>,
}

/// Main application configuration
#[derive(Debug, Default, Clone, Deserialize)]
pub struct AppConfig {
    themes_dir: Option<String>,
    state_file: Option<String>,
    palette_css: Option<String>,
    workers: Option<usize>,
    cursor_size: Option<u32>,

    #[serde(default)]
    targets: TargetsConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

impl AppConfig {
    /// Validate the configuration against defined limits
    pub fn validate(&self) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        let workers = self.workers();
        if !(MIN_WORKERS..=MAX_WORKERS).contains(&workers) {
            errors.push(ConfigValidationError::Workers {
                configured: workers,
                min_limit: MIN_WORKERS,
                max_limit: MAX_WORKERS,
            });
        }

        let cursor_size = self.cursor_size();
        if !(MIN_CURSOR_SIZE..=MAX_CURSOR_SIZE).contains(&cursor_size) {
            errors.push(ConfigValidationError::CursorSize {
                configured: cursor_size,
                min_limit: MIN_CURSOR_SIZE,
                max_limit: MAX_CURSOR_SIZE,
            });
        }

        if crate::logger::parse_level(self.logging.level()).is_none() {
            errors.push(ConfigValidationError::LogLevel {
                configured: self.logging.level().to_string(),
            });
        }

        let paths = [
            ("themes_dir", &self.themes_dir),
            ("state_file", &self.state_file),
            ("palette_css", &self.palette_css),
            ("targets.hypr_config", &self.targets.hypr_config),
            ("targets.waybar_css", &self.targets.waybar_css),
            ("targets.ghostty_dir", &self.targets.ghostty_dir),
        ];
        for (key, value) in paths {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                errors.push(ConfigValidationError::EmptyPath { key });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn workers(&self) -> usize {
        self.workers.unwrap_or(DEFAULT_WORKERS)
    }

    pub fn cursor_size(&self) -> u32 {
        self.cursor_size.unwrap_or(DEFAULT_CURSOR_SIZE)
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    /// Destination layout: the conventional one below `config_home`, with
    /// every configured path taking precedence.
    pub fn target_paths(&self, config_home: &Path) -> TargetPaths {
        let mut paths = TargetPaths::under(config_home);
        let overrides: [(&Option<String>, &mut PathBuf); 6] = [
            (&self.themes_dir, &mut paths.themes_dir),
            (&self.state_file, &mut paths.state_file),
            (&self.palette_css, &mut paths.palette_css),
            (&self.targets.hypr_config, &mut paths.hypr_config),
            (&self.targets.waybar_css, &mut paths.waybar_css),
            (&self.targets.ghostty_dir, &mut paths.ghostty_dir),
        ];
        for (value, slot) in overrides {
            if let Some(value) = value {
                *slot = expand_tilde(value);
            }
        }
        paths
    }

    pub fn engine_config(&self, config_home: &Path) -> EngineConfig {
        EngineConfig::new(self.target_paths(config_home))
            .with_workers(self.workers())
            .with_cursor_size(self.cursor_size())
    }

    /// Every setting with defaults filled in, as `hyprtheme config` prints it.
    pub fn effective(&self, config_home: &Path) -> EffectiveConfig {
        let paths = self.target_paths(config_home);
        EffectiveConfig {
            themes_dir: paths.themes_dir,
            state_file: paths.state_file,
            palette_css: paths.palette_css,
            workers: self.workers(),
            cursor_size: self.cursor_size(),
            targets: EffectiveTargets {
                hypr_config: paths.hypr_config,
                waybar_css: paths.waybar_css,
                ghostty_dir: paths.ghostty_dir,
            },
            logging: EffectiveLogging {
                level: self.logging.level().to_string(),
                file: self.logging.file().map(str::to_string),
            },
        }
    }
}

/// Resolved configuration; plain values come before tables so it renders as
/// valid TOML.
#[derive(Debug, Serialize)]
pub struct EffectiveConfig {
    pub themes_dir: PathBuf,
    pub state_file: PathBuf,
    pub palette_css: PathBuf,
    pub workers: usize,
    pub cursor_size: u32,
    pub targets: EffectiveTargets,
    pub logging: EffectiveLogging,
}

#[derive(Debug, Serialize)]
pub struct EffectiveTargets {
    pub hypr_config: PathBuf,
    pub waybar_css: PathBuf,
    pub ghostty_dir: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct EffectiveLogging {
    pub level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}
