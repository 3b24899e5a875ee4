//! Engine configuration: where themes live, where each target's files go,
//! and the latency knobs that depend on the turbo flag.
//!
//! Everything the engine touches on disk is named here so tests can point a
//! [`Deployer`](crate::deploy::Deployer) at a temporary home directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default number of concurrent per-target workers.
pub const DEFAULT_WORKERS: usize = 4;

/// Default cursor size passed to the compositor.
pub const DEFAULT_CURSOR_SIZE: u32 = 24;

/// Fixed destination paths for every deployment target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPaths {
    /// Root directory scanned for theme bundles.
    pub themes_dir: PathBuf,
    /// Persisted application state document.
    pub state_file: PathBuf,
    /// Generated palette stylesheet.
    pub palette_css: PathBuf,
    /// Hyprland configuration file.
    pub hypr_config: PathBuf,
    /// Waybar stylesheet that the bar imports.
    pub waybar_css: PathBuf,
    /// Ghostty configuration directory.
    pub ghostty_dir: PathBuf,
}

impl TargetPaths {
    /// Conventional XDG layout below `config_home` (usually `~/.config`).
    pub fn under(config_home: &Path) -> Self {
        let app_dir = config_home.join("hyprtheme");
        Self {
            themes_dir: app_dir.join("themes"),
            state_file: app_dir.join("state.json"),
            palette_css: app_dir.join("style-vars.css"),
            hypr_config: config_home.join("hypr").join("hyprland.conf"),
            waybar_css: config_home.join("waybar").join("theme.css"),
            ghostty_dir: config_home.join("ghostty"),
        }
    }

    /// Resolve the layout for the current user.
    ///
    /// Prefers `~/.config` on Unix like the rest of the Hyprland ecosystem,
    /// falling back to the platform config directory.
    pub fn detect() -> Option<Self> {
        let config_home = if cfg!(unix) {
            dirs::home_dir().map(|home| home.join(".config"))
        } else {
            None
        }
        .or_else(dirs::config_dir)?;
        Some(Self::under(&config_home))
    }

    /// Default Ghostty configuration file.
    pub fn ghostty_config(&self) -> PathBuf {
        self.ghostty_dir.join("config")
    }

    /// Create every directory a deployment writes into.
    pub fn ensure_dirs(&self) -> io::Result<()> {
        let dirs = [
            self.hypr_config.parent(),
            self.waybar_css.parent(),
            Some(self.ghostty_dir.as_path()),
            self.state_file.parent(),
        ];
        for dir in dirs.into_iter().flatten() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        Ok(())
    }
}

/// Everything a [`Deployer`](crate::deploy::Deployer) needs besides its
/// injected collaborators.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub paths: TargetPaths,
    pub workers: usize,
    pub cursor_size: u32,
}

impl EngineConfig {
    pub fn new(paths: TargetPaths) -> Self {
        Self {
            paths,
            workers: DEFAULT_WORKERS,
            cursor_size: DEFAULT_CURSOR_SIZE,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_cursor_size(mut self, cursor_size: u32) -> Self {
        self.cursor_size = cursor_size;
        self
    }
}

/// External durations tuned by the turbo flag. Only latency changes with
/// turbo, never the end result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tuning {
    /// Wallpaper transition length handed to the daemon.
    pub wallpaper_transition: Duration,
    /// Wait after starting the wallpaper daemon before talking to it.
    pub daemon_settle: Duration,
}

impl Tuning {
    pub fn for_turbo(turbo: bool) -> Self {
        if turbo {
            Self {
                wallpaper_transition: Duration::from_millis(180),
                daemon_settle: Duration::from_millis(150),
            }
        } else {
            Self {
                wallpaper_transition: Duration::from_millis(420),
                daemon_settle: Duration::from_millis(250),
            }
        }
    }
}
