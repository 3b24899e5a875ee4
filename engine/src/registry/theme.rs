use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the descriptor file inside every theme directory.
pub const DESCRIPTOR_FILE: &str = "theme.json";

const DEFAULT_HYPR_CONF: &str = "hyprland.conf";
const DEFAULT_WAYBAR_CSS: &str = "waybar.css";
const DEFAULT_GHOSTTY_SRC: &str = "ghostty";
const DEFAULT_GHOSTTY_TARGET: &str = "config";

/// Raw `theme.json` content. Every field is optional; unknown keys are
/// ignored and empty strings mean "not provided".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ThemeDescriptor {
    pub name: Option<String>,
    pub hyprland_conf: Option<String>,
    pub waybar_css: Option<String>,
    pub wallpaper: Option<String>,
    pub preview: Option<String>,
    pub preview_image: Option<String>,

    pub gtk_theme: Option<String>,
    pub gtk_icon_theme: Option<String>,
    pub gtk_cursor_theme: Option<String>,
    pub gtk_font_name: Option<String>,
    pub adw_color_scheme: Option<String>,

    pub ghostty_src: Option<String>,
    pub ghostty_target: Option<String>,

    pub zen_profile_dir: Option<String>,
    pub zen_userchrome: Option<String>,
    pub zen_usercontent: Option<String>,
}

/// libadwaita color-scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorScheme {
    Default,
    PreferDark,
    PreferLight,
}

impl ColorScheme {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "default" => Some(ColorScheme::Default),
            "prefer-dark" => Some(ColorScheme::PreferDark),
            "prefer-light" => Some(ColorScheme::PreferLight),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorScheme::Default => "default",
            ColorScheme::PreferDark => "prefer-dark",
            ColorScheme::PreferLight => "prefer-light",
        }
    }
}

/// GTK interface identifiers. `None` leaves the current value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DesktopSettings {
    pub gtk_theme: Option<String>,
    pub icon_theme: Option<String>,
    pub cursor_theme: Option<String>,
    pub font_name: Option<String>,
    pub color_scheme: Option<ColorScheme>,
}

impl DesktopSettings {
    /// `(gsettings key, value)` pairs for every identifier that is set.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        let mut entries = Vec::new();
        if let Some(v) = &self.gtk_theme {
            entries.push(("gtk-theme", v.as_str()));
        }
        if let Some(v) = &self.icon_theme {
            entries.push(("icon-theme", v.as_str()));
        }
        if let Some(v) = &self.cursor_theme {
            entries.push(("cursor-theme", v.as_str()));
        }
        if let Some(v) = &self.font_name {
            entries.push(("font-name", v.as_str()));
        }
        if let Some(scheme) = self.color_scheme {
            entries.push(("color-scheme", scheme.as_str()));
        }
        entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

/// Ghostty configuration source: a single file or a directory to mirror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerminalSource {
    pub src: PathBuf,
    /// Destination file name below the Ghostty config directory.
    pub target: String,
    /// Single-file fallback tried when `src` is absent.
    pub legacy: PathBuf,
}

/// Zen browser profile userstyles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowserProfile {
    pub profile_dir: PathBuf,
    pub user_chrome: Option<PathBuf>,
    pub user_content: Option<PathBuf>,
}

impl BrowserProfile {
    pub fn chrome_dir(&self) -> PathBuf {
        self.profile_dir.join("chrome")
    }

    /// `(source, destination)` pairs for the configured userstyles.
    pub fn files(&self) -> Vec<(PathBuf, PathBuf)> {
        let chrome = self.chrome_dir();
        let mut files = Vec::new();
        if let Some(src) = &self.user_chrome {
            files.push((src.clone(), chrome.join("userChrome.css")));
        }
        if let Some(src) = &self.user_content {
            files.push((src.clone(), chrome.join("userContent.css")));
        }
        files
    }
}

/// A theme as resolved from its directory and descriptor. Every path is
/// absolute (or relative to the process if the themes root was).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub id: String,
    pub name: String,
    pub dir: PathBuf,
    pub hypr_config: PathBuf,
    pub waybar_css: PathBuf,
    pub wallpaper: Option<PathBuf>,
    pub preview: Option<PathBuf>,
    pub terminal: TerminalSource,
    pub browser: Option<BrowserProfile>,
    pub desktop: DesktopSettings,
}

impl Theme {
    pub fn from_descriptor(id: &str, dir: &Path, desc: ThemeDescriptor) -> Self {
        let resolve = |rel: &str| dir.join(rel);

        let wallpaper_rel = non_empty(desc.wallpaper);
        let preview_rel = non_empty(desc.preview)
            .or_else(|| non_empty(desc.preview_image))
            .or_else(|| wallpaper_rel.clone());

        let terminal_target = non_empty(desc.ghostty_target)
            .map(|t| t.trim_matches('/').to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_GHOSTTY_TARGET.to_string());

        let browser = non_empty(desc.zen_profile_dir).map(|profile| BrowserProfile {
            profile_dir: expand_tilde(&profile),
            user_chrome: non_empty(desc.zen_userchrome).map(|r| resolve(&r)),
            user_content: non_empty(desc.zen_usercontent).map(|r| resolve(&r)),
        });

        Self {
            id: id.to_string(),
            name: non_empty(desc.name).unwrap_or_else(|| id.to_string()),
            dir: dir.to_path_buf(),
            hypr_config: resolve(
                &non_empty(desc.hyprland_conf).unwrap_or_else(|| DEFAULT_HYPR_CONF.to_string()),
            ),
            waybar_css: resolve(
                &non_empty(desc.waybar_css).unwrap_or_else(|| DEFAULT_WAYBAR_CSS.to_string()),
            ),
            wallpaper: wallpaper_rel.map(|r| resolve(&r)),
            preview: preview_rel.map(|r| resolve(&r)),
            terminal: TerminalSource {
                src: resolve(
                    &non_empty(desc.ghostty_src)
                        .unwrap_or_else(|| DEFAULT_GHOSTTY_SRC.to_string()),
                ),
                target: terminal_target,
                legacy: resolve(DEFAULT_GHOSTTY_SRC),
            },
            browser,
            desktop: DesktopSettings {
                gtk_theme: non_empty(desc.gtk_theme),
                icon_theme: non_empty(desc.gtk_icon_theme),
                cursor_theme: non_empty(desc.gtk_cursor_theme),
                font_name: non_empty(desc.gtk_font_name),
                color_scheme: non_empty(desc.adw_color_scheme)
                    .and_then(|s| ColorScheme::parse(&s)),
            },
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Expand a leading `~` to the home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
