//! # Desktop Session
//!
//! Every operation that crosses the process boundary goes through
//! [`DesktopSession`]: reload commands, signals, the wallpaper daemon,
//! interface settings and the live cursor. The engine never spawns a
//! process itself, which keeps the orchestrator testable with a recording
//! fake.
//!
//! All methods are best effort. They return [`ActionError`] and the caller
//! decides, at the call site, to log and continue.

mod hyprland;
mod settings;

pub use hyprland::HyprlandSession;
pub use settings::{SettingsOutcome, apply_desktop_settings};

use crate::common::ActionError;
use std::path::Path;
use std::time::Duration;

/// Schema holding the GTK interface keys.
pub const INTERFACE_SCHEMA: &str = "org.gnome.desktop.interface";

/// Capability interface for the live desktop.
pub trait DesktopSession: Send + Sync {
    /// Ask the window manager to re-read its configuration.
    fn reload_window_manager(&self) -> Result<(), ActionError>;

    /// Tell the status bar to reload its stylesheet.
    fn signal_status_bar(&self) -> Result<(), ActionError>;

    /// Touch `config` (when given) and ask running terminals to reload.
    fn reload_terminal(&self, config: Option<&Path>) -> Result<(), ActionError>;

    /// Start the wallpaper daemon if it is not running, then wait `settle`.
    fn ensure_wallpaper_daemon(&self, settle: Duration) -> Result<(), ActionError>;

    /// Display `image` with a transition of length `transition`.
    fn set_wallpaper(&self, image: &Path, transition: Duration) -> Result<(), ActionError>;

    /// Current value of an interface setting, `None` when unset.
    fn read_setting(&self, key: &str) -> Result<Option<String>, ActionError>;

    fn write_setting(&self, key: &str, value: &str) -> Result<(), ActionError>;

    /// Apply a cursor theme to the running session.
    fn set_cursor(&self, theme: &str, size: u32) -> Result<(), ActionError>;
}
