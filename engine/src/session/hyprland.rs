use super::{DesktopSession, INTERFACE_SCHEMA};
use crate::common::ActionError;
use std::fs::File;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, SystemTime};

const WALLPAPER_DAEMON: &str = "swww-daemon";

/// Hyprland session driven through its command-line tools: `hyprctl`,
/// `pkill`, `ghostty`, `swww` and `gsettings`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HyprlandSession;

impl HyprlandSession {
    pub fn new() -> Self {
        Self
    }
}

/// Resolve `program` on `PATH` so a missing tool is reported as such
/// instead of as a generic spawn failure.
fn locate(action: &str, program: &str) -> Result<std::path::PathBuf, ActionError> {
    which::which(program).map_err(|_| ActionError::ProgramMissing {
        action: action.to_string(),
        program: program.to_string(),
    })
}

/// Run to completion and capture stdout. Non-zero exit is a failure.
fn output(action: &str, program: &str, args: &[&str]) -> Result<String, ActionError> {
    let binary = locate(action, program)?;
    let out = Command::new(binary)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| ActionError::failed(action, e.to_string()))?;

    if !out.status.success() {
        let stderr = String::from_utf8_lossy(&out.stderr);
        let reason = match stderr.trim() {
            "" => format!("{program} exited with {}", out.status),
            msg => format!("{program} exited with {}: {msg}", out.status),
        };
        return Err(ActionError::failed(action, reason));
    }
    Ok(String::from_utf8_lossy(&out.stdout).into_owned())
}

fn run(action: &str, program: &str, args: &[&str]) -> Result<(), ActionError> {
    output(action, program, args).map(|_| ())
}

/// `gsettings get` prints strings single-quoted.
fn unquote(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(trimmed)
        .to_string()
}

impl DesktopSession for HyprlandSession {
    fn reload_window_manager(&self) -> Result<(), ActionError> {
        run("reload window manager", "hyprctl", &["reload"])
    }

    fn signal_status_bar(&self) -> Result<(), ActionError> {
        run("signal status bar", "pkill", &["-SIGUSR2", "waybar"])
    }

    fn reload_terminal(&self, config: Option<&Path>) -> Result<(), ActionError> {
        const ACTION: &str = "reload terminal";
        if let Some(config) = config.filter(|c| c.exists()) {
            File::open(config)
                .and_then(|f| f.set_modified(SystemTime::now()))
                .map_err(|e| {
                    ActionError::failed(ACTION, format!("touch {}: {e}", config.display()))
                })?;
        }
        run(ACTION, "ghostty", &["+action=reload-config"])
    }

    fn ensure_wallpaper_daemon(&self, settle: Duration) -> Result<(), ActionError> {
        const ACTION: &str = "start wallpaper daemon";
        let running = output(ACTION, "pgrep", &["-x", WALLPAPER_DAEMON])
            .map(|pids| !pids.trim().is_empty())
            .unwrap_or(false);
        if running {
            return Ok(());
        }

        let binary = locate(ACTION, WALLPAPER_DAEMON)?;
        Command::new(binary)
            .args(["--format", "xrgb"])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ActionError::failed(ACTION, e.to_string()))?;
        log::info!("Started {WALLPAPER_DAEMON}");
        std::thread::sleep(settle);
        Ok(())
    }

    fn set_wallpaper(&self, image: &Path, transition: Duration) -> Result<(), ActionError> {
        let image = image.to_string_lossy();
        let duration = format!("{:.2}", transition.as_secs_f64());
        run(
            "set wallpaper",
            "swww",
            &[
                "img",
                &image,
                "--transition-type",
                "any",
                "--transition-fps",
                "144",
                "--transition-step",
                "144",
                "--invert-y",
                "--transition-duration",
                &duration,
            ],
        )
    }

    fn read_setting(&self, key: &str) -> Result<Option<String>, ActionError> {
        let raw = output("read setting", "gsettings", &["get", INTERFACE_SCHEMA, key])?;
        let value = unquote(&raw);
        Ok((!value.is_empty()).then_some(value))
    }

    fn write_setting(&self, key: &str, value: &str) -> Result<(), ActionError> {
        run(
            "write setting",
            "gsettings",
            &["set", INTERFACE_SCHEMA, key, value],
        )
    }

    fn set_cursor(&self, theme: &str, size: u32) -> Result<(), ActionError> {
        run(
            "set cursor",
            "hyprctl",
            &["setcursor", theme, &size.to_string()],
        )
    }
}
