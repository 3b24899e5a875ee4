use std::path::PathBuf;
use thiserror::Error;

/// File synchronization failures.
///
/// None of these are fatal to a theme apply. They travel inside a
/// [`SyncOutcome`](crate::sync::SyncOutcome) so the caller can log them and
/// carry on with the remaining targets.
///
/// # Error Categories
///
/// - [`NotFound`] - the source is missing or is not a regular file
/// - [`Io`] - a copy, link, or directory creation failed
///
/// [`NotFound`]: SyncError::NotFound
/// [`Io`]: SyncError::Io
#[derive(Debug, Error)]
pub enum SyncError {
    /// The source path does not exist or is not a regular file.
    #[error("Source not found: {path}")]
    NotFound { path: PathBuf },

    /// An irrecoverable I/O error while copying `src` to `dst`.
    #[error("Failed to sync {src} -> {dst}: {source}")]
    Io {
        src: PathBuf,
        dst: PathBuf,
        source: std::io::Error,
    },
}

/// A best-effort external action (reload command, signal, settings write)
/// that did not succeed.
///
/// Returned by every [`DesktopSession`](crate::session::DesktopSession)
/// method. Callers decide at the call site whether to log and ignore it,
/// which for reloads is always the case.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// The program needed for the action is not installed.
    #[error("{action}: program '{program}' not found in PATH")]
    ProgramMissing { action: String, program: String },

    /// The program ran but exited unsuccessfully or could not be spawned.
    #[error("{action} failed: {reason}")]
    Failed { action: String, reason: String },
}

impl ActionError {
    pub fn failed(action: impl Into<String>, reason: impl Into<String>) -> Self {
        ActionError::Failed {
            action: action.into(),
            reason: reason.into(),
        }
    }

    pub fn action(&self) -> &str {
        match self {
            ActionError::ProgramMissing { action, .. } | ActionError::Failed { action, .. } => {
                action
            }
        }
    }
}

/// Palette extraction and stylesheet generation failures.
///
/// A failed extraction never produces a file; the previous stylesheet, if
/// any, stays untouched.
#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("Wallpaper not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("Image {path} has no pixels to sample")]
    Empty { path: PathBuf },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A detached extraction did not run to completion.
    #[error("Palette task did not complete: {0}")]
    Task(#[from] TaskError),
}

/// State document persistence failures.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write state file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The one failure [`Deployer::apply_theme`](crate::deploy::Deployer::apply_theme)
/// raises to its caller. Every per-target problem is absorbed and logged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplyError {
    #[error("Theme '{id}' not found")]
    ThemeNotFound { id: String },
}

/// Failures of a task handed to the [`TaskPool`](crate::taskpool::TaskPool).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// The pool was shut down before the task acquired a permit.
    #[error("Task pool closed before the task could run")]
    Closed,

    /// The task panicked while running.
    #[error("Task panicked: {0}")]
    Panicked(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_error_exposes_action_name() {
        let missing = ActionError::ProgramMissing {
            action: "reload window manager".to_string(),
            program: "hyprctl".to_string(),
        };
        assert_eq!(missing.action(), "reload window manager");
        assert!(missing.to_string().contains("hyprctl"));

        let failed = ActionError::failed("signal status bar", "exit status 1");
        assert_eq!(failed.action(), "signal status bar");
        assert_eq!(failed.to_string(), "signal status bar failed: exit status 1");
    }

    #[test]
    fn test_theme_not_found_message() {
        let error = ApplyError::ThemeNotFound {
            id: "nonexistent".to_string(),
        };
        assert_eq!(error.to_string(), "Theme 'nonexistent' not found");
    }
}
