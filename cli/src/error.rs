//! Error handling for the `hyprtheme` command line.
//!
//! Every engine failure a command can surface is folded into [`AppError`] so
//! `main` has one type to report. Per-target deployment problems never get
//! here; the engine absorbs them into the apply report.

use crate::config::ConfigValidationError;
use crate::validation::ThemeIdError;
use engine::common::{ApplyError, PaletteError, StateError};
use thiserror::Error;

/// Failures a command can end with.
#[derive(Debug, Error)]
pub enum AppError {
    /// The configuration could not be read or deserialized.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The configuration was read but some values are out of range.
    #[error("Invalid configuration ({} problem(s))", .0.len())]
    InvalidConfig(Vec<ConfigValidationError>),

    /// The user's home or config directory could not be determined.
    #[error("Unable to determine the configuration directory")]
    NoConfigDir,

    #[error(transparent)]
    ThemeId(#[from] ThemeIdError),

    #[error(transparent)]
    Apply(#[from] ApplyError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Palette(#[from] PaletteError),

    #[error("Failed to render output: {0}")]
    Render(String),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl AppError {
    /// Text shown to the user in place of the one-line `Display` form.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidConfig(errors) => errors
                .iter()
                .map(ConfigValidationError::user_message)
                .collect::<Vec<_>>()
                .join("\n\n"),
            other => other.to_string(),
        }
    }
}

/// Result type alias for command line operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Render(err.to_string())
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(err: toml::ser::Error) -> Self {
        AppError::Render(err.to_string())
    }
}
