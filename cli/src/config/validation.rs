use super::app::AppConfig;

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid workers: {configured} (min: {min_limit}, max: {max_limit})")]
    Workers {
        configured: usize,
        min_limit: usize,
        max_limit: usize,
    },
    #[error("Invalid cursor_size: {configured} (min: {min_limit}, max: {max_limit})")]
    CursorSize {
        configured: u32,
        min_limit: u32,
        max_limit: u32,
    },
    #[error("Invalid logging.level: {configured}")]
    LogLevel { configured: String },
    #[error("Empty path for {key}")]
    EmptyPath { key: &'static str },
}

impl ConfigValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigValidationError::Workers {
                configured,
                min_limit,
                max_limit,
            } => {
                format!(
                    "Worker count out of range!\n\n\
                    Your configured value: {configured}\n\
                    Valid range: {min_limit} - {max_limit}\n\n\
                    Please update workers in config.toml to a value between {min_limit} and {max_limit}."
                )
            }
            ConfigValidationError::CursorSize {
                configured,
                min_limit,
                max_limit,
            } => {
                format!(
                    "Cursor size out of range!\n\n\
                    Your configured value: {configured}\n\
                    Valid range: {min_limit} - {max_limit}\n\n\
                    Please update cursor_size in config.toml to a value between {min_limit} and {max_limit}."
                )
            }
            ConfigValidationError::LogLevel { configured } => {
                format!(
                    "Unknown log level!\n\n\
                    Your configured value: {configured}\n\
                    Valid values: trace, debug, info, warn, error\n\n\
                    Please update level in the [logging] section of config.toml."
                )
            }
            ConfigValidationError::EmptyPath { key } => {
                format!(
                    "Empty path!\n\n\
                    The setting {key} is present but empty.\n\n\
                    Please remove it from config.toml to use the default location."
                )
            }
        }
    }
}

/// Configuration loading result
#[derive(Debug)]
pub enum ConfigLoadResult {
    Success(Box<AppConfig>),
    LoadError(String),
    DeserializeError(String),
}

impl ConfigLoadResult {
    /// Collapse the load outcome into a validated configuration.
    pub fn into_validated(self) -> crate::error::AppResult<AppConfig> {
        match self {
            ConfigLoadResult::Success(config) => {
                config
                    .validate()
                    .map_err(crate::error::AppError::InvalidConfig)?;
                Ok(*config)
            }
            ConfigLoadResult::LoadError(msg) | ConfigLoadResult::DeserializeError(msg) => {
                Err(crate::error::AppError::Config(msg))
            }
        }
    }
}
