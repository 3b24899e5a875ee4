use crate::config::LoggingConfig;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use std::fs::OpenOptions;

/// Map a configured level name to a filter, case-insensitively.
pub fn parse_level(level: &str) -> Option<LevelFilter> {
    match level.to_lowercase().as_str() {
        "trace" => Some(LevelFilter::Trace),
        "debug" => Some(LevelFilter::Debug),
        "info" => Some(LevelFilter::Info),
        "warn" | "warning" => Some(LevelFilter::Warn),
        "error" => Some(LevelFilter::Error),
        "off" => Some(LevelFilter::Off),
        _ => None,
    }
}

/// Effective level: each `--verbose` raises the configured level one step.
pub fn effective_level(logging: &LoggingConfig, verbose: u8) -> LevelFilter {
    let configured = parse_level(logging.level()).unwrap_or(LevelFilter::Info);
    match verbose {
        0 => configured,
        1 => configured.max(LevelFilter::Debug),
        _ => LevelFilter::Trace,
    }
}

pub fn setup_logger(logging: &LoggingConfig, verbose: u8) -> Result<(), log::SetLoggerError> {
    let log_level = effective_level(logging, verbose);

    let colors = ColoredLevelConfig::new()
        .trace(Color::BrightBlack)
        .debug(Color::BrightBlue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    // Base configuration for all outputs
    let mut base_config = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(log_level)
        .chain(std::io::stderr());

    if let Some(file_path) = logging.file() {
        match OpenOptions::new().create(true).append(true).open(file_path) {
            Ok(file) => {
                base_config = base_config.chain(file);
            }
            Err(e) => {
                eprintln!("Warning: Failed to open log file '{file_path}': {e}");
                eprintln!("Continuing without file logging.");
            }
        }
    }

    base_config.apply()?;

    log::debug!("Logger initialized with level: {log_level}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logging(level: &str) -> LoggingConfig {
        toml::from_str(&format!("level = \"{level}\"")).unwrap()
    }

    #[test]
    fn test_parse_level_is_case_insensitive() {
        assert_eq!(parse_level("DEBUG"), Some(LevelFilter::Debug));
        assert_eq!(parse_level("Warning"), Some(LevelFilter::Warn));
        assert_eq!(parse_level("chatty"), None);
    }

    #[test]
    fn test_verbose_raises_but_never_lowers() {
        assert_eq!(effective_level(&logging("warn"), 0), LevelFilter::Warn);
        assert_eq!(effective_level(&logging("warn"), 1), LevelFilter::Debug);
        assert_eq!(effective_level(&logging("trace"), 1), LevelFilter::Trace);
        assert_eq!(effective_level(&logging("error"), 3), LevelFilter::Trace);
        assert_eq!(
            effective_level(&LoggingConfig::default(), 0),
            LevelFilter::Info
        );
    }
}
