//! # hyprtheme
//!
//! Command line front end for the theme deployment engine.
//!
//! ## Modules
//!
//! - [`args`] - Command line arguments
//! - [`commands`] - One function per subcommand
//! - [`config`] - Configuration loading and validation
//! - [`error`] - Error types
//! - [`logger`] - Logging configuration
//! - [`validation`] - Input validation
//!
//! This library interface enables integration testing by providing access to internal modules.

pub mod args;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod validation;

pub use error::{AppError, AppResult};
pub use validation::Validator;
