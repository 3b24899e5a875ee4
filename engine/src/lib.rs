//! # HyprTheme Engine
//!
//! Theme deployment for a Hyprland desktop. A theme is a directory bundle
//! (window manager config, status bar stylesheet, terminal config, browser
//! userstyles, GTK settings and a wallpaper) that this library pushes onto
//! the live session, reloading only what actually changed.
//!
//! ## Modules
//!
//! - [`deploy`] - The `apply_theme` orchestrator and its report
//! - [`registry`] - Theme discovery with signature-based caching
//! - [`sync`] - Skip / hardlink / copy primitive for single files and trees
//! - [`palette`] - Wallpaper color extraction into CSS variables
//! - [`session`] - Capability interface for reload commands and settings
//! - [`state`] - Persisted last theme, last wallpaper and turbo flag
//! - [`config`] - Destination paths, worker count and turbo timings
//! - [`taskpool`] - Bounded pool for blocking per-target work
//! - [`common`] - Error types shared across modules
//!
//! ## Example
//!
//! ```no_run
//! use engine::config::{EngineConfig, TargetPaths};
//! use engine::deploy::Deployer;
//! use engine::session::HyprlandSession;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let paths = TargetPaths::detect().ok_or("no home directory")?;
//! let deployer = Deployer::from_config(EngineConfig::new(paths), Arc::new(HyprlandSession));
//! let report = deployer.apply_theme("dracula").await?;
//! if let Some(palette) = report.palette {
//!     palette.wait().await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod config;
pub mod deploy;
pub mod palette;
pub mod registry;
pub mod session;
pub mod state;
pub mod sync;
pub mod taskpool;
