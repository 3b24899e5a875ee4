use crate::common::StateError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tempfile::NamedTempFile;

/// Persisted application state.
///
/// Keys this version does not know about are kept in `extra` and written
/// back untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_theme: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_wallpaper: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turbo: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// File-backed store for [`AppState`] with an in-memory turbo mirror.
#[derive(Debug)]
pub struct StateStore {
    path: PathBuf,
    turbo: AtomicBool,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            turbo: AtomicBool::new(true),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document. A missing or unreadable file is empty state.
    pub fn load(&self) -> AppState {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return AppState::default(),
            Err(e) => {
                log::warn!("Failed to read state file {}: {e}", self.path.display());
                return AppState::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(state) => state,
            Err(e) => {
                log::warn!(
                    "Ignoring malformed state file {}: {e}",
                    self.path.display()
                );
                AppState::default()
            }
        }
    }

    /// Replace the document with `state`, stamping `updated_at`.
    ///
    /// Written to a sibling temporary file first and renamed into place so a
    /// concurrent reader never sees half a document.
    pub fn save(&self, state: &AppState) -> Result<(), StateError> {
        let mut stamped = state.clone();
        stamped.updated_at = Some(Utc::now());
        let body = serde_json::to_string_pretty(&stamped)?;

        let write_err = |source| StateError::Write {
            path: self.path.clone(),
            source,
        };

        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(write_err)?;

        // Unique temporary name: concurrent applies each stage their own file.
        let mut tmp = NamedTempFile::new_in(parent).map_err(write_err)?;
        tmp.write_all(body.as_bytes()).map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;

        log::debug!("Saved state to {}", self.path.display());
        Ok(())
    }

    /// Current turbo preference.
    ///
    /// The persisted value wins when present so a flag changed by another
    /// process is honored; otherwise the in-memory value is used.
    pub fn get_turbo(&self) -> bool {
        self.turbo_of(&self.load())
    }

    /// Turbo preference as recorded in an already loaded `state`.
    pub fn turbo_of(&self, state: &AppState) -> bool {
        if let Some(persisted) = state.turbo {
            self.turbo.store(persisted, Ordering::Relaxed);
        }
        self.turbo.load(Ordering::Relaxed)
    }

    /// Update the turbo preference in memory and on disk.
    pub fn set_turbo(&self, enabled: bool) -> Result<(), StateError> {
        self.turbo.store(enabled, Ordering::Relaxed);
        let mut state = self.load();
        state.turbo = Some(enabled);
        self.save(&state)
    }
}
