//! # Theme Registry
//!
//! Discovers theme bundles below a themes root and keeps the parsed list
//! cached behind a cheap directory signature.
//!
//! A listing costs one `read_dir` plus one `stat` per theme when nothing
//! changed. When the signature moves, only descriptors whose own
//! `(mtime, size)` fingerprint moved are parsed again.
//!
//! ## Layout
//!
//! ```text
//! themes/
//! ├── dracula/
//! │   ├── theme.json
//! │   ├── hyprland.conf
//! │   ├── waybar.css
//! │   └── wall.png
//! └── nord/
//!     └── theme.json
//! ```

mod scan;
mod theme;

pub use scan::Fingerprint;
pub use theme::{
    BrowserProfile, ColorScheme, DESCRIPTOR_FILE, DesktopSettings, TerminalSource, Theme,
    ThemeDescriptor, expand_tilde,
};

use scan::{ThemeDir, signature_of};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// An immutable `{signature, themes}` pair. Replaced as one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrySnapshot {
    pub signature: String,
    pub themes: Vec<Theme>,
}

impl RegistrySnapshot {
    pub fn find(&self, id: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.id == id)
    }
}

/// Per-descriptor parse result, reused while its fingerprint holds.
#[derive(Debug, Clone)]
struct CachedEntry {
    fingerprint: Fingerprint,
    theme: Option<Theme>,
}

/// Cached view of the themes root.
#[derive(Debug)]
pub struct ThemeRegistry {
    root: PathBuf,
    snapshot: RwLock<Option<Arc<RegistrySnapshot>>>,
    entries: Mutex<HashMap<String, CachedEntry>>,
    parses: AtomicUsize,
}

impl ThemeRegistry {
    pub fn new(themes_dir: impl Into<PathBuf>) -> Self {
        let root = themes_dir.into();
        let root = std::path::absolute(&root).unwrap_or(root);
        Self {
            root,
            snapshot: RwLock::new(None),
            entries: Mutex::new(HashMap::new()),
            parses: AtomicUsize::new(0),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Current directory signature without touching the cache.
    pub fn signature(&self) -> String {
        signature_of(scan::scan_root(&self.root).as_deref())
    }

    /// Number of descriptors parsed since construction.
    pub fn parse_count(&self) -> usize {
        self.parses.load(Ordering::Relaxed)
    }

    /// Up-to-date snapshot, rebuilt only when the signature changed.
    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        let dirs = scan::scan_root(&self.root);
        let signature = signature_of(dirs.as_deref());

        if let Some(current) = self.current() {
            if current.signature == signature {
                return current;
            }
        }

        let themes = self.rebuild(dirs.as_deref().unwrap_or_default());
        log::debug!(
            "Registry rescanned {}: {} theme(s)",
            self.root.display(),
            themes.len()
        );
        let snapshot = Arc::new(RegistrySnapshot { signature, themes });
        *self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(snapshot.clone());
        snapshot
    }

    /// Themes ordered by id.
    pub fn list_themes(&self) -> Vec<Theme> {
        self.snapshot().themes.clone()
    }

    pub fn find(&self, id: &str) -> Option<Theme> {
        self.snapshot().find(id).cloned()
    }

    fn current(&self) -> Option<Arc<RegistrySnapshot>> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn rebuild(&self, dirs: &[ThemeDir]) -> Vec<Theme> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = HashMap::with_capacity(dirs.len());
        let mut themes = Vec::with_capacity(dirs.len());

        for dir in dirs {
            let Some(fingerprint) = dir.fingerprint else {
                continue;
            };

            let entry = match entries.remove(&dir.id) {
                Some(cached) if cached.fingerprint == fingerprint => cached,
                _ => CachedEntry {
                    fingerprint,
                    theme: self.parse(&dir.id, &dir.path),
                },
            };

            if let Some(theme) = &entry.theme {
                themes.push(theme.clone());
            }
            next.insert(dir.id.clone(), entry);
        }

        *entries = next;
        themes
    }

    fn parse(&self, id: &str, dir: &Path) -> Option<Theme> {
        self.parses.fetch_add(1, Ordering::Relaxed);
        let path = dir.join(DESCRIPTOR_FILE);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Failed to read {}: {e}", path.display());
                return None;
            }
        };

        match serde_json::from_str::<ThemeDescriptor>(&content) {
            Ok(desc) => Some(Theme::from_descriptor(id, dir, desc)),
            Err(e) => {
                log::warn!("Skipping theme '{id}', invalid {}: {e}", path.display());
                None
            }
        }
    }
}
