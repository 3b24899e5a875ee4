use super::DESCRIPTOR_FILE;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

/// Signature of a themes root that does not exist.
const EMPTY_SIGNATURE: &str = "empty";

/// Descriptor metadata used for change detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    pub modified_nanos: u128,
    pub size: u64,
}

impl Fingerprint {
    pub fn of(path: &Path) -> Option<Self> {
        let meta = fs::metadata(path).ok()?;
        if !meta.is_file() {
            return None;
        }
        let modified_nanos = meta
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        Some(Self {
            modified_nanos,
            size: meta.len(),
        })
    }
}

/// One immediate subdirectory of the themes root.
#[derive(Debug, Clone)]
pub(super) struct ThemeDir {
    pub id: String,
    pub path: PathBuf,
    /// `None` when the directory has no descriptor.
    pub fingerprint: Option<Fingerprint>,
}

/// List theme directories in lexicographic order. `None` when the root
/// cannot be read at all.
pub(super) fn scan_root(root: &Path) -> Option<Vec<ThemeDir>> {
    let read = match fs::read_dir(root) {
        Ok(read) => read,
        Err(e) => {
            if root.exists() {
                log::warn!("Cannot read themes directory {}: {e}", root.display());
            }
            return None;
        }
    };

    let mut dirs: Vec<ThemeDir> = read
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| {
            let path = entry.path();
            let Ok(id) = entry.file_name().into_string() else {
                log::warn!("Skipping theme directory with non UTF-8 name: {}", path.display());
                return None;
            };
            Some(ThemeDir {
                fingerprint: Fingerprint::of(&path.join(DESCRIPTOR_FILE)),
                id,
                path,
            })
        })
        .collect();
    dirs.sort_by(|a, b| a.id.cmp(&b.id));
    Some(dirs)
}

/// SHA-256 over `name:mtime:size` of every theme directory, in order.
pub(super) fn signature_of(dirs: Option<&[ThemeDir]>) -> String {
    let Some(dirs) = dirs else {
        return EMPTY_SIGNATURE.to_string();
    };

    let mut hasher = Sha256::new();
    for dir in dirs {
        let (modified, size) = dir
            .fingerprint
            .map(|f| (f.modified_nanos, f.size))
            .unwrap_or_default();
        hasher.update(format!("{}:{modified}:{size}\n", dir.id).as_bytes());
    }
    format!("{:x}", hasher.finalize())
}
