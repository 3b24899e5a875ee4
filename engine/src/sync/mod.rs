//! # File Sync
//!
//! The primitive every file-based target goes through. For one source and
//! one destination it decides between skipping (already identical),
//! hardlinking (turbo), and copying (with a `.bak` of whatever was there),
//! and reports whether the destination actually changed.
//!
//! Failures never escape as errors: a [`SyncOutcome`] carries them next to
//! `changed = false`, so a broken target can never trigger a reload.
//!
//! ```no_run
//! use engine::sync::FileSync;
//!
//! let sync = FileSync::new(true);
//! let outcome = sync.sync_file("themes/nord/hyprland.conf".as_ref(), "/tmp/hyprland.conf".as_ref());
//! if outcome.changed {
//!     // reload the consumer
//! }
//! ```

mod compare;
mod linker;

pub use compare::{file_digest, files_are_same};
pub use linker::{FsLinker, HardLinker};

use crate::common::SyncError;
use std::fs::{self, File, FileTimes};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

/// Suffix appended to a destination's file name before it is overwritten.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Result of syncing one file.
#[derive(Debug, Default)]
pub struct SyncOutcome {
    pub changed: bool,
    pub error: Option<SyncError>,
}

impl SyncOutcome {
    fn unchanged() -> Self {
        Self::default()
    }

    fn changed() -> Self {
        Self {
            changed: true,
            error: None,
        }
    }

    fn failed(error: SyncError) -> Self {
        Self {
            changed: false,
            error: Some(error),
        }
    }
}

/// Skip / link / copy decision maker.
#[derive(Clone)]
pub struct FileSync {
    turbo: bool,
    linker: Arc<dyn HardLinker>,
}

impl std::fmt::Debug for FileSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSync")
            .field("turbo", &self.turbo)
            .finish_non_exhaustive()
    }
}

impl FileSync {
    pub fn new(turbo: bool) -> Self {
        Self::with_linker(turbo, Arc::new(FsLinker))
    }

    pub fn with_linker(turbo: bool, linker: Arc<dyn HardLinker>) -> Self {
        Self { turbo, linker }
    }

    pub fn turbo(&self) -> bool {
        self.turbo
    }

    /// Sync `src` onto `dst`, skipping when the two are already identical.
    pub fn sync_file(&self, src: &Path, dst: &Path) -> SyncOutcome {
        self.sync_file_with(src, dst, true)
    }

    /// Sync `src` onto `dst`. With `skip_when_same = false` the content is
    /// always rewritten.
    pub fn sync_file_with(&self, src: &Path, dst: &Path, skip_when_same: bool) -> SyncOutcome {
        if !src.is_file() {
            log::warn!("Missing source {}", src.display());
            return SyncOutcome::failed(SyncError::NotFound {
                path: src.to_path_buf(),
            });
        }

        if skip_when_same && files_are_same(src, dst) {
            log::debug!("Skipped identical {} == {}", src.display(), dst.display());
            return SyncOutcome::unchanged();
        }

        if let Some(parent) = dst.parent() {
            if let Err(source) = fs::create_dir_all(parent) {
                return report_io(src, dst, source);
            }
        }

        if self.turbo && self.try_link(src, dst) {
            log::info!("Linked {} -> {}", src.display(), dst.display());
            return SyncOutcome::changed();
        }

        if dst.is_file() {
            backup(dst);
            if shares_inode(dst) {
                if let Err(source) = fs::remove_file(dst) {
                    return report_io(src, dst, source);
                }
            }
        }

        match copy_preserving(src, dst) {
            Ok(()) => {
                log::info!("Copied {} -> {}", src.display(), dst.display());
                SyncOutcome::changed()
            }
            Err(source) => report_io(src, dst, source),
        }
    }

    /// Mirror every regular file below `src_dir` into `dst_dir`.
    ///
    /// Directories are created, never linked or copied as a unit. A missing
    /// `src_dir` is a no-op.
    pub fn sync_tree(&self, src_dir: &Path, dst_dir: &Path) -> bool {
        if !src_dir.is_dir() {
            return false;
        }

        let mut changed = false;
        for entry in WalkDir::new(src_dir).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping unreadable entry under {}: {e}", src_dir.display());
                    continue;
                }
            };
            let Ok(rel) = entry.path().strip_prefix(src_dir) else {
                continue;
            };
            let target = dst_dir.join(rel);

            if entry.file_type().is_dir() {
                if let Err(e) = fs::create_dir_all(&target) {
                    log::warn!("Failed to create {}: {e}", target.display());
                }
            } else if entry.file_type().is_file() {
                changed |= self.sync_file(entry.path(), &target).changed;
            }
        }
        changed
    }

    /// Replace `dst` with a hardlink to `src`. Any failure means "use the copy
    /// path instead", so it is only logged at debug level.
    fn try_link(&self, src: &Path, dst: &Path) -> bool {
        if dst.symlink_metadata().is_ok() {
            if let Err(e) = fs::remove_file(dst) {
                log::debug!("Cannot remove {} before linking: {e}", dst.display());
                return false;
            }
        }
        match self.linker.hard_link(src, dst) {
            Ok(()) => true,
            Err(e) => {
                log::debug!(
                    "Hardlink {} -> {} failed, copying instead: {e}",
                    src.display(),
                    dst.display()
                );
                false
            }
        }
    }
}

fn report_io(src: &Path, dst: &Path, source: io::Error) -> SyncOutcome {
    log::error!("Failed to sync {} -> {}: {source}", src.display(), dst.display());
    SyncOutcome::failed(SyncError::Io {
        src: src.to_path_buf(),
        dst: dst.to_path_buf(),
        source,
    })
}

/// Whether `path` is a regular file with more than one link. A destination
/// left linked by an earlier turbo sync shares its inode with another
/// theme's source, and copying into it would rewrite that source.
#[cfg(unix)]
fn shares_inode(path: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_file() && m.nlink() > 1)
}

#[cfg(not(unix))]
fn shares_inode(_path: &Path) -> bool {
    false
}

/// Path a destination is copied aside to before being overwritten.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(BACKUP_SUFFIX);
    path.with_file_name(name)
}

fn backup(path: &Path) {
    let bak = backup_path(path);
    match copy_preserving(path, &bak) {
        Ok(()) => log::info!("Backed up {} -> {}", path.display(), bak.display()),
        Err(e) => log::warn!("Backup of {} failed: {e}", path.display()),
    }
}

/// Copy content and permissions, then carry over access and modification
/// times so the next comparison can take the timestamp fast path.
///
/// Timestamps are set through a read-only handle: the copied permissions may
/// not allow writing, and changing times only requires ownership.
fn copy_preserving(src: &Path, dst: &Path) -> io::Result<()> {
    fs::copy(src, dst)?;
    let meta = fs::metadata(src)?;
    let mut times = FileTimes::new().set_modified(meta.modified()?);
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }
    File::open(dst)?.set_times(times)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_path_appends_suffix() {
        assert_eq!(
            backup_path(Path::new("/x/hypr/hyprland.conf")),
            PathBuf::from("/x/hypr/hyprland.conf.bak")
        );
        assert_eq!(
            backup_path(Path::new("/x/ghostty/config")),
            PathBuf::from("/x/ghostty/config.bak")
        );
    }

    #[test]
    fn test_missing_source_is_reported_not_raised() {
        let tmp = tempfile::tempdir().unwrap();
        let outcome = FileSync::new(false).sync_file(
            &tmp.path().join("nope.conf"),
            &tmp.path().join("out.conf"),
        );

        assert!(!outcome.changed);
        assert!(matches!(outcome.error, Some(SyncError::NotFound { .. })));
        assert!(!tmp.path().join("out.conf").exists());
    }

    #[test]
    fn test_directory_source_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let outcome = FileSync::new(false).sync_file(tmp.path(), &tmp.path().join("out"));
        assert!(matches!(outcome.error, Some(SyncError::NotFound { .. })));
    }

    #[test]
    fn test_copy_backs_up_previous_destination() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src.conf");
        let dst = tmp.path().join("out").join("dst.conf");
        fs::write(&src, "new").unwrap();
        fs::create_dir_all(dst.parent().unwrap()).unwrap();
        fs::write(&dst, "old!").unwrap();

        let outcome = FileSync::new(false).sync_file(&src, &dst);

        assert!(outcome.changed);
        assert!(outcome.error.is_none());
        assert_eq!(fs::read_to_string(&dst).unwrap(), "new");
        assert_eq!(fs::read_to_string(backup_path(&dst)).unwrap(), "old!");
    }

    #[test]
    fn test_copy_preserves_modification_time() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("a");
        let dst = tmp.path().join("b");
        fs::write(&src, "content").unwrap();

        FileSync::new(false).sync_file(&src, &dst);

        let src_mtime = fs::metadata(&src).unwrap().modified().unwrap();
        let dst_mtime = fs::metadata(&dst).unwrap().modified().unwrap();
        assert_eq!(src_mtime, dst_mtime);
    }

    #[test]
    fn test_skip_disabled_always_rewrites() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("a");
        let dst = tmp.path().join("b");
        fs::write(&src, "same").unwrap();

        let sync = FileSync::new(false);
        assert!(sync.sync_file(&src, &dst).changed);
        assert!(sync.sync_file_with(&src, &dst, false).changed);
    }

    #[cfg(unix)]
    #[test]
    fn test_turbo_creates_hardlink() {
        use std::os::unix::fs::MetadataExt;

        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("a");
        let dst = tmp.path().join("b");
        fs::write(&src, "linked").unwrap();
        fs::write(&dst, "stale content").unwrap();

        let outcome = FileSync::new(true).sync_file(&src, &dst);

        assert!(outcome.changed);
        assert_eq!(
            fs::metadata(&src).unwrap().ino(),
            fs::metadata(&dst).unwrap().ino()
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_does_not_write_through_old_link() {
        let tmp = tempfile::tempdir().unwrap();
        let nord = tmp.path().join("nord.conf");
        let dracula = tmp.path().join("dracula.conf");
        let dst = tmp.path().join("hyprland.conf");
        fs::write(&nord, "nord").unwrap();
        fs::write(&dracula, "dracula!").unwrap();

        assert!(FileSync::new(true).sync_file(&nord, &dst).changed);
        assert!(FileSync::new(false).sync_file(&dracula, &dst).changed);

        assert_eq!(fs::read_to_string(&dst).unwrap(), "dracula!");
        assert_eq!(fs::read_to_string(&nord).unwrap(), "nord");
    }

    #[test]
    fn test_sync_tree_missing_source_is_noop() {
        let tmp = tempfile::tempdir().unwrap();
        let dst = tmp.path().join("dst");
        assert!(!FileSync::new(false).sync_tree(&tmp.path().join("missing"), &dst));
        assert!(!dst.exists());
    }
}
