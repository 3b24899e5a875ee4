use std::fs;
use std::io;
use std::path::Path;

/// Creates hardlinks for turbo syncs.
///
/// Any error (cross-device link, filesystem without link support,
/// permissions) sends [`FileSync`](super::FileSync) down the copy path.
pub trait HardLinker: Send + Sync {
    fn hard_link(&self, src: &Path, dst: &Path) -> io::Result<()>;
}

/// The real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLinker;

impl HardLinker for FsLinker {
    fn hard_link(&self, src: &Path, dst: &Path) -> io::Result<()> {
        fs::hard_link(src, dst)
    }
}
