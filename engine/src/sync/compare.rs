use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Read size for content digests.
const DIGEST_CHUNK: usize = 256 * 1024;

/// Modification times closer than this count as equal.
const MTIME_TOLERANCE: Duration = Duration::from_millis(1);

/// Hex SHA-256 of a file's content, or `None` when it cannot be read.
pub fn file_digest(path: &Path) -> Option<String> {
    let mut file = File::open(path).ok()?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; DIGEST_CHUNK];
    loop {
        let read = file.read(&mut buf).ok()?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }
    Some(format!("{:x}", hasher.finalize()))
}

/// Whether `dst` already holds what `src` would produce.
///
/// Both must be regular files of equal size; then either their modification
/// times are within a millisecond of each other or their content digests
/// match.
// TODO: the timestamp branch alone can skip a same-size edit made within
// the same millisecond; consider requiring the digest as well.
pub fn files_are_same(src: &Path, dst: &Path) -> bool {
    let (Ok(src_meta), Ok(dst_meta)) = (fs::metadata(src), fs::metadata(dst)) else {
        return false;
    };
    if !src_meta.is_file() || !dst_meta.is_file() || src_meta.len() != dst_meta.len() {
        return false;
    }

    if let (Ok(a), Ok(b)) = (src_meta.modified(), dst_meta.modified()) {
        let delta = a.duration_since(b).or_else(|_| b.duration_since(a));
        if delta.is_ok_and(|d| d < MTIME_TOLERANCE) {
            return true;
        }
    }

    match (file_digest(src), file_digest(dst)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
