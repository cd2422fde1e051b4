//! Whole-file text I/O with atomic replacement

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Resolve the file that a write to `path` should replace.
///
/// A symlink is followed to its target so the link itself survives the
/// rename. Anything else, including a path that does not exist yet, is
/// returned unchanged.
fn resolve_target(path: &NormalizedPath) -> Result<PathBuf> {
    let native_path = path.to_native();
    match fs::symlink_metadata(&native_path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            dunce::canonicalize(&native_path).map_err(|e| Error::io(&native_path, e))
        }
        _ => Ok(native_path),
    }
}

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename so an interrupted write leaves either the
/// previous content or the new content at `path`, never a truncated file.
/// An advisory lock is held on the temp file while it is written. When
/// `path` already exists its permissions carry over to the new file, and a
/// symlink at `path` has its target replaced rather than the link.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = resolve_target(path)?;
    let target = NormalizedPath::new(&native_path);

    if let Some(parent) = target.parent() {
        let parent = parent.to_native();
        fs::create_dir_all(&parent).map_err(|e| Error::io(&parent, e))?;
    }

    let permissions = fs::metadata(&native_path).ok().map(|m| m.permissions());

    // Same directory keeps the rename on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        target.file_name().unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file
        .lock_exclusive()
        .map_err(|_| Error::LockFailed {
            path: native_path.clone(),
        })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;

    if let Some(permissions) = permissions {
        temp_file
            .set_permissions(permissions)
            .map_err(|e| Error::io(&temp_path, e))?;
    }

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    if let Err(e) = fs::rename(&temp_path, &native_path) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(&native_path, e));
    }

    tracing::debug!(path = %path, target = %target, bytes = content.len(), "replaced file contents");
    Ok(())
}

/// Read the full text content of a file.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD instead of
/// failing the read.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    let bytes = fs::read(&native_path).map_err(|e| Error::io(&native_path, e))?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            tracing::warn!(path = %path, "file is not valid UTF-8, decoding lossily");
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}
