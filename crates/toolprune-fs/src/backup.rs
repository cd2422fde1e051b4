//! Backup copies taken before a source file is rewritten
//!
//! A backup lives next to its source with the [`BACKUP_SUFFIX`] appended to
//! the file name. [`create_backup`] only returns once the copy has been
//! synced to disk and its checksum matches the source, so a failed rewrite
//! afterwards can always be undone by copying the backup back by hand.

use std::fs::{self, File};

use crate::checksum::compute_file_checksum;
use crate::{Error, NormalizedPath, Result};

/// Suffix appended to the source file name to form the backup path.
pub const BACKUP_SUFFIX: &str = ".backup";

/// Path of the backup for `source`, e.g. `src/index.ts` -> `src/index.ts.backup`.
pub fn backup_path(source: &NormalizedPath) -> NormalizedPath {
    source.with_suffix(BACKUP_SUFFIX)
}

/// Copy `source` to its backup path and make the copy durable.
///
/// An existing backup is overwritten. Returns the backup path.
///
/// # Errors
///
/// Returns [`Error::Io`] if the source cannot be read or the backup cannot be
/// written or synced, and [`Error::BackupMismatch`] if the synced copy does
/// not hash to the same value as the source.
pub fn create_backup(source: &NormalizedPath) -> Result<NormalizedPath> {
    let source_native = source.to_native();
    let backup = backup_path(source);
    let backup_native = backup.to_native();

    fs::copy(&source_native, &backup_native).map_err(|e| Error::io(&backup_native, e))?;

    File::open(&backup_native)
        .and_then(|file| file.sync_all())
        .map_err(|e| Error::io(&backup_native, e))?;

    let expected =
        compute_file_checksum(&source_native).map_err(|e| Error::io(&source_native, e))?;
    let actual =
        compute_file_checksum(&backup_native).map_err(|e| Error::io(&backup_native, e))?;
    if expected != actual {
        return Err(Error::BackupMismatch {
            path: backup_native,
        });
    }

    tracing::info!(source = %source, backup = %backup, checksum = %actual, "backup created");
    Ok(backup)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backup_path_appends_suffix() {
        let source = NormalizedPath::new("src/index.ts");
        assert_eq!(backup_path(&source).as_str(), "src/index.ts.backup");
    }

    #[test]
    fn create_backup_copies_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let source = NormalizedPath::new(dir.path().join("index.ts"));
        fs::write(source.to_native(), "line one\r\nline two\n").unwrap();

        let backup = create_backup(&source).unwrap();

        let copied = fs::read(backup.to_native()).unwrap();
        assert_eq!(copied, b"line one\r\nline two\n");
    }
}
