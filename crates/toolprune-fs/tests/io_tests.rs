use std::fs;

use tempfile::TempDir;
use toolprune_fs::{Error, NormalizedPath, io};

#[test]
fn test_write_text_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("index.ts");
    fs::write(&file_path, "server.tool(\n").unwrap();

    let path = NormalizedPath::new(&file_path);
    io::write_text(&path, "  // server.tool(\n").unwrap();

    assert_eq!(fs::read_to_string(&file_path).unwrap(), "  // server.tool(\n");
}

#[test]
fn test_write_text_creates_missing_parents() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("src").join("index.ts"));

    io::write_text(&path, "content").unwrap();

    assert_eq!(io::read_text(&path).unwrap(), "content");
}

#[test]
fn test_read_text_preserves_trailing_newline_and_crlf() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("index.ts");
    fs::write(&file_path, "a\r\nb\n").unwrap();

    let content = io::read_text(&NormalizedPath::new(&file_path)).unwrap();
    assert_eq!(content, "a\r\nb\n");
}

#[test]
fn test_read_text_missing_file_reports_path() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("src").join("index.ts");

    let err = io::read_text(&NormalizedPath::new(&missing)).unwrap_err();

    match err {
        Error::Io { path, .. } => assert_eq!(path, missing),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_read_text_replaces_invalid_utf8() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("index.ts");
    fs::write(&file_path, b"server.tool(\n  \"a\xffb\",\n").unwrap();

    let content = io::read_text(&NormalizedPath::new(&file_path)).unwrap();

    assert_eq!(content, "server.tool(\n  \"a\u{FFFD}b\",\n");
}

#[cfg(unix)]
#[test]
fn test_write_text_preserves_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("index.ts");
    fs::write(&file_path, "before\n").unwrap();
    fs::set_permissions(&file_path, fs::Permissions::from_mode(0o755)).unwrap();

    io::write_text(&NormalizedPath::new(&file_path), "after\n").unwrap();

    let mode = fs::metadata(&file_path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o755);
    assert_eq!(fs::read_to_string(&file_path).unwrap(), "after\n");
}

#[cfg(unix)]
#[test]
fn test_write_text_through_symlink_updates_target() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("real.ts");
    let link = temp.path().join("index.ts");
    fs::write(&target, "before\n").unwrap();
    std::os::unix::fs::symlink(&target, &link).unwrap();

    io::write_text(&NormalizedPath::new(&link), "after\n").unwrap();

    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert_eq!(fs::read_to_string(&target).unwrap(), "after\n");
    assert_eq!(fs::read_to_string(&link).unwrap(), "after\n");
}
