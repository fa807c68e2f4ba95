//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use crate::log;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Read raw file bytes, treating a missing file as `None`.
pub fn read_existing(path: &Path, operation: &str) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::internal_io(e.to_string(), Some(operation.to_string()))),
    }
}

/// Write content to file with standardized error handling.
pub fn write_file(path: &Path, content: &str, operation: &str) -> Result<()> {
    fs::write(path, content)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Write `content` to `path` unless the file already holds exactly those bytes.
///
/// Returns `true` when the file was written. Repeated calls with the same
/// content write at most once.
pub fn write_file_if_changed(path: &str, content: &str) -> Result<bool> {
    let target = expand_home(path);
    let context = format!("write {}", target.display());

    if let Some(existing) = read_existing(&target, &context)? {
        if existing == content.as_bytes() {
            return Ok(false);
        }
    }

    write_file(&target, content, &context)?;
    log::log(&format!("-- wrote '{}'", target.display()), 1);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    /// Set a fixed mtime so a rewrite is detectable.
    fn pin_mtime(path: &Path) -> SystemTime {
        let pinned = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000_000);
        fs::File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(pinned)
            .unwrap();
        pinned
    }

    #[test]
    fn writes_new_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.ini");
        let path_str = path.to_str().unwrap();

        assert!(write_file_if_changed(path_str, "a = 1\n").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "a = 1\n");
    }

    #[test]
    fn identical_content_is_not_rewritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.ini");
        let path_str = path.to_str().unwrap();

        assert!(write_file_if_changed(path_str, "same").unwrap());
        let pinned = pin_mtime(&path);

        assert!(!write_file_if_changed(path_str, "same").unwrap());
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), pinned);
    }

    #[test]
    fn changed_content_replaces_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.ini");
        let path_str = path.to_str().unwrap();

        write_file_if_changed(path_str, "first").unwrap();
        assert!(write_file_if_changed(path_str, "second").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn non_utf8_existing_file_is_overwritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blob");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        assert!(write_file_if_changed(path.to_str().unwrap(), "text").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "text");
    }

    #[test]
    fn missing_parent_directory_is_io_error() {
        let err = write_file_if_changed("/nonexistent/dir/file.txt", "x").unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
    }

    #[test]
    fn expand_home_only_touches_leading_tilde() {
        let plain = expand_home("z/fabscratch");
        assert_eq!(plain, PathBuf::from("z/fabscratch"));

        let expanded = expand_home("~/notes.txt");
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().ends_with("notes.txt"));
    }
}
