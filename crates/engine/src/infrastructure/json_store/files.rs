//! File helpers shared by the stores.
//!
//! Every write goes through [`write_atomic`]: the bytes land in a temp file in
//! the target directory, are synced, and the temp file is renamed over the
//! target. A reader sees either the old file or the new one.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::infrastructure::ports::RepoError;

fn parent_dir(path: &Path) -> Result<&Path, RepoError> {
    path.parent().ok_or_else(|| {
        RepoError::io(
            "parent_dir",
            path,
            std::io::Error::new(ErrorKind::InvalidInput, "path has no parent directory"),
        )
    })
}

pub fn ensure_dir(dir: &Path) -> Result<(), RepoError> {
    fs::create_dir_all(dir).map_err(|e| RepoError::io("create_dir", dir, e))
}

/// Writes `bytes` to a synced temp file next to `path`, without replacing it.
fn stage(path: &Path, bytes: &[u8]) -> Result<NamedTempFile, RepoError> {
    let dir = parent_dir(path)?;
    ensure_dir(dir)?;

    let mut staged = tempfile::Builder::new()
        .prefix(".")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| RepoError::io("create_temp", dir, e))?;
    staged
        .write_all(bytes)
        .map_err(|e| RepoError::io("write_temp", staged.path(), e))?;
    staged
        .as_file()
        .sync_all()
        .map_err(|e| RepoError::io("sync_temp", staged.path(), e))?;
    Ok(staged)
}

pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), RepoError> {
    let staged = stage(path, bytes)?;
    staged
        .persist(path)
        .map_err(|e| RepoError::io("rename", path, e.error))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote file");
    Ok(())
}

/// Serializes `value` as compact JSON and writes it atomically.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), RepoError> {
    let bytes = serde_json::to_vec(value).map_err(|e| RepoError::serialization(path, e))?;
    write_atomic(path, &bytes)
}

pub fn read_string(path: &Path) -> Result<Option<String>, RepoError> {
    match fs::read_to_string(path) {
        Ok(content) => {
            tracing::debug!(path = %path.display(), "Read file");
            Ok(Some(content))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(RepoError::io("read", path, e)),
    }
}

pub fn read_bytes(path: &Path) -> Result<Option<Vec<u8>>, RepoError> {
    match fs::read(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(RepoError::io("read", path, e)),
    }
}

/// Reads and decodes a JSON file. A missing file is `Ok(None)`; malformed JSON
/// is an error.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, RepoError> {
    read_string(path)?
        .map(|json| decode(path, &json))
        .transpose()
}

pub fn decode<T: DeserializeOwned>(path: &Path, json: &str) -> Result<T, RepoError> {
    serde_json::from_str(json).map_err(|e| RepoError::serialization(path, e))
}

/// Removes a file. Returns whether anything was removed.
pub fn remove_file(path: &Path) -> Result<bool, RepoError> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "Removed file");
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(RepoError::io("remove_file", path, e)),
    }
}

pub fn remove_dir_all(path: &Path) -> Result<bool, RepoError> {
    match fs::remove_dir_all(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "Removed directory");
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(RepoError::io("remove_dir", path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_atomic_creates_missing_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("file.json");

        write_atomic(&path, b"{}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn interrupted_write_leaves_previous_version() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("novel.json");
        write_atomic(&path, br#"{"v":1}"#).unwrap();

        // Temp file written and synced, then dropped before the rename
        let staged = stage(&path, br#"{"v":2}"#).unwrap();
        drop(staged);

        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"v":1}"#);
        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn missing_files_read_as_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.json");

        assert!(read_string(&path).unwrap().is_none());
        assert!(read_json::<serde_json::Value>(&path).unwrap().is_none());
        assert!(!remove_file(&path).unwrap());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();

        let err = read_json::<serde_json::Value>(&path).unwrap_err();
        assert!(matches!(err, RepoError::Serialization { .. }));
    }
}
