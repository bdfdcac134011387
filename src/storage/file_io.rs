//! JSON store files
//!
//! Store files are read whole and replaced with a temp-file rename, so an
//! interrupted write leaves the previous contents in place.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::error::ExportError;

/// Read a store file. A missing or blank file yields `T::default()`.
pub fn read_json<T, P>(path: P) -> Result<T, ExportError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        debug!(path = %path.display(), "Store file missing, starting empty");
        return Ok(T::default());
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| ExportError::Storage(format!("Failed to read {}: {}", path.display(), e)))?;
    if contents.trim().is_empty() {
        return Ok(T::default());
    }

    serde_json::from_str(&contents)
        .map_err(|e| ExportError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Replace a store file with the pretty-printed JSON of `data`
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), ExportError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(|e| {
        ExportError::Storage(format!("Failed to create directory {}: {}", dir.display(), e))
    })?;

    // Same directory, so the rename never crosses filesystems
    let temp_path = path.with_extension("json.tmp");
    let result = write_pretty(&temp_path, data).and_then(|_| {
        fs::rename(&temp_path, path)
            .map_err(|e| ExportError::Storage(format!("Failed to replace {}: {}", path.display(), e)))
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    } else {
        debug!(path = %path.display(), "Store file written");
    }
    result
}

fn write_pretty<T: Serialize>(path: &Path, data: &T) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|e| {
        ExportError::Storage(format!("Failed to create {}: {}", path.display(), e))
    })?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| ExportError::Storage(format!("Failed to serialize store data: {}", e)))?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_read_nonexistent_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        let data: TestData = read_json(&path).unwrap();
        assert_eq!(data, TestData::default());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("test.json");

        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };

        write_json_atomic(&path, &data).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let loaded: TestData = read_json(&path).unwrap();
        assert_eq!(data, loaded);
    }

    #[test]
    fn test_read_blank_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blank.json");
        fs::write(&path, "\n").unwrap();

        let data: TestData = read_json(&path).unwrap();
        assert_eq!(data, TestData::default());
    }

    #[test]
    fn test_read_invalid_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "not json at all").unwrap();

        let err = read_json::<TestData, _>(&path).unwrap_err();
        assert!(matches!(err, ExportError::Storage(_)));
    }
}
