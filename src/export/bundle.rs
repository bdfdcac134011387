//! Bundle writers
//!
//! Consume an export stream in order, rendering each unit exactly once, and
//! write the files into a zip archive or a directory tree.
//!
//! Files and directories on disk are first built under a hidden staging path
//! next to the target and renamed into place once every unit has rendered.
//! A failed export leaves nothing behind.

use std::fs::{self, File};
use std::io::{BufWriter, Seek, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{ExportError, ExportResult};

use super::unit::ExportUnit;

/// Name of the top-level directory inside a bundle
pub fn bundle_root(prefix: &str, at: DateTime<Utc>) -> String {
    format!("{}_export_{}", prefix, at.format("%Y%m%dT%H%M%S"))
}

/// Write every unit into a zip archive under `root/`.
///
/// Returns the bundle-relative paths in the order they were written. The
/// first failing unit aborts the write.
pub fn write_zip<'a, W, I>(units: I, writer: W, root: &str) -> ExportResult<Vec<String>>
where
    W: Write + Seek,
    I: IntoIterator<Item = ExportResult<ExportUnit<'a>>>,
{
    let mut zip = ZipWriter::new(writer);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut written = Vec::new();

    for unit in units {
        let (path, content) = unit?.into_parts();
        let text = content()?;

        debug!(path = %path, bytes = text.len(), "Adding file to bundle");
        zip.start_file(format!("{}/{}", root, path), options)?;
        zip.write_all(text.as_bytes())
            .map_err(|e| ExportError::Bundle(format!("Failed to write {}: {}", path, e)))?;
        written.push(path);
    }

    zip.finish()?;
    info!(files = written.len(), root = root, "Bundle written");
    Ok(written)
}

/// Write a zip bundle to `path`, replacing the file only on success
pub fn write_zip_file<'a, I>(units: I, path: &Path, root: &str) -> ExportResult<Vec<String>>
where
    I: IntoIterator<Item = ExportResult<ExportUnit<'a>>>,
{
    let staging = staging_path(path)?;

    let result = File::create(&staging)
        .map_err(|e| {
            ExportError::Bundle(format!("Failed to create file {}: {}", staging.display(), e))
        })
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            let written = write_zip(units, &mut writer, root)?;
            writer.flush()?;
            Ok(written)
        })
        .and_then(|written| {
            fs::rename(&staging, path).map_err(|e| {
                ExportError::Bundle(format!("Failed to move bundle to {}: {}", path.display(), e))
            })?;
            Ok(written)
        });

    if result.is_err() {
        let _ = fs::remove_file(&staging);
    }
    result
}

/// Write every unit as a file below `dir`.
///
/// `dir` must not exist yet, or be empty.
pub fn write_dir<'a, I>(units: I, dir: &Path) -> ExportResult<Vec<String>>
where
    I: IntoIterator<Item = ExportResult<ExportUnit<'a>>>,
{
    let staging = staging_path(dir)?;
    if staging.exists() {
        fs::remove_dir_all(&staging)?;
    }

    let result = write_tree(units, &staging).and_then(|written| {
        if dir.exists() {
            // rename only replaces an empty directory
            fs::remove_dir(dir).map_err(|e| {
                ExportError::Bundle(format!("{} is not empty: {}", dir.display(), e))
            })?;
        }
        fs::rename(&staging, dir).map_err(|e| {
            ExportError::Bundle(format!("Failed to move export to {}: {}", dir.display(), e))
        })?;
        Ok(written)
    });

    match &result {
        Ok(written) => info!(files = written.len(), dir = %dir.display(), "Export written"),
        Err(_) => {
            let _ = fs::remove_dir_all(&staging);
        }
    }
    result
}

fn write_tree<'a, I>(units: I, dir: &Path) -> ExportResult<Vec<String>>
where
    I: IntoIterator<Item = ExportResult<ExportUnit<'a>>>,
{
    fs::create_dir_all(dir).map_err(|e| {
        ExportError::Io(format!("Failed to create directory {}: {}", dir.display(), e))
    })?;
    let mut written = Vec::new();

    for unit in units {
        let (path, content) = unit?.into_parts();
        let text = content()?;

        let target = dir.join(&path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ExportError::Io(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        fs::write(&target, text).map_err(|e| {
            ExportError::Io(format!("Failed to write {}: {}", target.display(), e))
        })?;
        written.push(path);
    }

    Ok(written)
}

/// `<parent>/.<name>.partial`, on the same filesystem as `target`
fn staging_path(target: &Path) -> ExportResult<PathBuf> {
    let name = target.file_name().ok_or_else(|| {
        ExportError::Bundle(format!("Invalid output path: {}", target.display()))
    })?;
    Ok(target.with_file_name(format!(".{}.partial", name.to_string_lossy())))
}
