//! Storage initialization
//!
//! Handles first-run setup of an empty store.

use crate::config::paths::ExportPaths;
use crate::error::ExportError;

use super::Storage;

/// Initialize storage for a fresh installation
///
/// Creates the directory layout and writes empty store files for any that
/// are missing. Existing entities are left untouched.
pub fn initialize_storage(paths: &ExportPaths) -> Result<(), ExportError> {
    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;
    storage.save_all()
}
