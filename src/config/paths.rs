//! Path management for chart-export
//!
//! Provides platform-aware path resolution for configuration, the entity
//! store and generated bundles.
//!
//! ## Path Resolution Order
//!
//! 1. `CHART_EXPORT_DATA_DIR` environment variable (if set)
//! 2. The platform config directory for `chart-export` (via `directories`)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::ExportError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "CHART_EXPORT_DATA_DIR";

/// Manages all paths used by chart-export
#[derive(Debug, Clone)]
pub struct ExportPaths {
    /// Base directory for all chart-export data
    base_dir: PathBuf,
}

impl ExportPaths {
    /// Create a new ExportPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and the
    /// override variable is not set.
    pub fn new() -> Result<Self, ExportError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create ExportPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory holding the entity store
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Default directory for generated bundles
    pub fn exports_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to charts.json
    pub fn charts_file(&self) -> PathBuf {
        self.data_dir().join("charts.json")
    }

    /// Get the path to dashboards.json
    pub fn dashboards_file(&self) -> PathBuf {
        self.data_dir().join("dashboards.json")
    }

    /// Get the path to datasets.json
    pub fn datasets_file(&self) -> PathBuf {
        self.data_dir().join("datasets.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), ExportError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ExportError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| ExportError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.exports_dir()).map_err(|e| {
            ExportError::Io(format!("Failed to create exports directory: {}", e))
        })?;

        Ok(())
    }

    /// Check if chart-export has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, ExportError> {
    ProjectDirs::from("", "", "chart-export")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| ExportError::Config("Could not determine home directory".into()))
}
