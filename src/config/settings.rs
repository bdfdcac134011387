//! User settings for chart-export
//!
//! Controls default export behavior and logging verbosity.

use serde::{Deserialize, Serialize};

use super::paths::ExportPaths;
use crate::error::ExportError;

/// User settings for chart-export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Whether chart exports include `tags.yaml` unless told otherwise
    #[serde(default = "default_export_tags")]
    pub export_tags: bool,

    /// Log filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Prefix of the bundle root directory and file name
    #[serde(default = "default_bundle_prefix")]
    pub bundle_prefix: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_export_tags() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_bundle_prefix() -> String {
    "chart".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            export_tags: default_export_tags(),
            log_level: default_log_level(),
            bundle_prefix: default_bundle_prefix(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &ExportPaths) -> Result<Self, ExportError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| ExportError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ExportError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExportPaths) -> Result<(), ExportError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ExportError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| ExportError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.export_tags);
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.bundle_prefix, "chart");
    }

    #[test]
    fn test_load_missing_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExportPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings.schema_version, 1);
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExportPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            export_tags: false,
            log_level: "debug".into(),
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert!(!loaded.export_tags);
        assert_eq!(loaded.log_level, "debug");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExportPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"export_tags": false}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert!(!loaded.export_tags);
        assert_eq!(loaded.bundle_prefix, "chart");
    }
}
