//! Custom error types for chart-export
//!
//! This module defines the error hierarchy for the exporter using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for export operations
#[derive(Error, Debug)]
pub enum ExportError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Archive writing errors
    #[error("Bundle error: {0}")]
    Bundle(String),
}

impl ExportError {
    /// Create a "not found" error for charts
    pub fn chart_not_found(identifier: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "Chart",
            identifier: identifier.to_string(),
        }
    }

    /// Create a "not found" error for datasets
    pub fn dataset_not_found(identifier: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "Dataset",
            identifier: identifier.to_string(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for ExportError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<zip::result::ZipError> for ExportError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Bundle(err.to_string())
    }
}

/// Result type alias for export operations
pub type ExportResult<T> = Result<T, ExportError>;
