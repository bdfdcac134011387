//! Configuration module for chart-export
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::ExportPaths;
pub use settings::Settings;
