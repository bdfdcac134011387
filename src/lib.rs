//! chart-export - YAML export of charts, datasets and tags
//!
//! This library turns charts held in a local store into a bundle of YAML
//! files that an analytics application can import again.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Charts, dashboards, datasets and tags
//! - `dao`: Lookup traits the exporters read through
//! - `storage`: JSON file storage implementing the lookup traits
//! - `export`: Exporters and bundle writers
//! - `cli`, `display`: Command handlers and terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use chart_export::config::paths::ExportPaths;
//! use chart_export::export::{write_zip, ChartExporter};
//! use chart_export::models::ChartId;
//! use chart_export::storage::Storage;
//!
//! let storage = Storage::new(ExportPaths::new()?)?;
//! storage.load_all()?;
//! let units = ChartExporter::new(storage.daos()).run([ChartId::new(1)], true)?;
//! write_zip(units, std::fs::File::create("out.zip")?, "chart_export")?;
//! ```

pub mod cli;
pub mod config;
pub mod dao;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod storage;

pub use error::{ExportError, ExportResult};
