//! Export module for chart-export
//!
//! Turns charts, datasets and tags into re-importable YAML files:
//! - `chart`: chart files, cascading into datasets and tags
//! - `tag`: the merged `tags.yaml`
//! - `dataset`: dataset (and database stub) files
//! - `command`: id validation, `metadata.yaml` and path de-duplication
//! - `bundle`: zip and directory writers
//!
//! Every exporter yields [`ExportUnit`]s whose content is rendered only when
//! the bundle writer consumes them.

pub mod bundle;
pub mod chart;
pub mod command;
pub mod dataset;
pub mod filename;
pub mod tag;
pub mod unit;

/// Export schema version stamped into every file
pub const EXPORT_VERSION: &str = "1.0.0";

pub use bundle::{bundle_root, write_dir, write_zip, write_zip_file};
pub use chart::ChartExporter;
pub use command::{ExportCommand, ModelExporter, METADATA_FILE_NAME};
pub use dataset::DatasetExporter;
pub use filename::{get_filename, secure_filename};
pub use tag::{merge_tags, IdList, TagEntry, TagExporter, TagsPayload, TAGS_FILE_NAME};
pub use unit::{ExportStream, ExportUnit};
