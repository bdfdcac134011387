//! Core data models for chart-export
//!
//! These are read-only views of the entities held by the analytics store:
//! charts, dashboards, datasets and the tags attached to them.

pub mod chart;
pub mod dashboard;
pub mod dataset;
pub mod ids;
pub mod tag;

pub use chart::Chart;
pub use dashboard::Dashboard;
pub use dataset::{Dataset, DatasetColumn, DatasetMetric};
pub use ids::{ChartId, DashboardId, DatasetId};
pub use tag::{Tag, OWNER_TAG_MARKER, TYPE_TAG_MARKER};
