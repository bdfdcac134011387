//! Storage layer for chart-export
//!
//! A JSON file store of charts, dashboards and datasets with atomic writes.
//! Each repository implements the matching trait from [`crate::dao`].

pub mod charts;
pub mod dashboards;
pub mod datasets;
pub mod file_io;
pub mod init;

pub use charts::ChartRepository;
pub use dashboards::DashboardRepository;
pub use datasets::DatasetRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;

use crate::config::paths::ExportPaths;
use crate::dao::Daos;
use crate::error::ExportError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: ExportPaths,
    pub charts: ChartRepository,
    pub dashboards: DashboardRepository,
    pub datasets: DatasetRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: ExportPaths) -> Result<Self, ExportError> {
        paths.ensure_directories()?;

        Ok(Self {
            charts: ChartRepository::new(paths.charts_file()),
            dashboards: DashboardRepository::new(paths.dashboards_file()),
            datasets: DatasetRepository::new(paths.datasets_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &ExportPaths {
        &self.paths
    }

    /// Borrow every repository through its lookup trait
    pub fn daos(&self) -> Daos<'_> {
        Daos {
            charts: &self.charts,
            dashboards: &self.dashboards,
            datasets: &self.datasets,
        }
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), ExportError> {
        self.charts.load()?;
        self.dashboards.load()?;
        self.datasets.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), ExportError> {
        self.charts.save()?;
        self.dashboards.save()?;
        self.datasets.save()?;
        Ok(())
    }
}
