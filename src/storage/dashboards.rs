//! Dashboard repository for JSON storage
//!
//! Manages loading and saving dashboards to dashboards.json

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::dao::DashboardDao;
use crate::error::{ExportError, ExportResult};
use crate::models::{Dashboard, DashboardId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct DashboardData {
    dashboards: Vec<Dashboard>,
}

/// Repository for dashboard persistence
pub struct DashboardRepository {
    path: PathBuf,
    data: RwLock<BTreeMap<DashboardId, Dashboard>>,
}

impl DashboardRepository {
    /// Create a new dashboard repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
        }
    }

    /// Load dashboards from disk
    pub fn load(&self) -> Result<(), ExportError> {
        let file_data: DashboardData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            ExportError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for dashboard in file_data.dashboards {
            data.insert(dashboard.id, dashboard);
        }

        Ok(())
    }

    /// Save dashboards to disk
    pub fn save(&self) -> Result<(), ExportError> {
        let data = self.data.read().map_err(|e| {
            ExportError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let file_data = DashboardData {
            dashboards: data.values().cloned().collect(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a dashboard by ID
    pub fn get(&self, id: DashboardId) -> Result<Option<Dashboard>, ExportError> {
        let data = self.data.read().map_err(|e| {
            ExportError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Insert or update a dashboard
    pub fn upsert(&self, dashboard: Dashboard) -> Result<(), ExportError> {
        let mut data = self.data.write().map_err(|e| {
            ExportError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(dashboard.id, dashboard);
        Ok(())
    }
}

impl DashboardDao for DashboardRepository {
    fn find_by_id(&self, id: DashboardId) -> ExportResult<Option<Dashboard>> {
        self.get(id)
    }
}
