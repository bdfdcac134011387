//! Dataset repository for JSON storage
//!
//! Manages loading and saving datasets to datasets.json

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::dao::DatasetDao;
use crate::error::{ExportError, ExportResult};
use crate::models::{Dataset, DatasetId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct DatasetData {
    datasets: Vec<Dataset>,
}

/// Repository for dataset persistence
pub struct DatasetRepository {
    path: PathBuf,
    data: RwLock<BTreeMap<DatasetId, Dataset>>,
}

impl DatasetRepository {
    /// Create a new dataset repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
        }
    }

    /// Load datasets from disk
    pub fn load(&self) -> Result<(), ExportError> {
        let file_data: DatasetData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            ExportError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for dataset in file_data.datasets {
            data.insert(dataset.id, dataset);
        }

        Ok(())
    }

    /// Save datasets to disk
    pub fn save(&self) -> Result<(), ExportError> {
        let data = self.data.read().map_err(|e| {
            ExportError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let file_data = DatasetData {
            datasets: data.values().cloned().collect(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a dataset by ID
    pub fn get(&self, id: DatasetId) -> Result<Option<Dataset>, ExportError> {
        let data = self.data.read().map_err(|e| {
            ExportError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Insert or update a dataset
    pub fn upsert(&self, dataset: Dataset) -> Result<(), ExportError> {
        let mut data = self.data.write().map_err(|e| {
            ExportError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(dataset.id, dataset);
        Ok(())
    }

    /// Count datasets
    pub fn count(&self) -> Result<usize, ExportError> {
        let data = self.data.read().map_err(|e| {
            ExportError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }
}

impl DatasetDao for DatasetRepository {
    fn find_by_id(&self, id: DatasetId) -> ExportResult<Option<Dataset>> {
        self.get(id)
    }
}
