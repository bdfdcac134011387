//! Chart repository for JSON storage
//!
//! Manages loading and saving charts to charts.json

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::dao::ChartDao;
use crate::error::{ExportError, ExportResult};
use crate::models::{Chart, ChartId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable chart data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ChartData {
    charts: Vec<Chart>,
}

/// Repository for chart persistence
pub struct ChartRepository {
    path: PathBuf,
    data: RwLock<BTreeMap<ChartId, Chart>>,
}

impl ChartRepository {
    /// Create a new chart repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
        }
    }

    /// Load charts from disk
    pub fn load(&self) -> Result<(), ExportError> {
        let file_data: ChartData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            ExportError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for chart in file_data.charts {
            data.insert(chart.id, chart);
        }

        Ok(())
    }

    /// Save charts to disk
    pub fn save(&self) -> Result<(), ExportError> {
        let data = self.data.read().map_err(|e| {
            ExportError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let file_data = ChartData {
            charts: data.values().cloned().collect(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a chart by ID
    pub fn get(&self, id: ChartId) -> Result<Option<Chart>, ExportError> {
        let data = self.data.read().map_err(|e| {
            ExportError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Get all charts, ordered by ID
    pub fn get_all(&self) -> Result<Vec<Chart>, ExportError> {
        let data = self.data.read().map_err(|e| {
            ExportError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.values().cloned().collect())
    }

    /// Insert or update a chart
    pub fn upsert(&self, chart: Chart) -> Result<(), ExportError> {
        let mut data = self.data.write().map_err(|e| {
            ExportError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(chart.id, chart);
        Ok(())
    }

    /// Count charts
    pub fn count(&self) -> Result<usize, ExportError> {
        let data = self.data.read().map_err(|e| {
            ExportError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }
}

impl ChartDao for ChartRepository {
    fn find_by_id(&self, id: ChartId) -> ExportResult<Option<Chart>> {
        self.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tag;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ChartRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("charts.json");
        let repo = ChartRepository::new(path);
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_and_find() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.upsert(Chart::new(4, "Daily Users")).unwrap();

        let found = repo.find_by_id(ChartId::new(4)).unwrap().unwrap();
        assert_eq!(found.slice_name, "Daily Users");
        assert!(repo.find_by_id(ChartId::new(5)).unwrap().is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let (_temp_dir, repo) = create_test_repo();

        let mut chart = Chart::new(9, "Tagged");
        chart.tags.push(Tag::new("finance"));
        repo.upsert(chart).unwrap();
        repo.save().unwrap();

        let reloaded = ChartRepository::new(repo.path.clone());
        reloaded.load().unwrap();
        let chart = reloaded.get(ChartId::new(9)).unwrap().unwrap();
        assert_eq!(chart.tags, vec![Tag::new("finance")]);
    }
}
