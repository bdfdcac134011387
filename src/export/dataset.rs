//! Dataset export
//!
//! Writes a dataset under `datasets/<database>/` and, when related export is
//! requested, a stub for the database it lives in.

use std::iter;

use serde_yaml::{Mapping, Value};

use crate::dao::DatasetDao;
use crate::error::{ExportError, ExportResult};
use crate::models::{Dataset, DatasetId};

use super::command::ModelExporter;
use super::filename::get_filename;
use super::unit::{to_yaml, ExportStream, ExportUnit};
use super::EXPORT_VERSION;

/// Exports datasets
#[derive(Clone, Copy)]
pub struct DatasetExporter<'a> {
    datasets: &'a dyn DatasetDao,
}

impl<'a> DatasetExporter<'a> {
    pub fn new(datasets: &'a dyn DatasetDao) -> Self {
        Self { datasets }
    }

    /// `datasets/<database-slug>/<table-slug>-<id>.yaml`
    pub fn file_name(dataset: &Dataset) -> String {
        format!(
            "datasets/{}/{}.yaml",
            database_file_name(&dataset.database_name),
            get_filename(&dataset.table_name, dataset.id, false)
        )
    }

    pub fn file_content(dataset: &Dataset) -> ExportResult<String> {
        let mut payload = Mapping::new();
        payload.insert("table_name".into(), dataset.table_name.as_str().into());
        payload.insert("schema".into(), optional_str(&dataset.schema));
        payload.insert("description".into(), optional_str(&dataset.description));
        payload.insert("main_dttm_col".into(), optional_str(&dataset.main_dttm_col));
        payload.insert("sql".into(), optional_str(&dataset.sql));
        payload.insert("columns".into(), serde_yaml::to_value(&dataset.columns)?);
        payload.insert("metrics".into(), serde_yaml::to_value(&dataset.metrics)?);
        payload.insert("uuid".into(), dataset.uuid.to_string().into());
        payload.insert("version".into(), EXPORT_VERSION.into());
        payload.insert("database_name".into(), dataset.database_name.as_str().into());
        to_yaml(&payload)
    }

    fn database_unit(database_name: String) -> ExportUnit<'a> {
        let path = format!("databases/{}.yaml", database_file_name(&database_name));
        ExportUnit::new(path, move || {
            let mut payload = Mapping::new();
            payload.insert("database_name".into(), database_name.into());
            payload.insert("version".into(), EXPORT_VERSION.into());
            to_yaml(&payload)
        })
    }
}

impl<'a> ModelExporter<'a> for DatasetExporter<'a> {
    type Id = DatasetId;
    type Model = Dataset;

    fn model_name(&self) -> &'static str {
        "SqlaTable"
    }

    fn find(&self, id: DatasetId) -> ExportResult<Option<Dataset>> {
        self.datasets.find_by_id(id)
    }

    fn not_found(&self, id: DatasetId) -> ExportError {
        ExportError::dataset_not_found(id)
    }

    fn export(&self, dataset: Dataset, export_related: bool) -> ExportStream<'a> {
        let database = export_related.then(|| Self::database_unit(dataset.database_name.clone()));
        let unit = ExportUnit::new(Self::file_name(&dataset), move || {
            Self::file_content(&dataset)
        });

        Box::new(iter::once(unit).chain(database).map(Ok::<_, ExportError>))
    }
}

fn database_file_name(database_name: &str) -> String {
    get_filename(database_name, database_name, true)
}

fn optional_str(value: &Option<String>) -> Value {
    value
        .as_deref()
        .map_or(Value::Null, |v| Value::String(v.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExportPaths;
    use crate::models::{DatasetColumn, DatasetMetric};
    use crate::storage::Storage;
    use tempfile::TempDir;

    fn sample_dataset() -> Dataset {
        let mut dataset = Dataset::new(12, "daily orders", "Main Warehouse");
        dataset.schema = Some("public".into());
        dataset.columns.push(DatasetColumn {
            column_name: "ds".into(),
            column_type: Some("DATE".into()),
            is_dttm: true,
            expression: None,
        });
        dataset.metrics.push(DatasetMetric {
            metric_name: "count".into(),
            expression: "COUNT(*)".into(),
            verbose_name: None,
        });
        dataset
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            DatasetExporter::file_name(&sample_dataset()),
            "datasets/Main_Warehouse/daily_orders-12.yaml"
        );
    }

    #[test]
    fn test_file_content() {
        let dataset = sample_dataset();
        let content = DatasetExporter::file_content(&dataset).unwrap();

        let payload: Mapping = serde_yaml::from_str(&content).unwrap();
        assert_eq!(
            payload.get("table_name").and_then(|v| v.as_str()),
            Some("daily orders")
        );
        assert_eq!(
            payload.get("uuid").and_then(|v| v.as_str()),
            Some(dataset.uuid.to_string().as_str())
        );
        assert_eq!(payload.get("version").and_then(|v| v.as_str()), Some("1.0.0"));
        assert!(content.starts_with("table_name:"));
        assert!(content.contains("COUNT(*)"));
    }

    #[test]
    fn test_export_related_adds_database() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(ExportPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let exporter = DatasetExporter::new(&storage.datasets);

        let paths: Vec<String> = exporter
            .export(sample_dataset(), true)
            .map(|unit| unit.unwrap().path().to_string())
            .collect();
        assert_eq!(
            paths,
            vec![
                "datasets/Main_Warehouse/daily_orders-12.yaml",
                "databases/Main_Warehouse.yaml",
            ]
        );

        let single = exporter.export(sample_dataset(), false).count();
        assert_eq!(single, 1);
    }
}
