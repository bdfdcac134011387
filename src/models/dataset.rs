//! Dataset model
//!
//! A dataset is a physical table or a saved SQL query in a named database.
//! Charts point at at most one dataset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::ids::DatasetId;

/// A column exposed by a dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetColumn {
    pub column_name: String,

    #[serde(default, rename = "type")]
    pub column_type: Option<String>,

    #[serde(default)]
    pub is_dttm: bool,

    #[serde(default)]
    pub expression: Option<String>,
}

/// A saved aggregate expression on a dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetric {
    pub metric_name: String,

    pub expression: String,

    #[serde(default)]
    pub verbose_name: Option<String>,
}

/// A dataset backing one or more charts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// Primary key
    pub id: DatasetId,

    pub uuid: Uuid,

    pub table_name: String,

    #[serde(default)]
    pub schema: Option<String>,

    /// Name of the database connection the table lives in
    pub database_name: String,

    /// SQL for virtual datasets
    #[serde(default)]
    pub sql: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub main_dttm_col: Option<String>,

    #[serde(default)]
    pub columns: Vec<DatasetColumn>,

    #[serde(default)]
    pub metrics: Vec<DatasetMetric>,

    pub changed_on: DateTime<Utc>,
}

impl Dataset {
    /// Create a new physical dataset without columns
    pub fn new(
        id: i64,
        table_name: impl Into<String>,
        database_name: impl Into<String>,
    ) -> Self {
        Self {
            id: DatasetId::new(id),
            uuid: Uuid::new_v4(),
            table_name: table_name.into(),
            schema: None,
            database_name: database_name.into(),
            sql: None,
            description: None,
            main_dttm_col: None,
            columns: Vec::new(),
            metrics: Vec::new(),
            changed_on: Utc::now(),
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{}.{}", schema, self.table_name),
            None => write!(f, "{}", self.table_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_schema() {
        let mut dataset = Dataset::new(1, "orders", "warehouse");
        assert_eq!(dataset.to_string(), "orders");

        dataset.schema = Some("public".into());
        assert_eq!(dataset.to_string(), "public.orders");
    }
}
