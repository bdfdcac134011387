//! Chart model
//!
//! A chart (a "slice" in the analytics store) is a saved visualization with a
//! JSON parameter blob and an optional backing dataset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::fmt;
use uuid::Uuid;

use super::ids::{ChartId, DatasetId};
use super::tag::Tag;

/// A saved chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chart {
    /// Primary key
    pub id: ChartId,

    /// Stable identifier used to re-link entities on import
    pub uuid: Uuid,

    /// Display name
    pub slice_name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub certified_by: Option<String>,

    #[serde(default)]
    pub certification_details: Option<String>,

    /// Visualization plugin, e.g. `table` or `echarts_timeseries_line`
    #[serde(default)]
    pub viz_type: Option<String>,

    /// Raw JSON parameter blob as stored
    #[serde(default)]
    pub params: Option<String>,

    #[serde(default)]
    pub query_context: Option<String>,

    #[serde(default)]
    pub cache_timeout: Option<i64>,

    /// Legacy datasource fields, superseded by `dataset_id`
    #[serde(default)]
    pub datasource_type: Option<String>,

    #[serde(default)]
    pub datasource_name: Option<String>,

    #[serde(default)]
    pub url_params: Option<String>,

    /// Backing dataset, if any
    #[serde(default)]
    pub dataset_id: Option<DatasetId>,

    /// Tags attached to the chart
    #[serde(default)]
    pub tags: Vec<Tag>,

    pub created_at: DateTime<Utc>,

    pub changed_on: DateTime<Utc>,
}

impl Chart {
    /// Create a new chart with only a name
    pub fn new(id: i64, slice_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ChartId::new(id),
            uuid: Uuid::new_v4(),
            slice_name: slice_name.into(),
            description: None,
            certified_by: None,
            certification_details: None,
            viz_type: None,
            params: None,
            query_context: None,
            cache_timeout: None,
            datasource_type: None,
            datasource_name: None,
            url_params: None,
            dataset_id: None,
            tags: Vec::new(),
            created_at: now,
            changed_on: now,
        }
    }

    /// Flat dictionary of the exportable columns, defaults included.
    ///
    /// Keys come out in column order so that exports diff cleanly.
    pub fn export_to_dict(&self) -> Mapping {
        let mut dict = Mapping::new();
        dict.insert("slice_name".into(), self.slice_name.as_str().into());
        dict.insert("description".into(), optional_str(&self.description));
        dict.insert("certified_by".into(), optional_str(&self.certified_by));
        dict.insert(
            "certification_details".into(),
            optional_str(&self.certification_details),
        );
        dict.insert("viz_type".into(), optional_str(&self.viz_type));
        dict.insert("params".into(), optional_str(&self.params));
        dict.insert("query_context".into(), optional_str(&self.query_context));
        dict.insert(
            "cache_timeout".into(),
            self.cache_timeout.map_or(Value::Null, Value::from),
        );
        dict.insert("datasource_type".into(), optional_str(&self.datasource_type));
        dict.insert("datasource_name".into(), optional_str(&self.datasource_name));
        dict.insert("url_params".into(), optional_str(&self.url_params));
        dict.insert("uuid".into(), self.uuid.to_string().into());
        dict
    }
}

impl fmt::Display for Chart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slice_name)
    }
}

fn optional_str(value: &Option<String>) -> Value {
    value
        .as_deref()
        .map_or(Value::Null, |v| Value::String(v.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_chart() {
        let chart = Chart::new(3, "Revenue by Region");
        assert_eq!(chart.id, ChartId::new(3));
        assert!(chart.tags.is_empty());
        assert!(chart.dataset_id.is_none());
        assert_eq!(chart.to_string(), "Revenue by Region");
    }

    #[test]
    fn test_export_to_dict_key_order() {
        let chart = Chart::new(1, "Sales");
        let dict = chart.export_to_dict();
        let keys: Vec<&str> = dict.keys().filter_map(|k| k.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "slice_name",
                "description",
                "certified_by",
                "certification_details",
                "viz_type",
                "params",
                "query_context",
                "cache_timeout",
                "datasource_type",
                "datasource_name",
                "url_params",
                "uuid",
            ]
        );
    }

    #[test]
    fn test_export_to_dict_values() {
        let mut chart = Chart::new(1, "Sales");
        chart.viz_type = Some("table".into());
        chart.cache_timeout = Some(300);

        let dict = chart.export_to_dict();
        assert_eq!(dict.get("slice_name"), Some(&Value::from("Sales")));
        assert_eq!(dict.get("viz_type"), Some(&Value::from("table")));
        assert_eq!(dict.get("cache_timeout"), Some(&Value::from(300)));
        assert_eq!(dict.get("description"), Some(&Value::Null));
        assert_eq!(
            dict.get("uuid"),
            Some(&Value::from(chart.uuid.to_string()))
        );
    }

    #[test]
    fn test_deserialize_defaults_tags() {
        let json = format!(
            r#"{{"id": 5, "uuid": "{}", "slice_name": "x",
                "created_at": "2025-01-01T00:00:00Z",
                "changed_on": "2025-01-01T00:00:00Z"}}"#,
            Uuid::new_v4()
        );
        let chart: Chart = serde_json::from_str(&json).unwrap();
        assert!(chart.tags.is_empty());
        assert!(chart.params.is_none());
    }
}
