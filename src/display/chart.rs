//! Chart display formatting
//!
//! Formats charts for terminal output.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Chart;

#[derive(Tabled)]
struct ChartRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    viz_type: String,
    #[tabled(rename = "Dataset")]
    dataset: String,
    #[tabled(rename = "Tags")]
    tags: String,
}

impl From<&Chart> for ChartRow {
    fn from(chart: &Chart) -> Self {
        Self {
            id: chart.id.value(),
            name: chart.slice_name.clone(),
            viz_type: chart.viz_type.clone().unwrap_or_else(|| "-".to_string()),
            dataset: chart
                .dataset_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string()),
            tags: chart
                .tags
                .iter()
                .filter(|tag| !tag.is_type_tag())
                .map(|tag| tag.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Format a list of charts as a table
pub fn format_chart_list(charts: &[Chart]) -> String {
    if charts.is_empty() {
        return "No charts found.".to_string();
    }

    let rows: Vec<ChartRow> = charts.iter().map(ChartRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DatasetId, Tag};

    #[test]
    fn test_empty_list() {
        assert_eq!(format_chart_list(&[]), "No charts found.");
    }

    #[test]
    fn test_chart_table() {
        let mut chart = Chart::new(7, "Revenue");
        chart.viz_type = Some("table".into());
        chart.dataset_id = Some(DatasetId::new(3));
        chart.tags = vec![Tag::new("type:chart"), Tag::new("finance")];

        let output = format_chart_list(&[chart, Chart::new(8, "Churn")]);
        assert!(output.contains("Revenue"));
        assert!(output.contains("finance"));
        assert!(!output.contains("type:chart"));
        assert!(output.contains("Churn"));
    }
}
