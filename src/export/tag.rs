//! Tag export
//!
//! Collects the user-facing tags of a set of dashboards and charts into a
//! single `tags.yaml`. Dashboard tags take precedence: a chart tag is only
//! added when no dashboard tag of the same name was seen.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dao::{ChartDao, DashboardDao};
use crate::error::ExportResult;
use crate::models::{ChartId, DashboardId, Tag};

use super::unit::{to_yaml, ExportUnit};

/// Name of the single file produced by the tag exporter
pub const TAGS_FILE_NAME: &str = "tags.yaml";

/// One or many ids, normalized to a list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdList<T>(Vec<T>);

impl<T> Default for IdList<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> IdList<T> {
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }
}

impl<T> From<Vec<T>> for IdList<T> {
    fn from(ids: Vec<T>) -> Self {
        Self(ids)
    }
}

impl From<ChartId> for IdList<ChartId> {
    fn from(id: ChartId) -> Self {
        Self(vec![id])
    }
}

impl From<DashboardId> for IdList<DashboardId> {
    fn from(id: DashboardId) -> Self {
        Self(vec![id])
    }
}

/// A tag as written to `tags.yaml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagEntry {
    pub tag_name: String,
    pub description: Option<String>,
}

impl From<&Tag> for TagEntry {
    fn from(tag: &Tag) -> Self {
        Self {
            tag_name: tag.name.clone(),
            description: tag.description.clone(),
        }
    }
}

/// Root of `tags.yaml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagsPayload {
    pub tags: Vec<TagEntry>,
}

/// Exports the merged tags of dashboards and charts
#[derive(Clone, Copy)]
pub struct TagExporter<'a> {
    dashboards: &'a dyn DashboardDao,
    charts: &'a dyn ChartDao,
}

impl<'a> TagExporter<'a> {
    pub fn new(dashboards: &'a dyn DashboardDao, charts: &'a dyn ChartDao) -> Self {
        Self { dashboards, charts }
    }

    /// The single `tags.yaml` unit. Nothing is read until it is rendered.
    pub fn export(
        &self,
        dashboard_ids: Option<IdList<DashboardId>>,
        chart_ids: Option<IdList<ChartId>>,
    ) -> ExportUnit<'a> {
        let exporter = *self;
        let dashboard_ids = dashboard_ids.unwrap_or_default();
        let chart_ids = chart_ids.unwrap_or_default();

        ExportUnit::new(TAGS_FILE_NAME, move || {
            exporter.file_content(dashboard_ids.as_slice(), chart_ids.as_slice())
        })
    }

    /// Fetch, filter and merge the tags, then render `tags.yaml`
    pub fn file_content(
        &self,
        dashboard_ids: &[DashboardId],
        chart_ids: &[ChartId],
    ) -> ExportResult<String> {
        let mut dashboard_tags = Vec::new();
        for &id in dashboard_ids {
            let Some(dashboard) = self.dashboards.find_by_id(id)? else {
                debug!(dashboard_id = %id, "Skipping unknown dashboard");
                continue;
            };
            let filtered = exportable_tags(&dashboard.tags);
            debug!(dashboard_id = %id, tags = ?filtered, "Filtered dashboard tags");
            dashboard_tags.extend(filtered);
        }

        let mut chart_tags = Vec::new();
        for &id in chart_ids {
            let Some(chart) = self.charts.find_by_id(id)? else {
                debug!(chart_id = %id, "Skipping unknown chart");
                continue;
            };
            let filtered = exportable_tags(&chart.tags);
            debug!(chart_id = %id, tags = ?filtered, "Filtered chart tags");
            chart_tags.extend(filtered);
        }

        let payload = TagsPayload {
            tags: merge_tags(dashboard_tags, chart_tags),
        };
        to_yaml(&payload)
    }
}

/// Drop `type:` and `owner:` tags and project the rest
pub fn exportable_tags(tags: &[Tag]) -> Vec<TagEntry> {
    tags.iter()
        .filter(|tag| !tag.is_type_tag() && !tag.is_owner_tag())
        .map(TagEntry::from)
        .collect()
}

/// Merge two tag lists keyed by name.
///
/// Dashboard tags come first; the first entry seen for a name is kept and
/// chart tags only fill in names that are still missing.
pub fn merge_tags(dashboard_tags: Vec<TagEntry>, chart_tags: Vec<TagEntry>) -> Vec<TagEntry> {
    let mut seen = HashSet::new();
    dashboard_tags
        .into_iter()
        .chain(chart_tags)
        .filter(|tag| seen.insert(tag.tag_name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExportPaths;
    use crate::models::{Chart, Dashboard};
    use crate::storage::Storage;
    use tempfile::TempDir;

    fn entry(name: &str, description: Option<&str>) -> TagEntry {
        TagEntry {
            tag_name: name.to_string(),
            description: description.map(str::to_string),
        }
    }

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExportPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn parse(yaml: &str) -> TagsPayload {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_merge_dashboard_wins() {
        let dashboard = vec![entry("a", None)];
        let chart = vec![entry("a", Some("X")), entry("b", None)];

        let merged = merge_tags(dashboard, chart);
        assert_eq!(merged, vec![entry("a", None), entry("b", None)]);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let tags = vec![entry("a", Some("first")), entry("b", None), entry("c", None)];

        let merged = merge_tags(tags.clone(), tags.clone());
        assert_eq!(merged, tags);

        let again = merge_tags(merged.clone(), merged.clone());
        assert_eq!(again, merged);
    }

    #[test]
    fn test_merge_first_dashboard_entry_kept() {
        let dashboard = vec![entry("a", Some("one")), entry("a", Some("two"))];
        let merged = merge_tags(dashboard, Vec::new());
        assert_eq!(merged, vec![entry("a", Some("one"))]);
    }

    #[test]
    fn test_exportable_tags_filters_system_tags() {
        let tags = vec![
            Tag::new("type:dashboard"),
            Tag::new("owner:jane"),
            Tag::with_description("finance", "Finance team"),
        ];

        assert_eq!(
            exportable_tags(&tags),
            vec![entry("finance", Some("Finance team"))]
        );
    }

    #[test]
    fn test_no_ids_yields_empty_tags() {
        let (_temp_dir, storage) = create_test_storage();
        let exporter = TagExporter::new(&storage.dashboards, &storage.charts);

        let unit = exporter.export(None, None);
        assert_eq!(unit.path(), TAGS_FILE_NAME);

        let content = unit.render().unwrap();
        assert_eq!(content, "tags: []\n");
        assert_eq!(parse(&content), TagsPayload::default());
    }

    #[test]
    fn test_export_merges_dashboard_and_chart_tags() {
        let (_temp_dir, storage) = create_test_storage();

        let mut dashboard = Dashboard::new(1, "Overview");
        dashboard.tags = vec![
            Tag::new("type:dashboard"),
            Tag::new("owner:jane"),
            Tag::with_description("finance", "From dashboard"),
        ];
        storage.dashboards.upsert(dashboard).unwrap();

        let mut chart = Chart::new(10, "Revenue");
        chart.tags = vec![
            Tag::new("type:chart"),
            Tag::with_description("finance", "From chart"),
            Tag::new("quarterly"),
        ];
        storage.charts.upsert(chart).unwrap();

        let exporter = TagExporter::new(&storage.dashboards, &storage.charts);
        let content = exporter
            .export(Some(DashboardId::new(1).into()), Some(ChartId::new(10).into()))
            .render()
            .unwrap();

        let payload = parse(&content);
        assert_eq!(
            payload.tags,
            vec![entry("finance", Some("From dashboard")), entry("quarterly", None)]
        );
        assert!(!content.contains("type:"));
        assert!(!content.contains("owner:"));
    }

    #[test]
    fn test_unknown_ids_are_skipped() {
        let (_temp_dir, storage) = create_test_storage();

        let mut chart = Chart::new(2, "Known");
        chart.tags = vec![Tag::new("ops")];
        storage.charts.upsert(chart).unwrap();

        let exporter = TagExporter::new(&storage.dashboards, &storage.charts);
        let content = exporter
            .export(
                Some(vec![DashboardId::new(404)].into()),
                Some(vec![ChartId::new(999), ChartId::new(2)].into()),
            )
            .render()
            .unwrap();

        assert_eq!(parse(&content).tags, vec![entry("ops", None)]);
    }

    #[test]
    fn test_content_reads_store_at_render_time() {
        let (_temp_dir, storage) = create_test_storage();
        let exporter = TagExporter::new(&storage.dashboards, &storage.charts);

        let unit = exporter.export(None, Some(ChartId::new(3).into()));

        let mut chart = Chart::new(3, "Late");
        chart.tags = vec![Tag::new("late")];
        storage.charts.upsert(chart).unwrap();

        assert_eq!(parse(&unit.render().unwrap()).tags, vec![entry("late", None)]);
    }
}
