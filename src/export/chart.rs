//! Chart export
//!
//! Each chart becomes `charts/<slug>-<id>.yaml`. With related export on, the
//! chart's dataset and its `tags.yaml` follow it in the stream.

use std::iter;

use serde_yaml::{Mapping, Value};
use tracing::info;
use uuid::Uuid;

use crate::dao::{Daos, DatasetDao};
use crate::error::{ExportError, ExportResult};
use crate::models::{Chart, ChartId, Dataset, DatasetId};

use super::command::{ExportCommand, ModelExporter};
use super::dataset::DatasetExporter;
use super::filename::get_filename;
use super::tag::TagExporter;
use super::unit::{to_yaml, ExportStream, ExportUnit};
use super::EXPORT_VERSION;

/// Keys of the generic chart dictionary that do not belong in an export
pub const REMOVE_KEYS: [&str; 3] = ["datasource_type", "datasource_name", "url_params"];

/// Exports charts, optionally cascading into their dataset and tags
#[derive(Clone, Copy)]
pub struct ChartExporter<'a> {
    daos: Daos<'a>,
    export_tags: bool,
}

impl<'a> ChartExporter<'a> {
    /// Create an exporter; tags are exported unless disabled
    pub fn new(daos: Daos<'a>) -> Self {
        Self {
            daos,
            export_tags: true,
        }
    }

    /// Whether related export also emits `tags.yaml` for each chart
    pub fn with_tags(mut self, export_tags: bool) -> Self {
        self.export_tags = export_tags;
        self
    }

    /// Export a list of charts as one bundle stream
    pub fn run(
        self,
        chart_ids: impl IntoIterator<Item = ChartId>,
        export_related: bool,
    ) -> ExportResult<ExportStream<'a>> {
        ExportCommand::new(self, chart_ids)
            .export_related(export_related)
            .run()
    }

    pub fn file_name(chart: &Chart) -> String {
        format!("charts/{}.yaml", get_filename(&chart.slice_name, chart.id, false))
    }

    /// Render the chart file.
    ///
    /// `dataset_uuid` is the uuid of the chart's backing dataset, if any.
    pub fn file_content(chart: &Chart, dataset_uuid: Option<Uuid>) -> ExportResult<String> {
        let mut payload: Mapping = chart
            .export_to_dict()
            .into_iter()
            .filter(|(key, _)| {
                key.as_str()
                    .map_or(true, |key| !REMOVE_KEYS.contains(&key))
            })
            .collect();

        let raw_params = payload
            .get("params")
            .and_then(Value::as_str)
            .filter(|raw| !raw.is_empty())
            .map(str::to_string);
        if let Some(raw) = raw_params {
            // Decoding straight into a YAML value keeps the JSON key order
            match serde_json::from_str::<Value>(&raw) {
                Ok(decoded) => {
                    payload.insert("params".into(), decoded);
                }
                Err(_) => info!("Unable to decode `params` field: {}", raw),
            }
        }

        payload.insert("version".into(), EXPORT_VERSION.into());
        if let Some(uuid) = dataset_uuid {
            payload.insert("dataset_uuid".into(), uuid.to_string().into());
        }

        let tag_names: Vec<Value> = chart
            .tags
            .iter()
            .filter(|tag| !tag.is_type_tag())
            .map(|tag| Value::from(tag.name.as_str()))
            .collect();
        payload.insert("tag".into(), Value::Sequence(tag_names));

        to_yaml(&payload)
    }
}

impl<'a> ModelExporter<'a> for ChartExporter<'a> {
    type Id = ChartId;
    type Model = Chart;

    fn model_name(&self) -> &'static str {
        "Slice"
    }

    fn find(&self, id: ChartId) -> ExportResult<Option<Chart>> {
        self.daos.charts.find_by_id(id)
    }

    fn not_found(&self, id: ChartId) -> ExportError {
        ExportError::chart_not_found(id)
    }

    fn export(&self, chart: Chart, export_related: bool) -> ExportStream<'a> {
        let datasets = self.daos.datasets;

        if !export_related {
            // The dataset is only needed for its uuid, resolved at render time
            let unit = ExportUnit::new(Self::file_name(&chart), move || {
                let dataset = resolve_dataset(datasets, chart.dataset_id)?;
                Self::file_content(&chart, dataset.map(|dataset| dataset.uuid))
            });
            return Box::new(iter::once(Ok::<_, ExportError>(unit)));
        }

        let dataset = match resolve_dataset(datasets, chart.dataset_id) {
            Ok(dataset) => dataset,
            Err(e) => return Box::new(iter::once(Err(e))),
        };

        let chart_id = chart.id;
        let dataset_uuid = dataset.as_ref().map(|dataset| dataset.uuid);
        let chart_unit = ExportUnit::new(Self::file_name(&chart), move || {
            Self::file_content(&chart, dataset_uuid)
        });

        let dataset_exporter = DatasetExporter::new(datasets);
        let dataset_units = dataset
            .into_iter()
            .flat_map(move |dataset| dataset_exporter.export(dataset, false));

        let tag_exporter = TagExporter::new(self.daos.dashboards, self.daos.charts);
        let tag_unit = self
            .export_tags
            .then(|| Ok(tag_exporter.export(None, Some(chart_id.into()))));

        Box::new(iter::once(Ok(chart_unit)).chain(dataset_units).chain(tag_unit))
    }
}

/// Look up a chart's backing dataset; a dangling reference is an error
fn resolve_dataset(
    datasets: &dyn DatasetDao,
    dataset_id: Option<DatasetId>,
) -> ExportResult<Option<Dataset>> {
    dataset_id
        .map(|id| {
            datasets
                .find_by_id(id)?
                .ok_or_else(|| ExportError::dataset_not_found(id))
        })
        .transpose()
}
