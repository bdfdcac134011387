//! Multi-model export command
//!
//! Drives any [`ModelExporter`] over a list of ids: every id is resolved up
//! front, `metadata.yaml` is emitted first, and a path already produced in
//! this run is never produced again.

use std::collections::HashSet;
use std::fmt::Display;
use std::iter;
use std::marker::PhantomData;

use chrono::Utc;
use serde::Serialize;
use tracing::debug;

use crate::error::{ExportError, ExportResult};

use super::unit::{to_yaml, ExportStream, ExportUnit};
use super::EXPORT_VERSION;

/// Bundle-level metadata file
pub const METADATA_FILE_NAME: &str = "metadata.yaml";

/// An exporter for one kind of entity
pub trait ModelExporter<'a>: Copy + 'a {
    type Id: Copy + Display;
    type Model: 'a;

    /// Model type recorded in `metadata.yaml`
    fn model_name(&self) -> &'static str;

    /// Resolve an id, `Ok(None)` when it does not exist
    fn find(&self, id: Self::Id) -> ExportResult<Option<Self::Model>>;

    /// Error reported for an id that does not resolve
    fn not_found(&self, id: Self::Id) -> ExportError;

    /// Units for a single resolved model
    fn export(&self, model: Self::Model, export_related: bool) -> ExportStream<'a>;
}

#[derive(Debug, Serialize)]
struct Metadata {
    version: &'static str,
    #[serde(rename = "type")]
    model_type: &'static str,
    timestamp: String,
}

/// Export of a list of entities of one kind
pub struct ExportCommand<'a, E: ModelExporter<'a>> {
    exporter: E,
    ids: Vec<E::Id>,
    export_related: bool,
    _lifetime: PhantomData<&'a ()>,
}

impl<'a, E: ModelExporter<'a>> ExportCommand<'a, E> {
    pub fn new(exporter: E, ids: impl IntoIterator<Item = E::Id>) -> Self {
        Self {
            exporter,
            ids: ids.into_iter().collect(),
            export_related: true,
            _lifetime: PhantomData,
        }
    }

    /// Whether related entities are exported alongside each model
    pub fn export_related(mut self, export_related: bool) -> Self {
        self.export_related = export_related;
        self
    }

    /// Resolve every id, failing on the first one that does not exist
    pub fn validate(&self) -> ExportResult<Vec<E::Model>> {
        let mut models = Vec::with_capacity(self.ids.len());
        for &id in &self.ids {
            match self.exporter.find(id)? {
                Some(model) => models.push(model),
                None => return Err(self.exporter.not_found(id)),
            }
        }
        Ok(models)
    }

    /// Validate, then return the lazy stream of units for the whole run
    pub fn run(self) -> ExportResult<ExportStream<'a>> {
        let models = self.validate()?;

        let metadata = Metadata {
            version: EXPORT_VERSION,
            model_type: self.exporter.model_name(),
            timestamp: Utc::now().to_rfc3339(),
        };
        let metadata_unit = ExportUnit::new(METADATA_FILE_NAME, move || to_yaml(&metadata));

        let exporter = self.exporter;
        let export_related = self.export_related;
        let mut seen = HashSet::from([METADATA_FILE_NAME.to_string()]);

        let units = models
            .into_iter()
            .flat_map(move |model| exporter.export(model, export_related))
            .filter(move |item| match item {
                Ok(unit) if !seen.insert(unit.path().to_string()) => {
                    debug!(path = unit.path(), "Skipping already exported file");
                    false
                }
                _ => true,
            });

        Ok(Box::new(iter::once(Ok(metadata_unit)).chain(units)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Exporter over a fixed set of names, each emitting its own file plus a
    /// shared one when related export is on
    #[derive(Clone, Copy)]
    struct NameExporter {
        names: &'static [&'static str],
    }

    impl<'a> ModelExporter<'a> for NameExporter {
        type Id = usize;
        type Model = &'static str;

        fn model_name(&self) -> &'static str {
            "Name"
        }

        fn find(&self, id: usize) -> ExportResult<Option<&'static str>> {
            Ok(self.names.get(id).copied())
        }

        fn not_found(&self, id: usize) -> ExportError {
            ExportError::NotFound {
                entity_type: "Name",
                identifier: id.to_string(),
            }
        }

        fn export(&self, model: &'static str, export_related: bool) -> ExportStream<'a> {
            let own = ExportUnit::new(format!("names/{}.yaml", model), move || {
                Ok(format!("name: {}\n", model))
            });
            let shared = export_related
                .then(|| ExportUnit::new("shared.yaml", || Ok("shared: true\n".to_string())));
            Box::new(iter::once(own).chain(shared).map(Ok::<_, ExportError>))
        }
    }

    const NAMES: NameExporter = NameExporter {
        names: &["alpha", "beta"],
    };

    fn paths(stream: ExportStream<'_>) -> Vec<String> {
        stream.map(|unit| unit.unwrap().path().to_string()).collect()
    }

    #[test]
    fn test_metadata_first_and_duplicates_skipped() {
        let stream = ExportCommand::new(NAMES, [0, 1]).run().unwrap();
        assert_eq!(
            paths(stream),
            vec![
                "metadata.yaml",
                "names/alpha.yaml",
                "shared.yaml",
                "names/beta.yaml",
            ]
        );
    }

    #[test]
    fn test_without_related() {
        let stream = ExportCommand::new(NAMES, [1, 0])
            .export_related(false)
            .run()
            .unwrap();
        assert_eq!(
            paths(stream),
            vec!["metadata.yaml", "names/beta.yaml", "names/alpha.yaml"]
        );
    }

    #[test]
    fn test_unknown_id_fails_before_any_unit() {
        let err = ExportCommand::new(NAMES, [0, 5]).run().err().unwrap();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Name not found: 5");
    }

    #[test]
    fn test_metadata_content() {
        let mut stream = ExportCommand::new(NAMES, [0]).run().unwrap();
        let content = stream.next().unwrap().unwrap().render().unwrap();

        let metadata: serde_yaml::Mapping = serde_yaml::from_str(&content).unwrap();
        assert_eq!(metadata.get("version").and_then(|v| v.as_str()), Some("1.0.0"));
        assert_eq!(metadata.get("type").and_then(|v| v.as_str()), Some("Name"));
        assert!(metadata.get("timestamp").is_some());
        assert!(content.starts_with("version:"));
    }
}
