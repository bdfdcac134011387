//! Export units
//!
//! An export unit is one file of a bundle: a relative path plus a deferred
//! producer of the file text. Producers run only when the unit is consumed,
//! so branches of a cascading export that nobody reads cost nothing.

use std::fmt;

use serde::Serialize;

use crate::error::ExportResult;

/// Deferred file content
pub type ContentFn<'a> = Box<dyn FnOnce() -> ExportResult<String> + 'a>;

/// Lazy, finite sequence of export units
pub type ExportStream<'a> = Box<dyn Iterator<Item = ExportResult<ExportUnit<'a>>> + 'a>;

/// One file of an export bundle
pub struct ExportUnit<'a> {
    path: String,
    content: ContentFn<'a>,
}

impl<'a> ExportUnit<'a> {
    /// Create a unit from a path and a content producer
    pub fn new<F>(path: impl Into<String>, content: F) -> Self
    where
        F: FnOnce() -> ExportResult<String> + 'a,
    {
        Self {
            path: path.into(),
            content: Box::new(content),
        }
    }

    /// Relative path of the file inside the bundle
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Run the content producer, consuming the unit
    pub fn render(self) -> ExportResult<String> {
        (self.content)()
    }

    /// Split into path and producer
    pub fn into_parts(self) -> (String, ContentFn<'a>) {
        (self.path, self.content)
    }
}

impl fmt::Debug for ExportUnit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportUnit")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Serialize a payload to YAML, keeping its field/key order
pub fn to_yaml<T: Serialize + ?Sized>(payload: &T) -> ExportResult<String> {
    Ok(serde_yaml::to_string(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_content_is_deferred() {
        let calls = Cell::new(0);
        let unit = ExportUnit::new("a.yaml", || {
            calls.set(calls.get() + 1);
            Ok("a: 1\n".to_string())
        });

        assert_eq!(unit.path(), "a.yaml");
        assert_eq!(calls.get(), 0);

        assert_eq!(unit.render().unwrap(), "a: 1\n");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_debug_shows_path_only() {
        let unit = ExportUnit::new("charts/x-1.yaml", || Ok(String::new()));
        let debug = format!("{:?}", unit);
        assert!(debug.contains("charts/x-1.yaml"));
    }

    #[test]
    fn test_to_yaml_preserves_key_order() {
        let mut mapping = serde_yaml::Mapping::new();
        mapping.insert("zeta".into(), 1.into());
        mapping.insert("alpha".into(), 2.into());

        let yaml = to_yaml(&mapping).unwrap();
        assert_eq!(yaml, "zeta: 1\nalpha: 2\n");
    }
}
