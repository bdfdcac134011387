//! Tag model
//!
//! Tags annotate dashboards and charts. Some tags are maintained by the
//! application itself (`type:chart`, `owner:42`) and never leave the store.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Substring marking application-maintained type tags
pub const TYPE_TAG_MARKER: &str = "type:";

/// Substring marking application-maintained ownership tags
pub const OWNER_TAG_MARKER: &str = "owner:";

/// A labeled annotation attached to a dashboard or chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name, unique within the store
    pub name: String,

    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
}

impl Tag {
    /// Create a tag without a description
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Create a tag with a description
    pub fn with_description(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
        }
    }

    /// Whether this is a `type:` tag
    pub fn is_type_tag(&self) -> bool {
        self.name.contains(TYPE_TAG_MARKER)
    }

    /// Whether this is an `owner:` tag
    pub fn is_owner_tag(&self) -> bool {
        self.name.contains(OWNER_TAG_MARKER)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
