//! Dashboard model
//!
//! Only the parts of a dashboard the exporters read are modelled here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::ids::DashboardId;
use super::tag::Tag;

/// A dashboard grouping several charts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    /// Primary key
    pub id: DashboardId,

    pub uuid: Uuid,

    /// Display title
    pub dashboard_title: String,

    /// Tags attached to the dashboard
    #[serde(default)]
    pub tags: Vec<Tag>,

    pub changed_on: DateTime<Utc>,
}

impl Dashboard {
    /// Create a new, empty dashboard
    pub fn new(id: i64, dashboard_title: impl Into<String>) -> Self {
        Self {
            id: DashboardId::new(id),
            uuid: Uuid::new_v4(),
            dashboard_title: dashboard_title.into(),
            tags: Vec::new(),
            changed_on: Utc::now(),
        }
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dashboard_title)
    }
}
