//! Data-access traits
//!
//! The exporters only ever read entities by primary key. These traits are the
//! seam between them and whatever holds the entities; the JSON store in
//! [`crate::storage`] is the bundled implementation.

use crate::error::ExportResult;
use crate::models::{Chart, ChartId, Dashboard, DashboardId, Dataset, DatasetId};

/// Read access to charts
pub trait ChartDao {
    /// Look up a chart, `Ok(None)` when it does not exist
    fn find_by_id(&self, id: ChartId) -> ExportResult<Option<Chart>>;
}

/// Read access to dashboards
pub trait DashboardDao {
    /// Look up a dashboard, `Ok(None)` when it does not exist
    fn find_by_id(&self, id: DashboardId) -> ExportResult<Option<Dashboard>>;
}

/// Read access to datasets
pub trait DatasetDao {
    /// Look up a dataset, `Ok(None)` when it does not exist
    fn find_by_id(&self, id: DatasetId) -> ExportResult<Option<Dataset>>;
}

/// The set of lookups an export run reads from
#[derive(Clone, Copy)]
pub struct Daos<'a> {
    pub charts: &'a dyn ChartDao,
    pub dashboards: &'a dyn DashboardDao,
    pub datasets: &'a dyn DatasetDao,
}
