//! Contract surface for export and import collaborators.
//!
//! The core ships no spreadsheet format. A collaborator implements these
//! traits and the dashboard hands it rows or applies what it returns.

use super::projector::Row;
use crate::{entities::NodeRef, errors::Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Receives the rows of the current view for export.
pub trait RowExporter {
    /// Writes out one view.
    fn export(&mut self, title: &str, rows: &[Row]) -> Result<()>;
}

/// One grid cell value coming back from an imported report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellUpdate {
    /// Node the value belongs to
    pub node: NodeRef,
    /// Day of the cell
    pub date: NaiveDate,
    /// New value
    pub value: f64,
}

/// Produces grid cell values from an external report.
pub trait ReportImporter {
    /// Reads the report into cell updates.
    fn import(&mut self) -> Result<Vec<CellUpdate>>;
}
