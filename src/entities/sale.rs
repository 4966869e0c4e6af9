//! Sale entity - a discrete sales event attributed to one employee.
//!
//! Sales are immutable once recorded; an edit replaces the whole record by id.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Recorded sale
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// Unique identifier assigned when the sale is recorded
    pub id: String,
    /// Employee credited with the sale
    pub employee_id: String,
    /// Sale amount; negative values (returns) are accepted as-is
    pub amount: f64,
    /// Calendar day the sale is bucketed into
    pub date: NaiveDate,
    /// Optional free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A sale that has not been assigned an id yet
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSale {
    /// Employee credited with the sale
    pub employee_id: String,
    /// Sale amount
    pub amount: f64,
    /// Calendar day of the sale
    pub date: NaiveDate,
    /// Optional free-text description
    #[serde(default)]
    pub description: Option<String>,
}

impl NewSale {
    /// Attaches an id, producing the stored record.
    #[must_use]
    pub fn with_id(self, id: String) -> Sale {
        Sale {
            id,
            employee_id: self.employee_id,
            amount: self.amount,
            date: self.date,
            description: self.description,
        }
    }
}
