//! Employee entity - leaf of the organizational hierarchy.

use serde::{Deserialize, Serialize};

/// Employee record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Unique identifier for the employee
    pub id: String,
    /// Full name
    pub name: String,
    /// Store the employee works in
    pub store_id: String,
    /// Personal daily sales goal
    pub daily_goal: f64,
    /// Personal daily stretch goal
    pub super_goal: f64,
}

impl Employee {
    /// Creates an employee record.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        store_id: impl Into<String>,
        daily_goal: f64,
        super_goal: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            store_id: store_id.into(),
            daily_goal,
            super_goal,
        }
    }
}
