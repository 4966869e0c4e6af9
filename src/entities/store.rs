//! Store entity - a branch (filial) belonging to exactly one client.

use super::Employee;
use serde::{Deserialize, Serialize};

/// Store record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    /// Unique identifier for the store
    pub id: String,
    /// Display name (e.g., "TechCorp - São Paulo")
    pub name: String,
    /// Owning client, used for lookups only
    pub client_id: String,
    /// Employees attached on hierarchy snapshots, empty otherwise
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Daily sales goal for the store as a whole
    pub daily_goal: f64,
    /// Daily stretch goal
    pub super_goal: f64,
}

impl Store {
    /// Creates a store with no attached employees.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        client_id: impl Into<String>,
        daily_goal: f64,
        super_goal: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            client_id: client_id.into(),
            employees: Vec::new(),
            daily_goal,
            super_goal,
        }
    }
}
