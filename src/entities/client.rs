//! Client entity - root of the organizational hierarchy.
//!
//! A client owns its stores by composition. The canonical store list lives in
//! the entity store; the `stores` field is only populated on hierarchy
//! snapshots, where stores are attached by value at read time.

use super::Store;
use serde::{Deserialize, Serialize};

/// Client record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Unique identifier for the client
    pub id: String,
    /// Display name (e.g., "TechCorp Brasil")
    pub name: String,
    /// Stores attached on hierarchy snapshots, empty otherwise
    #[serde(default)]
    pub stores: Vec<Store>,
}

impl Client {
    /// Creates a client with no attached stores.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            stores: Vec::new(),
        }
    }
}
