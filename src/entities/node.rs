//! Typed reference to a node of the hierarchy.
//!
//! Ids are only unique within their own collection (client "1" and store "1"
//! may coexist), so every lookup keyed by node carries the kind along.

use crate::errors::EntityKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A client, store or employee, identified by kind and id
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum NodeRef {
    /// Client node
    Client(String),
    /// Store node
    Store(String),
    /// Employee node
    Employee(String),
}

impl NodeRef {
    /// Client node for `id`.
    pub fn client(id: impl Into<String>) -> Self {
        Self::Client(id.into())
    }

    /// Store node for `id`.
    pub fn store(id: impl Into<String>) -> Self {
        Self::Store(id.into())
    }

    /// Employee node for `id`.
    pub fn employee(id: impl Into<String>) -> Self {
        Self::Employee(id.into())
    }

    /// The raw id.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Client(id) | Self::Store(id) | Self::Employee(id) => id,
        }
    }

    /// Collection the id belongs to.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Client(_) => EntityKind::Client,
            Self::Store(_) => EntityKind::Store,
            Self::Employee(_) => EntityKind::Employee,
        }
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.id())
    }
}
