//! Drill-down navigation through the hierarchy.
//!
//! The navigator is a three-state machine: the client list, the stores of one
//! client, and the employees of one store. Every transition resolves its
//! target against the entity store first and only then commits, so a failed
//! transition leaves the current state untouched.

use super::entity_store::EntityStore;
use crate::{
    entities::NodeRef,
    errors::{EntityKind, Error, Result},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Title shown at every level, also the tail of the breadcrumb subtitle.
pub const SALES_TRACKING_LABEL: &str = "Sales Tracking";

/// Current drill-down position
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "level", rename_all = "camelCase")]
pub enum NavigationState {
    /// Listing all clients
    #[default]
    AtClients,
    /// Listing the stores of one client
    AtStores {
        /// Selected client
        client_id: String,
    },
    /// Listing the employees of one store
    AtEmployees {
        /// Selected store
        store_id: String,
    },
}

/// Hierarchy level listed by a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Client rows
    Clients,
    /// Store rows
    Stores,
    /// Employee rows
    Employees,
}

impl NavigationState {
    /// Level of the rows listed in this state.
    #[must_use]
    pub const fn level(&self) -> Level {
        match self {
            Self::AtClients => Level::Clients,
            Self::AtStores { .. } => Level::Stores,
            Self::AtEmployees { .. } => Level::Employees,
        }
    }

    /// Parent node whose children are listed, `None` at the top.
    #[must_use]
    pub fn scope(&self) -> Option<NodeRef> {
        match self {
            Self::AtClients => None,
            Self::AtStores { client_id } => Some(NodeRef::client(client_id)),
            Self::AtEmployees { store_id } => Some(NodeRef::store(store_id)),
        }
    }
}

/// Holds the current drill-down position.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    state: NavigationState,
}

impl Navigator {
    /// Starts at the client list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Drills into a client (from the client list) or a store (from a
    /// client's store list).
    ///
    /// Employees are leaves, so nothing can be selected at that level; the id
    /// is reported as an unknown store.
    pub fn select(&mut self, store: &EntityStore, id: &str) -> Result<&NavigationState> {
        let next = match &self.state {
            NavigationState::AtClients => {
                let client = store.client_by_id(id)?;
                NavigationState::AtStores {
                    client_id: client.id.clone(),
                }
            }
            NavigationState::AtStores { client_id } => {
                let target = store.store_by_id(id)?;
                if &target.client_id != client_id {
                    return Err(Error::not_found(EntityKind::Store, id));
                }
                NavigationState::AtEmployees {
                    store_id: target.id.clone(),
                }
            }
            NavigationState::AtEmployees { .. } => {
                return Err(Error::not_found(EntityKind::Store, id));
            }
        };

        debug!(from = ?self.state, to = ?next, "Navigating down");
        self.state = next;
        Ok(&self.state)
    }

    /// Moves one level up. A no-op at the client list.
    pub fn back(&mut self, store: &EntityStore) -> Result<&NavigationState> {
        let next = match &self.state {
            NavigationState::AtClients => None,
            NavigationState::AtStores { .. } => Some(NavigationState::AtClients),
            NavigationState::AtEmployees { store_id } => {
                let current = store.store_by_id(store_id)?;
                let client = store.client_by_id(&current.client_id)?;
                Some(NavigationState::AtStores {
                    client_id: client.id.clone(),
                })
            }
        };

        if let Some(next) = next {
            debug!(from = ?self.state, to = ?next, "Navigating up");
            self.state = next;
        }
        Ok(&self.state)
    }

    /// Jumps straight back to the client list.
    pub fn reset(&mut self) {
        self.state = NavigationState::AtClients;
    }

    /// Names of the selected ancestors, outermost first.
    pub fn breadcrumb(&self, store: &EntityStore) -> Result<Vec<String>> {
        Ok(match &self.state {
            NavigationState::AtClients => Vec::new(),
            NavigationState::AtStores { client_id } => {
                vec![store.client_by_id(client_id)?.name.clone()]
            }
            NavigationState::AtEmployees { store_id } => {
                let current = store.store_by_id(store_id)?;
                let client = store.client_by_id(&current.client_id)?;
                vec![client.name.clone(), current.name.clone()]
            }
        })
    }

    /// Heading for the current level.
    pub fn title(&self, store: &EntityStore) -> Result<String> {
        Ok(match &self.state {
            NavigationState::AtClients => "Sales by Client".to_string(),
            NavigationState::AtStores { client_id } => {
                format!("{} - Sales by Store", store.client_by_id(client_id)?.name)
            }
            NavigationState::AtEmployees { store_id } => {
                format!("{} - Sales by Employee", store.store_by_id(store_id)?.name)
            }
        })
    }

    /// Breadcrumb joined with `" > "` and ending in [`SALES_TRACKING_LABEL`].
    pub fn subtitle(&self, store: &EntityStore) -> Result<String> {
        let mut parts = self.breadcrumb(store)?;
        parts.push(SALES_TRACKING_LABEL.to_string());
        Ok(parts.join(" > "))
    }
}
