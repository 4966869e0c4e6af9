//! Entity store - the static hierarchy plus the mutable fact tables.
//!
//! Clients, stores and employees are seeded once and only read afterwards.
//! Sales, goal overrides and grid cells change at runtime through the
//! mutation methods here; each one validates its references first and either
//! applies fully or returns an error without touching state.

use super::ledger::{EventLedger, GridLedger, LedgerKind, SalesLedger};
use crate::{
    entities::{Client, Employee, GoalField, NewSale, NodeRef, Sale, Store},
    errors::{EntityKind, Error, Result},
};
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{debug, warn};
use uuid::Uuid;

/// In-memory home of every entity and fact for one session.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    clients: Vec<Client>,
    stores: Vec<Store>,
    employees: Vec<Employee>,
    events: EventLedger,
    grid: GridLedger,
    goal_overrides: HashMap<(NodeRef, GoalField), f64>,
}

/// Replaces NaN and infinities with zero, the forgiving-input convention.
fn finite_or_zero(value: f64, context: &str) -> f64 {
    if value.is_finite() {
        value
    } else {
        warn!(value, context, "Non-finite amount coerced to 0");
        0.0
    }
}

impl EntityStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Seeding -------------------------------------------------------

    /// Adds a client. Fails if the id is already taken.
    pub fn insert_client(&mut self, mut client: Client) -> Result<()> {
        if self.clients.iter().any(|c| c.id == client.id) {
            return Err(duplicate_id(EntityKind::Client, &client.id));
        }
        client.stores.clear();
        self.clients.push(client);
        Ok(())
    }

    /// Adds a store. The owning client does not have to exist yet; stores
    /// that never find their client stay orphaned and are left out of
    /// roll-ups.
    pub fn insert_store(&mut self, mut store: Store) -> Result<()> {
        if self.stores.iter().any(|s| s.id == store.id) {
            return Err(duplicate_id(EntityKind::Store, &store.id));
        }
        store.employees.clear();
        self.stores.push(store);
        Ok(())
    }

    /// Adds an employee. Same orphan rules as [`Self::insert_store`].
    pub fn insert_employee(&mut self, employee: Employee) -> Result<()> {
        if self.employees.iter().any(|e| e.id == employee.id) {
            return Err(duplicate_id(EntityKind::Employee, &employee.id));
        }
        self.employees.push(employee);
        Ok(())
    }

    /// Loads a sale that already carries an id, as found in seed data.
    pub fn insert_sale(&mut self, sale: Sale) -> Result<()> {
        if self.events.get(&sale.id).is_some() {
            return Err(duplicate_id(EntityKind::Sale, &sale.id));
        }
        self.employee_by_id(&sale.employee_id)?;
        self.events.push(sale);
        Ok(())
    }

    // --- Lookups -------------------------------------------------------

    /// All clients in seed order.
    #[must_use]
    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    /// All stores in seed order, orphans included.
    #[must_use]
    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    /// All employees in seed order, orphans included.
    #[must_use]
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Looks up a client by id.
    pub fn client_by_id(&self, client_id: &str) -> Result<&Client> {
        self.clients
            .iter()
            .find(|c| c.id == client_id)
            .ok_or_else(|| Error::not_found(EntityKind::Client, client_id))
    }

    /// Looks up a store by id.
    pub fn store_by_id(&self, store_id: &str) -> Result<&Store> {
        self.stores
            .iter()
            .find(|s| s.id == store_id)
            .ok_or_else(|| Error::not_found(EntityKind::Store, store_id))
    }

    /// Looks up an employee by id.
    pub fn employee_by_id(&self, employee_id: &str) -> Result<&Employee> {
        self.employees
            .iter()
            .find(|e| e.id == employee_id)
            .ok_or_else(|| Error::not_found(EntityKind::Employee, employee_id))
    }

    /// Looks up a sale by id.
    pub fn sale_by_id(&self, sale_id: &str) -> Result<&Sale> {
        self.events
            .get(sale_id)
            .ok_or_else(|| Error::not_found(EntityKind::Sale, sale_id))
    }

    /// Confirms that the node exists.
    pub fn ensure_node(&self, node: &NodeRef) -> Result<()> {
        match node {
            NodeRef::Client(id) => self.client_by_id(id).map(|_| ()),
            NodeRef::Store(id) => self.store_by_id(id).map(|_| ()),
            NodeRef::Employee(id) => self.employee_by_id(id).map(|_| ()),
        }
    }

    /// Fails unless `node` is an existing employee, the only nodes that hold
    /// grid cells.
    pub fn ensure_cell_node(&self, node: &NodeRef) -> Result<()> {
        self.ensure_node(node)?;
        if matches!(node, NodeRef::Employee(_)) {
            Ok(())
        } else {
            Err(Error::RollupCell {
                node: node.to_string(),
            })
        }
    }

    /// Display name of a node.
    pub fn node_name(&self, node: &NodeRef) -> Result<&str> {
        Ok(match node {
            NodeRef::Client(id) => &self.client_by_id(id)?.name,
            NodeRef::Store(id) => &self.store_by_id(id)?.name,
            NodeRef::Employee(id) => &self.employee_by_id(id)?.name,
        })
    }

    /// Stores belonging to a client, in seed order.
    pub fn stores_by_client(&self, client_id: &str) -> Result<Vec<&Store>> {
        self.client_by_id(client_id)?;
        Ok(self
            .stores
            .iter()
            .filter(|s| s.client_id == client_id)
            .collect())
    }

    /// Employees working in a store, in seed order.
    pub fn employees_by_store(&self, store_id: &str) -> Result<Vec<&Employee>> {
        self.store_by_id(store_id)?;
        Ok(self
            .employees
            .iter()
            .filter(|e| e.store_id == store_id)
            .collect())
    }

    /// Sales credited to an employee, optionally only those on `date`.
    pub fn sales_by_employee(
        &self,
        employee_id: &str,
        date: Option<NaiveDate>,
    ) -> Result<Vec<&Sale>> {
        self.employee_by_id(employee_id)?;
        Ok(self.events.for_employee(employee_id, date).collect())
    }

    /// Direct children of a node in the hierarchy. Employees have none.
    pub fn children(&self, node: &NodeRef) -> Result<Vec<NodeRef>> {
        Ok(match node {
            NodeRef::Client(id) => self
                .stores_by_client(id)?
                .into_iter()
                .map(|s| NodeRef::store(&s.id))
                .collect(),
            NodeRef::Store(id) => self
                .employees_by_store(id)?
                .into_iter()
                .map(|e| NodeRef::employee(&e.id))
                .collect(),
            NodeRef::Employee(id) => {
                self.employee_by_id(id)?;
                Vec::new()
            }
        })
    }

    /// Stores whose client id does not resolve.
    #[must_use]
    pub fn orphan_stores(&self) -> Vec<&Store> {
        self.stores
            .iter()
            .filter(|s| self.client_by_id(&s.client_id).is_err())
            .collect()
    }

    /// Employees whose store id does not resolve.
    #[must_use]
    pub fn orphan_employees(&self) -> Vec<&Employee> {
        self.employees
            .iter()
            .filter(|e| self.store_by_id(&e.store_id).is_err())
            .collect()
    }

    /// Clients with their stores and employees attached by value.
    #[must_use]
    pub fn clients_with_hierarchy(&self) -> Vec<Client> {
        self.clients
            .iter()
            .map(|client| Client {
                stores: self
                    .stores
                    .iter()
                    .filter(|s| s.client_id == client.id)
                    .map(|store| Store {
                        employees: self
                            .employees
                            .iter()
                            .filter(|e| e.store_id == store.id)
                            .cloned()
                            .collect(),
                        ..store.clone()
                    })
                    .collect(),
                ..client.clone()
            })
            .collect()
    }

    // --- Ledgers and overrides -----------------------------------------

    /// The discrete-sale ledger.
    #[must_use]
    pub const fn events(&self) -> &EventLedger {
        &self.events
    }

    /// The grid-cell ledger.
    #[must_use]
    pub const fn grid(&self) -> &GridLedger {
        &self.grid
    }

    /// The ledger backing a given view.
    #[must_use]
    pub fn ledger(&self, kind: LedgerKind) -> &dyn SalesLedger {
        match kind {
            LedgerKind::Events => &self.events,
            LedgerKind::Grid => &self.grid,
        }
    }

    /// Override recorded for one goal column of a node.
    #[must_use]
    pub fn goal_override(&self, node: &NodeRef, field: GoalField) -> Option<f64> {
        self.goal_overrides.get(&(node.clone(), field)).copied()
    }

    // --- Mutations -----------------------------------------------------

    /// Records a new sale and returns it with a freshly assigned id.
    pub fn record_sale(&mut self, new_sale: NewSale) -> Result<Sale> {
        self.employee_by_id(&new_sale.employee_id)?;

        let mut sale = new_sale.with_id(format!("sale_{}", Uuid::new_v4().simple()));
        sale.amount = finite_or_zero(sale.amount, "record_sale");
        debug!(
            sale_id = %sale.id,
            employee_id = %sale.employee_id,
            amount = sale.amount,
            date = %sale.date,
            "Recording sale"
        );
        self.events.push(sale.clone());
        Ok(sale)
    }

    /// Replaces an existing sale by id.
    pub fn edit_sale(&mut self, mut sale: Sale) -> Result<()> {
        self.sale_by_id(&sale.id)?;
        self.employee_by_id(&sale.employee_id)?;

        sale.amount = finite_or_zero(sale.amount, "edit_sale");
        debug!(sale_id = %sale.id, amount = sale.amount, "Editing sale");
        self.events.replace(sale)
    }

    /// Shadows one goal column of a node with an explicit value.
    pub fn set_goal_override(&mut self, node: NodeRef, field: GoalField, value: f64) -> Result<()> {
        self.ensure_node(&node)?;

        let value = finite_or_zero(value, "set_goal_override");
        debug!(%node, %field, value, "Setting goal override");
        self.goal_overrides.insert((node, field), value);
        Ok(())
    }

    /// Sets the grid value of an employee for one day.
    ///
    /// Store and client figures are always the sum of their employees, so
    /// cells on those nodes are rejected with `RollupCell`.
    pub fn set_daily_cell(&mut self, node: NodeRef, date: NaiveDate, value: f64) -> Result<()> {
        self.ensure_cell_node(&node)?;

        let value = finite_or_zero(value, "set_daily_cell");
        self.grid.set(node, date, value);
        Ok(())
    }
}

fn duplicate_id(kind: EntityKind, id: &str) -> Error {
    Error::Config {
        message: format!("Duplicate {kind} id: {id}"),
    }
}
