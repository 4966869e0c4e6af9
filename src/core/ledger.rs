//! Sales ledgers - the two fact sources aggregation can read from.
//!
//! Discrete [`Sale`] records and grid cells typed directly into the table are
//! kept apart and never reconciled. Each view names the ledger it reads via
//! [`LedgerKind`], so the aggregator always knows which source produced a
//! figure.

use crate::{
    entities::{NodeRef, Sale},
    errors::{EntityKind, Error, Result},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Which fact source a view aggregates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerKind {
    /// Discrete sale records attributed to employees
    #[default]
    Events,
    /// Per-day values entered directly into grid cells
    Grid,
}

/// Read access shared by both ledgers.
pub trait SalesLedger {
    /// Source this ledger represents.
    fn kind(&self) -> LedgerKind;

    /// Value recorded directly against `node` on `date`, if any.
    ///
    /// `None` means the ledger holds nothing for this node on that day and the
    /// aggregator should roll up the node's children instead.
    fn recorded(&self, node: &NodeRef, date: NaiveDate) -> Option<f64>;
}

/// Ledger of discrete sale records, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct EventLedger {
    sales: Vec<Sale>,
}

impl EventLedger {
    /// All sales in insertion order.
    #[must_use]
    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    /// Finds a sale by id.
    #[must_use]
    pub fn get(&self, sale_id: &str) -> Option<&Sale> {
        self.sales.iter().find(|sale| sale.id == sale_id)
    }

    /// Sales for one employee, optionally limited to one day.
    pub fn for_employee<'s, 'i>(
        &'s self,
        employee_id: &'i str,
        date: Option<NaiveDate>,
    ) -> impl Iterator<Item = &'s Sale> + 'i
    where
        's: 'i,
    {
        self.sales.iter().filter(move |sale| {
            sale.employee_id == employee_id && date.is_none_or(|d| sale.date == d)
        })
    }

    pub(crate) fn push(&mut self, sale: Sale) {
        self.sales.push(sale);
    }

    /// Replaces the record with the same id, keeping its position.
    pub(crate) fn replace(&mut self, sale: Sale) -> Result<()> {
        let slot = self
            .sales
            .iter_mut()
            .find(|existing| existing.id == sale.id)
            .ok_or_else(|| Error::not_found(EntityKind::Sale, sale.id.clone()))?;
        *slot = sale;
        Ok(())
    }
}

impl SalesLedger for EventLedger {
    fn kind(&self) -> LedgerKind {
        LedgerKind::Events
    }

    fn recorded(&self, node: &NodeRef, date: NaiveDate) -> Option<f64> {
        // Sales are only ever attributed to employees.
        let NodeRef::Employee(employee_id) = node else {
            return None;
        };
        let mut matched = false;
        let total = self
            .for_employee(employee_id, Some(date))
            .inspect(|_| matched = true)
            .map(|sale| sale.amount)
            .sum::<f64>();
        matched.then_some(total)
    }
}

/// Ledger of values typed straight into grid cells, keyed by node and day.
#[derive(Debug, Clone, Default)]
pub struct GridLedger {
    cells: HashMap<(NodeRef, NaiveDate), f64>,
}

impl GridLedger {
    /// Value of one cell, if it was ever set.
    #[must_use]
    pub fn cell(&self, node: &NodeRef, date: NaiveDate) -> Option<f64> {
        self.cells.get(&(node.clone(), date)).copied()
    }

    /// Number of cells that hold a value.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell has been set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub(crate) fn set(&mut self, node: NodeRef, date: NaiveDate, value: f64) {
        debug!(%node, %date, value, "Setting grid cell");
        self.cells.insert((node, date), value);
    }
}

impl SalesLedger for GridLedger {
    fn kind(&self) -> LedgerKind {
        LedgerKind::Grid
    }

    fn recorded(&self, node: &NodeRef, date: NaiveDate) -> Option<f64> {
        self.cell(node, date)
    }
}
