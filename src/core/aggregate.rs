//! Roll-up of sales through the client → store → employee hierarchy.
//!
//! A node's figure for a day is whatever its ledger recorded against it
//! directly; failing that, the sum of its children's figures for the same day.
//! Both ledgers only carry records for employees, so stores and clients are
//! always pure roll-ups. A node's figure over a period is the sum of its
//! per-day figures.

use super::{
    calendar::Period,
    entity_store::EntityStore,
    ledger::{LedgerKind, SalesLedger},
};
use crate::{entities::NodeRef, errors::Result};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Sums sales for any node, reading one ledger.
#[derive(Clone, Copy)]
pub struct Aggregator<'a> {
    store: &'a EntityStore,
    ledger: &'a dyn SalesLedger,
}

impl<'a> Aggregator<'a> {
    /// Aggregator over the ledger of the given kind.
    #[must_use]
    pub fn new(store: &'a EntityStore, kind: LedgerKind) -> Self {
        Self {
            store,
            ledger: store.ledger(kind),
        }
    }

    /// Which ledger the figures come from.
    #[must_use]
    pub fn ledger_kind(&self) -> LedgerKind {
        self.ledger.kind()
    }

    /// The entity store being read.
    #[must_use]
    pub const fn store(&self) -> &'a EntityStore {
        self.store
    }

    /// Total sales of `node` over `period`.
    ///
    /// Fails with `NotFound` when the node does not exist. Empty subtrees and
    /// empty periods yield 0.
    pub fn aggregate(&self, node: &NodeRef, period: &Period) -> Result<f64> {
        self.store.ensure_node(node)?;
        period
            .days()
            .iter()
            .map(|day| self.day_total(node, *day))
            .sum()
    }

    /// Per-day totals of `node`, one entry for every day in `period`.
    pub fn daily_totals(&self, node: &NodeRef, period: &Period) -> Result<BTreeMap<NaiveDate, f64>> {
        self.store.ensure_node(node)?;
        period
            .days()
            .iter()
            .map(|day| Ok((*day, self.day_total(node, *day)?)))
            .collect()
    }

    fn day_total(&self, node: &NodeRef, date: NaiveDate) -> Result<f64> {
        if let Some(value) = self.ledger.recorded(node, date) {
            return Ok(value);
        }
        self.store
            .children(node)?
            .iter()
            .map(|child| self.day_total(child, date))
            .sum()
    }
}
