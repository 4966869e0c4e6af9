//! Dashboard - one user session over the sales engine.
//!
//! Ties the entity store, the navigator, the reference-date clock and the
//! active ledger together and exposes what the grid needs: rows for the
//! current level, titles, performance figures and the edit operations.

use super::{
    aggregate::Aggregator,
    calendar::{Clock, Period, SystemClock},
    entity_store::EntityStore,
    hooks::{ReportImporter, RowExporter},
    input::coerce_amount,
    ledger::LedgerKind,
    navigator::{Level, NavigationState, Navigator},
    performance::{PerformanceResult, performance},
    projector::{DEFAULT_PAGE_SIZE, GroupSpec, Row, TableProjector, apply_groups, paginate},
};
use crate::{
    entities::{GoalField, NewSale, NodeRef, Sale},
    errors::Result,
};
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{debug, info};

/// Node a row id refers to at a given level.
#[must_use]
pub fn node_at_level(level: Level, id: &str) -> NodeRef {
    match level {
        Level::Clients => NodeRef::client(id),
        Level::Stores => NodeRef::store(id),
        Level::Employees => NodeRef::employee(id),
    }
}

/// One page of the current view
#[derive(Debug, Clone, PartialEq)]
pub struct RowsPage {
    /// Rows on the page
    pub rows: Vec<Row>,
    /// 1-based page number
    pub page: usize,
    /// Pages available
    pub total_pages: usize,
}

/// Session state around an [`EntityStore`].
pub struct Dashboard {
    store: EntityStore,
    navigator: Navigator,
    clock: Box<dyn Clock>,
    ledger: LedgerKind,
    page_size: usize,
    groups: HashMap<Level, Vec<GroupSpec>>,
}

impl Dashboard {
    /// Dashboard at the client list, reading discrete sales against the
    /// wall-clock date.
    #[must_use]
    pub fn new(store: EntityStore) -> Self {
        Self {
            store,
            navigator: Navigator::new(),
            clock: Box::new(SystemClock),
            ledger: LedgerKind::default(),
            page_size: DEFAULT_PAGE_SIZE,
            groups: HashMap::new(),
        }
    }

    /// Replaces the reference-date supplier.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Selects the ledger the views read.
    #[must_use]
    pub const fn with_ledger(mut self, ledger: LedgerKind) -> Self {
        self.ledger = ledger;
        self
    }

    /// Sets the number of rows per page.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Registers display groups for rows at `level`.
    #[must_use]
    pub fn with_groups(mut self, level: Level, groups: Vec<GroupSpec>) -> Self {
        self.groups.entry(level).or_default().extend(groups);
        self
    }

    /// Reference date for goal comparisons.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Underlying entity store.
    #[must_use]
    pub const fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Current navigation state.
    #[must_use]
    pub const fn state(&self) -> &NavigationState {
        self.navigator.state()
    }

    /// Ledger the views read.
    #[must_use]
    pub const fn ledger(&self) -> LedgerKind {
        self.ledger
    }

    /// Switches the ledger the views read.
    pub fn set_ledger(&mut self, ledger: LedgerKind) {
        debug!(?ledger, "Switching ledger");
        self.ledger = ledger;
    }

    // --- Navigation ----------------------------------------------------

    /// Drills into a client or store row.
    pub fn select(&mut self, id: &str) -> Result<&NavigationState> {
        self.navigator.select(&self.store, id)
    }

    /// Moves one level up.
    pub fn back(&mut self) -> Result<&NavigationState> {
        self.navigator.back(&self.store)
    }

    /// Heading for the current level.
    pub fn title(&self) -> Result<String> {
        self.navigator.title(&self.store)
    }

    /// Breadcrumb subtitle for the current level.
    pub fn subtitle(&self) -> Result<String> {
        self.navigator.subtitle(&self.store)
    }

    /// Names of the selected ancestors.
    pub fn breadcrumb(&self) -> Result<Vec<String>> {
        self.navigator.breadcrumb(&self.store)
    }

    // --- Views ---------------------------------------------------------

    /// The `days` trailing days up to today.
    #[must_use]
    pub fn trailing_period(&self, days: u32) -> Period {
        Period::trailing(self.today(), days)
    }

    /// Rows for the current level, with display groups applied.
    pub fn rows(&self, period: &Period) -> Result<Vec<Row>> {
        let state = self.navigator.state();
        let level = state.level();
        let scope = state.scope();
        let projector = TableProjector::new(Aggregator::new(&self.store, self.ledger));
        let rows = projector.project(level, scope.as_ref().map(NodeRef::id), period)?;

        Ok(match self.groups.get(&level) {
            Some(groups) if !groups.is_empty() => apply_groups(rows, groups, period),
            _ => rows,
        })
    }

    /// One page of [`Self::rows`].
    pub fn rows_page(&self, period: &Period, page: usize) -> Result<RowsPage> {
        let rows = self.rows(period)?;
        let slice = paginate(&rows, page, self.page_size);
        Ok(RowsPage {
            rows: slice.rows.to_vec(),
            page,
            total_pages: slice.total_pages,
        })
    }

    /// Performance of a node today.
    pub fn performance(&self, node: &NodeRef) -> Result<PerformanceResult> {
        self.performance_on(node, self.today())
    }

    /// Performance of a node on a given day.
    pub fn performance_on(&self, node: &NodeRef, date: NaiveDate) -> Result<PerformanceResult> {
        performance(&Aggregator::new(&self.store, self.ledger), node, date)
    }

    // --- Edits ---------------------------------------------------------

    /// Records a sale.
    pub fn record_sale(&mut self, sale: NewSale) -> Result<Sale> {
        self.store.record_sale(sale)
    }

    /// Records a sale dated today.
    pub fn record_sale_today(
        &mut self,
        employee_id: &str,
        amount: f64,
        description: Option<String>,
    ) -> Result<Sale> {
        let date = self.today();
        self.store.record_sale(NewSale {
            employee_id: employee_id.to_string(),
            amount,
            date,
            description,
        })
    }

    /// Replaces a sale by id.
    pub fn edit_sale(&mut self, sale: Sale) -> Result<()> {
        self.store.edit_sale(sale)
    }

    /// Sets a goal override on a node.
    pub fn set_goal_override(&mut self, node: NodeRef, field: GoalField, value: f64) -> Result<()> {
        self.store.set_goal_override(node, field, value)
    }

    /// Sets a grid cell on a node.
    pub fn set_daily_cell(&mut self, node: NodeRef, date: NaiveDate, value: f64) -> Result<()> {
        self.store.set_daily_cell(node, date, value)
    }

    /// Grid edit of a day cell on a row of the current level. Unreadable
    /// input is stored as 0. Only employee rows hold cells; client and store
    /// rows fail with `RollupCell`.
    pub fn update_cell(&mut self, row_id: &str, date: NaiveDate, input: &str) -> Result<()> {
        let node = node_at_level(self.navigator.state().level(), row_id);
        self.store.set_daily_cell(node, date, coerce_amount(input))
    }

    /// Grid edit of a goal column on a row of the current level.
    pub fn update_goal(&mut self, row_id: &str, field: GoalField, input: &str) -> Result<()> {
        let node = node_at_level(self.navigator.state().level(), row_id);
        self.store
            .set_goal_override(node, field, coerce_amount(input))
    }

    /// Row deletion requested by the grid. Entities are never deleted, so
    /// this only records the request.
    pub fn delete_row(&self, row_id: &str) {
        info!(row_id, level = ?self.navigator.state().level(), "Row deletion requested; ignored");
    }

    // --- Hooks ---------------------------------------------------------

    /// Hands the current view to an exporter.
    pub fn export(&self, exporter: &mut dyn RowExporter, period: &Period) -> Result<()> {
        let rows = self.rows(period)?;
        exporter.export(&self.title()?, &rows)
    }

    /// Applies cell values from an importer. Every update is checked first,
    /// so an unknown node or a roll-up node rejects the whole batch.
    pub fn import(&mut self, importer: &mut dyn ReportImporter) -> Result<usize> {
        let updates = importer.import()?;
        for update in &updates {
            self.store.ensure_cell_node(&update.node)?;
        }
        let count = updates.len();
        for update in updates {
            self.store
                .set_daily_cell(update.node, update.date, update.value)?;
        }
        info!(count, "Imported grid cells");
        Ok(count)
    }
}
