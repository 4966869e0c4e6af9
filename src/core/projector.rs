//! Table projection - shapes aggregated figures into grid rows.
//!
//! One row per entity at the requested level, carrying the four goal
//! columns, one value per day in view and the running total. Display groups
//! wrap existing rows in synthetic parent rows whose figures are the sums of
//! their children. Pagination slices the finished sequence.

use super::{
    aggregate::Aggregator,
    calendar::{Period, days_in_month},
    classify::{Classification, classify},
    goals::{GoalColumns, resolve_goals},
    navigator::Level,
};
use crate::{entities::NodeRef, errors::Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Rows per page when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// What a row stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    /// A client (cliente)
    Client,
    /// A store (filial)
    Store,
    /// An employee (funcionário)
    Employee,
    /// A display grouping of other rows (grupo)
    Group,
}

impl RowKind {
    /// Whether selecting the row drills down a level.
    #[must_use]
    pub const fn is_navigable(self) -> bool {
        matches!(self, Self::Client | Self::Store)
    }
}

/// One grid row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    /// Entity id, or the group id for group rows
    pub id: String,
    /// Display name
    pub name: String,
    /// What the row stands for
    pub kind: RowKind,
    /// Nesting depth, 0 for top-level rows
    pub depth: u32,
    /// Resolved goal columns
    #[serde(flatten)]
    pub goals: GoalColumns,
    /// Sales for every day in view
    pub per_day_sales: BTreeMap<NaiveDate, f64>,
    /// Sum of `per_day_sales`
    pub total: f64,
    /// Child rows, only present on group rows
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Row>,
}

impl Row {
    /// Builds a group row from its children.
    ///
    /// The group's per-day values and total are the sums of its children's,
    /// and its goals are the sums of theirs. Every day of `period` gets a
    /// value, 0 when no child has one. Children are re-nested one level below
    /// the group.
    #[must_use]
    pub fn group(
        id: impl Into<String>,
        name: impl Into<String>,
        children: Vec<Self>,
        period: &Period,
    ) -> Self {
        let mut per_day_sales: BTreeMap<NaiveDate, f64> =
            period.days().iter().map(|day| (*day, 0.0)).collect();
        for child in &children {
            for (day, value) in &child.per_day_sales {
                *per_day_sales.entry(*day).or_insert(0.0) += value;
            }
        }

        let mut group = Self {
            id: id.into(),
            name: name.into(),
            kind: RowKind::Group,
            depth: 0,
            goals: children.iter().map(|c| c.goals).sum(),
            per_day_sales,
            total: children.iter().map(|c| c.total).sum(),
            children,
        };
        group.set_depth(0);
        group
    }

    /// Moves the row to `depth`, its descendants following below it.
    pub fn set_depth(&mut self, depth: u32) {
        self.depth = depth;
        for child in &mut self.children {
            child.set_depth(depth + 1);
        }
    }

    /// Whether the row is a group row.
    #[must_use]
    pub fn is_group(&self) -> bool {
        self.kind == RowKind::Group
    }

    /// Value for one day, 0 when the day is not in view.
    #[must_use]
    pub fn day_value(&self, day: NaiveDate) -> f64 {
        self.per_day_sales.get(&day).copied().unwrap_or(0.0)
    }

    /// Classification of one day's cell against the daily goals.
    #[must_use]
    pub fn day_status(&self, day: NaiveDate) -> Classification {
        classify(
            self.day_value(day),
            self.goals.daily_goal,
            Some(self.goals.daily_super_goal),
        )
    }

    /// Classification of the total against the monthly goals.
    #[must_use]
    pub fn total_status(&self) -> Classification {
        classify(
            self.total,
            self.goals.monthly_goal,
            Some(self.goals.monthly_super_goal),
        )
    }
}

/// A display grouping, possibly nested
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSpec {
    /// Group id, must not clash with row ids at the same level
    pub id: String,
    /// Display name (e.g., a department)
    pub name: String,
    /// Ids of the rows this group collects, in display order
    #[serde(default)]
    pub members: Vec<String>,
    /// Nested groups, placed after the direct members
    #[serde(default)]
    pub subgroups: Vec<GroupSpec>,
}

/// Builds grid rows from aggregated figures.
pub struct TableProjector<'a> {
    aggregator: Aggregator<'a>,
}

impl<'a> TableProjector<'a> {
    /// Projector reading figures through `aggregator`.
    #[must_use]
    pub const fn new(aggregator: Aggregator<'a>) -> Self {
        Self { aggregator }
    }

    /// One row per entity at `level`, limited to the children of `scope`.
    ///
    /// Without a scope every non-orphaned entity at the level is listed.
    /// Monthly goal defaults use the length of the month containing the last
    /// day in view.
    pub fn project(&self, level: Level, scope: Option<&str>, period: &Period) -> Result<Vec<Row>> {
        let store = self.aggregator.store();
        let nodes: Vec<(NodeRef, RowKind)> = match (level, scope) {
            (Level::Clients, _) => store
                .clients()
                .iter()
                .map(|c| (NodeRef::client(&c.id), RowKind::Client))
                .collect(),
            (Level::Stores, Some(client_id)) => store
                .stores_by_client(client_id)?
                .into_iter()
                .map(|s| (NodeRef::store(&s.id), RowKind::Store))
                .collect(),
            (Level::Stores, None) => store
                .stores()
                .iter()
                .filter(|s| store.client_by_id(&s.client_id).is_ok())
                .map(|s| (NodeRef::store(&s.id), RowKind::Store))
                .collect(),
            (Level::Employees, Some(store_id)) => store
                .employees_by_store(store_id)?
                .into_iter()
                .map(|e| (NodeRef::employee(&e.id), RowKind::Employee))
                .collect(),
            (Level::Employees, None) => store
                .employees()
                .iter()
                .filter(|e| store.store_by_id(&e.store_id).is_ok())
                .map(|e| (NodeRef::employee(&e.id), RowKind::Employee))
                .collect(),
        };

        let month_days = match period.last() {
            Some(day) => days_in_month(day.year(), day.month())?,
            None => 30,
        };

        debug!(
            ?level,
            scope,
            rows = nodes.len(),
            days = period.len(),
            ledger = ?self.aggregator.ledger_kind(),
            "Projecting table"
        );

        nodes
            .into_iter()
            .map(|(node, kind)| self.row(&node, kind, period, month_days))
            .collect()
    }

    fn row(&self, node: &NodeRef, kind: RowKind, period: &Period, month_days: u32) -> Result<Row> {
        let store = self.aggregator.store();
        let per_day_sales = self.aggregator.daily_totals(node, period)?;
        let total = per_day_sales.values().sum();

        Ok(Row {
            id: node.id().to_string(),
            name: store.node_name(node)?.to_string(),
            kind,
            depth: 0,
            goals: resolve_goals(store, node, month_days)?,
            per_day_sales,
            total,
            children: Vec::new(),
        })
    }
}

/// Wraps rows into group rows.
///
/// Group rows come first, in the order given; rows not claimed by any group
/// follow in their original order. A row id claimed twice stays with the
/// first group that names it, and member ids with no matching row are
/// skipped.
#[must_use]
pub fn apply_groups(rows: Vec<Row>, groups: &[GroupSpec], period: &Period) -> Vec<Row> {
    let mut pool: Vec<Option<Row>> = rows.into_iter().map(Some).collect();
    let mut result: Vec<Row> = groups
        .iter()
        .map(|spec| build_group(spec, &mut pool, period))
        .collect();
    result.extend(pool.into_iter().flatten());
    result
}

fn build_group(spec: &GroupSpec, pool: &mut [Option<Row>], period: &Period) -> Row {
    let mut children = Vec::with_capacity(spec.members.len() + spec.subgroups.len());
    for member in &spec.members {
        let taken = pool
            .iter_mut()
            .find(|slot| slot.as_ref().is_some_and(|row| &row.id == member))
            .and_then(Option::take);
        match taken {
            Some(row) => children.push(row),
            None => warn!(group = %spec.id, member = %member, "Group member has no row in view"),
        }
    }
    for sub in &spec.subgroups {
        children.push(build_group(sub, pool, period));
    }
    Row::group(&spec.id, &spec.name, children, period)
}

/// One page of rows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page<'r> {
    /// Rows on this page
    pub rows: &'r [Row],
    /// 1-based page number that was requested
    pub page: usize,
    /// Number of pages available
    pub total_pages: usize,
    /// Number of rows across all pages
    pub total_rows: usize,
}

/// Slices `rows` into the 1-based `page` of `page_size` rows.
///
/// Page 0 and pages past the end are empty. A page size of 0 falls back to
/// [`DEFAULT_PAGE_SIZE`].
#[must_use]
pub fn paginate(rows: &[Row], page: usize, page_size: usize) -> Page<'_> {
    let size = if page_size == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        page_size
    };
    let total_pages = rows.len().div_ceil(size);
    let slice = if page == 0 {
        &rows[..0]
    } else {
        let start = (page - 1).saturating_mul(size).min(rows.len());
        let end = start.saturating_add(size).min(rows.len());
        &rows[start..end]
    };

    Page {
        rows: slice,
        page,
        total_pages,
        total_rows: rows.len(),
    }
}
