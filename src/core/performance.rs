//! Performance of a single node against its own daily goals.
//!
//! Sales roll up from the node's subtree, but the goals compared against are
//! the node's own: a store is judged by its own daily goal regardless of what
//! its employees aim for. Results are recomputed on every call.

use super::{
    aggregate::Aggregator,
    calendar::Period,
    classify::{PerformanceStatus, classify},
    goals::daily_goals,
};
use crate::{entities::NodeRef, errors::Result};
use serde::{Deserialize, Serialize};

/// Derived performance figures for one node on one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceResult {
    /// Sales rolled up from the node's subtree
    pub total_sales: f64,
    /// Daily goal the sales were compared against
    pub daily_goal: f64,
    /// Daily super goal the sales were compared against
    pub super_goal: f64,
    /// Tier reached
    pub status: PerformanceStatus,
    /// Sales as a percentage of the daily goal
    pub percentage: f64,
}

/// Computes the performance of `node` for the single day `date`.
pub fn performance(
    aggregator: &Aggregator<'_>,
    node: &NodeRef,
    date: chrono::NaiveDate,
) -> Result<PerformanceResult> {
    let total_sales = aggregator.aggregate(node, &Period::day(date))?;
    let (daily_goal, super_goal) = daily_goals(aggregator.store(), node)?;
    let classification = classify(total_sales, daily_goal, Some(super_goal));

    Ok(PerformanceResult {
        total_sales,
        daily_goal,
        super_goal,
        status: classification.status,
        percentage: classification.percentage,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{
        core::ledger::LedgerKind,
        entities::{Client, Employee, GoalField, Store},
        test_utils::*,
    };

    #[test]
    fn test_employee_super_performance() -> Result<()> {
        let store = seeded_store();
        let agg = Aggregator::new(&store, LedgerKind::Events);
        let result = performance(&agg, &NodeRef::employee("1"), reference_date())?;

        assert_eq!(result.total_sales, 5000.0);
        assert_eq!(result.status, PerformanceStatus::Super);
        assert!((result.percentage - 166.67).abs() < 0.01);
        Ok(())
    }

    #[test]
    fn test_reference_scenario_store_uses_own_goal() -> Result<()> {
        let mut store = crate::core::entity_store::EntityStore::new();
        store.insert_client(Client::new("c", "Client"))?;
        store.insert_store(Store::new("s", "Store", "c", 6000.0, 7800.0))?;
        store.insert_employee(Employee::new("e", "E", "s", 3000.0, 3900.0))?;
        store.insert_employee(Employee::new("f", "F", "s", 2500.0, 3250.0))?;
        store.record_sale(new_sale("e", 4200.0, reference_date()))?;
        store.record_sale(new_sale("e", 800.0, reference_date()))?;
        let agg = Aggregator::new(&store, LedgerKind::Events);

        let employee = performance(&agg, &NodeRef::employee("e"), reference_date())?;
        assert_eq!(employee.status, PerformanceStatus::Super);

        let idle = performance(&agg, &NodeRef::employee("f"), reference_date())?;
        assert_eq!(idle.total_sales, 0.0);
        assert_eq!(idle.status, PerformanceStatus::Neutral);

        let s = performance(&agg, &NodeRef::store("s"), reference_date())?;
        assert_eq!(s.total_sales, 5000.0);
        assert_eq!(s.daily_goal, 6000.0);
        assert_eq!(s.status, PerformanceStatus::Below);
        Ok(())
    }

    #[test]
    fn test_client_performance_against_summed_goals() -> Result<()> {
        let store = seeded_store();
        let agg = Aggregator::new(&store, LedgerKind::Events);
        let result = performance(&agg, &NodeRef::client("1"), reference_date())?;

        assert_eq!(result.total_sales, 15900.0);
        assert_eq!(result.daily_goal, 27000.0);
        assert_eq!(result.status, PerformanceStatus::Below);
        Ok(())
    }

    #[test]
    fn test_goal_override_changes_status() -> Result<()> {
        let mut store = seeded_store();
        store.set_goal_override(NodeRef::employee("3"), GoalField::DailyGoal, 1500.0)?;
        store.set_goal_override(NodeRef::employee("3"), GoalField::DailySuperGoal, 1700.0)?;
        let agg = Aggregator::new(&store, LedgerKind::Events);

        let result = performance(&agg, &NodeRef::employee("3"), reference_date())?;
        assert_eq!(result.total_sales, 1800.0);
        assert_eq!(result.status, PerformanceStatus::Super);
        Ok(())
    }

    #[test]
    fn test_idempotent_edit() -> Result<()> {
        let mut store = seeded_store();
        let mut sale = store.sale_by_id("2")?.clone();
        sale.amount = 1200.0;

        store.edit_sale(sale.clone())?;
        let once = performance(
            &Aggregator::new(&store, LedgerKind::Events),
            &NodeRef::employee("1"),
            reference_date(),
        )?;
        store.edit_sale(sale)?;
        let twice = performance(
            &Aggregator::new(&store, LedgerKind::Events),
            &NodeRef::employee("1"),
            reference_date(),
        )?;

        assert_eq!(once, twice);
        assert_eq!(twice.total_sales, 5400.0);
        Ok(())
    }
}
