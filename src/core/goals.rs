//! Goal resolution for the four goal columns of a node.
//!
//! Each column resolves in order: explicit override, entity default, computed
//! default. Stores and employees carry their own daily goals; a client's daily
//! goals are the sums of its stores' resolved daily goals. Monthly goals
//! default to the resolved daily goal times the number of days in the month.

use super::entity_store::EntityStore;
use crate::{
    entities::{GoalField, NodeRef},
    errors::Result,
};
use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Resolved goal columns for one grid row
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalColumns {
    /// Monthly goal (meta mês)
    #[serde(rename = "metaMes")]
    pub monthly_goal: f64,
    /// Monthly super goal (super meta mês)
    #[serde(rename = "superMetaMes")]
    pub monthly_super_goal: f64,
    /// Daily goal (meta dia)
    #[serde(rename = "metaDia")]
    pub daily_goal: f64,
    /// Daily super goal (super meta dia)
    #[serde(rename = "superMetaDia")]
    pub daily_super_goal: f64,
}

impl GoalColumns {
    /// Value of one column.
    #[must_use]
    pub const fn get(&self, field: GoalField) -> f64 {
        match field {
            GoalField::MonthlyGoal => self.monthly_goal,
            GoalField::MonthlySuperGoal => self.monthly_super_goal,
            GoalField::DailyGoal => self.daily_goal,
            GoalField::DailySuperGoal => self.daily_super_goal,
        }
    }
}

impl Add for GoalColumns {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            monthly_goal: self.monthly_goal + rhs.monthly_goal,
            monthly_super_goal: self.monthly_super_goal + rhs.monthly_super_goal,
            daily_goal: self.daily_goal + rhs.daily_goal,
            daily_super_goal: self.daily_super_goal + rhs.daily_super_goal,
        }
    }
}

impl std::iter::Sum for GoalColumns {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Resolved daily goal and daily super goal of a node.
pub fn daily_goals(store: &EntityStore, node: &NodeRef) -> Result<(f64, f64)> {
    let (default_goal, default_super) = match node {
        NodeRef::Employee(id) => {
            let employee = store.employee_by_id(id)?;
            (employee.daily_goal, employee.super_goal)
        }
        NodeRef::Store(id) => {
            let s = store.store_by_id(id)?;
            (s.daily_goal, s.super_goal)
        }
        NodeRef::Client(id) => store.stores_by_client(id)?.iter().try_fold(
            (0.0, 0.0),
            |(goal, super_goal), s| -> Result<(f64, f64)> {
                let (g, sg) = daily_goals(store, &NodeRef::store(&s.id))?;
                Ok((goal + g, super_goal + sg))
            },
        )?,
    };

    Ok((
        store
            .goal_override(node, GoalField::DailyGoal)
            .unwrap_or(default_goal),
        store
            .goal_override(node, GoalField::DailySuperGoal)
            .unwrap_or(default_super),
    ))
}

/// All four goal columns of a node for a month with `days_in_month` days.
pub fn resolve_goals(store: &EntityStore, node: &NodeRef, days_in_month: u32) -> Result<GoalColumns> {
    let (daily_goal, daily_super_goal) = daily_goals(store, node)?;
    let days = f64::from(days_in_month);

    Ok(GoalColumns {
        monthly_goal: store
            .goal_override(node, GoalField::MonthlyGoal)
            .unwrap_or(daily_goal * days),
        monthly_super_goal: store
            .goal_override(node, GoalField::MonthlySuperGoal)
            .unwrap_or(daily_super_goal * days),
        daily_goal,
        daily_super_goal,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_employee_goals_default_from_entity() -> Result<()> {
        let store = seeded_store();
        let goals = resolve_goals(&store, &NodeRef::employee("1"), 31)?;

        assert_eq!(goals.daily_goal, 3000.0);
        assert_eq!(goals.daily_super_goal, 3900.0);
        assert_eq!(goals.monthly_goal, 93000.0);
        assert_eq!(goals.monthly_super_goal, 120_900.0);
        Ok(())
    }

    #[test]
    fn test_client_goals_sum_store_goals() -> Result<()> {
        let store = seeded_store();
        let (goal, super_goal) = daily_goals(&store, &NodeRef::client("1"))?;

        assert_eq!(goal, 27000.0);
        assert_eq!(super_goal, 35100.0);
        Ok(())
    }

    #[test]
    fn test_overrides_shadow_defaults() -> Result<()> {
        let mut store = seeded_store();
        store.set_goal_override(NodeRef::store("1"), GoalField::DailyGoal, 20000.0)?;
        store.set_goal_override(NodeRef::store("1"), GoalField::MonthlySuperGoal, 1.0)?;

        let goals = resolve_goals(&store, &NodeRef::store("1"), 30)?;
        assert_eq!(goals.daily_goal, 20000.0);
        assert_eq!(goals.daily_super_goal, 19500.0);
        assert_eq!(goals.monthly_goal, 600_000.0);
        assert_eq!(goals.monthly_super_goal, 1.0);

        // The client sees the overridden store goal
        let (client_goal, _) = daily_goals(&store, &NodeRef::client("1"))?;
        assert_eq!(client_goal, 32000.0);
        Ok(())
    }

    #[test]
    fn test_goal_columns_sum() {
        let a = GoalColumns {
            monthly_goal: 1.0,
            monthly_super_goal: 2.0,
            daily_goal: 3.0,
            daily_super_goal: 4.0,
        };
        let total: GoalColumns = [a, a].into_iter().sum();
        assert_eq!(total.get(GoalField::DailySuperGoal), 8.0);
        assert_eq!(total.get(GoalField::MonthlyGoal), 2.0);
    }
}
