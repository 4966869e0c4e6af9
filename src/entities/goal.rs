//! Goal fields that can be overridden per entity from the grid.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// One of the four editable goal columns
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GoalField {
    /// Monthly goal (meta mês)
    #[serde(rename = "metaMes")]
    MonthlyGoal,
    /// Monthly super goal (super meta mês)
    #[serde(rename = "superMetaMes")]
    MonthlySuperGoal,
    /// Daily goal (meta dia)
    #[serde(rename = "metaDia")]
    DailyGoal,
    /// Daily super goal (super meta dia)
    #[serde(rename = "superMetaDia")]
    DailySuperGoal,
}

impl GoalField {
    /// All fields in grid column order.
    pub const ALL: [Self; 4] = [
        Self::MonthlyGoal,
        Self::MonthlySuperGoal,
        Self::DailyGoal,
        Self::DailySuperGoal,
    ];

    /// Wire name used by the grid.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MonthlyGoal => "metaMes",
            Self::MonthlySuperGoal => "superMetaMes",
            Self::DailyGoal => "metaDia",
            Self::DailySuperGoal => "superMetaDia",
        }
    }
}

impl fmt::Display for GoalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| Error::Config {
                message: format!("Unknown goal field: {s}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_field_parses_grid_names() -> Result<()> {
        assert_eq!("metaMes".parse::<GoalField>()?, GoalField::MonthlyGoal);
        assert_eq!(
            "superMetaDia".parse::<GoalField>()?,
            GoalField::DailySuperGoal
        );
        Ok(())
    }

    #[test]
    fn test_goal_field_rejects_unknown_name() {
        assert!("metaAno".parse::<GoalField>().is_err());
    }
}
