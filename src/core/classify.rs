//! Goal-based classification of a sales figure.
//!
//! A value is compared against a goal and a super goal and placed in one of
//! four tiers. Boundaries favour the higher tier: reaching the goal exactly
//! counts as met, reaching the super goal exactly counts as super.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stretch factor applied to a goal when no super goal is given.
pub const DEFAULT_SUPER_GOAL_FACTOR: f64 = 1.3;

/// Performance tier of a sales figure against its goals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceStatus {
    /// No sales yet, or nothing to evaluate against
    Neutral,
    /// Some sales, goal not reached
    Below,
    /// Goal reached
    Met,
    /// Super goal reached
    Super,
}

impl fmt::Display for PerformanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Neutral => "neutral",
            Self::Below => "below",
            Self::Met => "met",
            Self::Super => "super",
        };
        f.write_str(label)
    }
}

/// Outcome of [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Tier reached
    pub status: PerformanceStatus,
    /// Value as a percentage of the goal, 0 when there is no goal
    pub percentage: f64,
}

/// Super goal implied by a goal under the 30% stretch convention.
#[must_use]
pub fn default_super_goal(goal: f64) -> f64 {
    goal * DEFAULT_SUPER_GOAL_FACTOR
}

/// Classifies `value` against `goal` and `super_goal`.
///
/// A goal that is zero, negative or not finite means the entity is not
/// evaluated and the result is always neutral. A missing super goal falls
/// back to [`default_super_goal`].
#[must_use]
pub fn classify(value: f64, goal: f64, super_goal: Option<f64>) -> Classification {
    if !(goal.is_finite() && goal > 0.0) {
        return Classification {
            status: PerformanceStatus::Neutral,
            percentage: 0.0,
        };
    }

    let super_goal = super_goal.unwrap_or_else(|| default_super_goal(goal));
    let status = if value >= super_goal {
        PerformanceStatus::Super
    } else if value >= goal {
        PerformanceStatus::Met
    } else if value > 0.0 {
        PerformanceStatus::Below
    } else {
        PerformanceStatus::Neutral
    };

    Classification {
        status,
        percentage: (value / goal) * 100.0,
    }
}

/// Checks that a super goal is not below its goal.
///
/// The check is advisory: inconsistent goals are still accepted everywhere,
/// callers decide whether to log or surface the error.
pub fn check_goals(id: &str, goal: f64, super_goal: f64) -> Result<()> {
    if super_goal < goal {
        return Err(Error::InconsistentGoal {
            id: id.to_string(),
            goal,
            super_goal,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_classify_tiers() {
        assert_eq!(classify(0.0, 100.0, Some(130.0)).status, PerformanceStatus::Neutral);
        assert_eq!(classify(50.0, 100.0, Some(130.0)).status, PerformanceStatus::Below);
        assert_eq!(classify(110.0, 100.0, Some(130.0)).status, PerformanceStatus::Met);
        assert_eq!(classify(200.0, 100.0, Some(130.0)).status, PerformanceStatus::Super);
    }

    #[test]
    fn test_classify_boundaries_favor_higher_tier() {
        assert_eq!(classify(100.0, 100.0, Some(130.0)).status, PerformanceStatus::Met);
        assert_eq!(classify(130.0, 100.0, Some(130.0)).status, PerformanceStatus::Super);
    }

    #[test]
    fn test_classify_default_super_goal() {
        assert_eq!(classify(129.0, 100.0, None).status, PerformanceStatus::Met);
        assert_eq!(classify(130.0, 100.0, None).status, PerformanceStatus::Super);
    }

    #[test]
    fn test_classify_without_goal_is_neutral() {
        let result = classify(5000.0, 0.0, Some(10.0));
        assert_eq!(result.status, PerformanceStatus::Neutral);
        assert_eq!(result.percentage, 0.0);
        assert_eq!(classify(5000.0, f64::NAN, None).status, PerformanceStatus::Neutral);
    }

    #[test]
    fn test_classify_negative_value_is_neutral() {
        let result = classify(-40.0, 100.0, None);
        assert_eq!(result.status, PerformanceStatus::Neutral);
        assert_eq!(result.percentage, -40.0);
    }

    #[test]
    fn test_classify_percentage() {
        let result = classify(5000.0, 3000.0, Some(3900.0));
        assert_eq!(result.status, PerformanceStatus::Super);
        assert!((result.percentage - 166.67).abs() < 0.01);
    }

    #[test]
    fn test_classify_is_monotonic_in_value() {
        let mut previous = PerformanceStatus::Neutral;
        for step in 0..=300 {
            let value = f64::from(step);
            let status = classify(value, 100.0, Some(150.0)).status;
            assert!(status >= previous, "tier dropped at {value}");
            previous = status;
        }
        assert_eq!(previous, PerformanceStatus::Super);
    }

    #[test]
    fn test_inverted_goals_classify_super_below_met() {
        // super goal under the goal: super is reached before met
        assert_eq!(classify(90.0, 100.0, Some(80.0)).status, PerformanceStatus::Super);
        assert!(check_goals("e1", 100.0, 80.0).is_err());
        assert!(check_goals("e1", 100.0, 130.0).is_ok());
    }
}
