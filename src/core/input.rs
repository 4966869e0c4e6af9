//! Amount parsing at the edit boundary.
//!
//! Grid cells and goal columns accept free text. The strict parser reports
//! bad input as `InvalidAmount`; the forgiving one, used by the grid, turns it
//! into 0 and moves on.

use crate::errors::{Error, Result};
use tracing::warn;

/// Parses a monetary amount, rejecting empty, non-numeric and non-finite
/// input.
pub fn parse_amount(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(Error::InvalidAmount {
            input: input.to_string(),
        }),
    }
}

/// Parses a monetary amount, falling back to 0 for anything unreadable.
#[must_use]
pub fn coerce_amount(input: &str) -> f64 {
    parse_amount(input).unwrap_or_else(|e| {
        warn!(error = %e, "Coercing unreadable amount to 0");
        0.0
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_amount() -> Result<()> {
        assert_eq!(parse_amount("4200")?, 4200.0);
        assert_eq!(parse_amount(" 12.5 ")?, 12.5);
        assert_eq!(parse_amount("-30")?, -30.0);
        Ok(())
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        for input in ["", "abc", "NaN", "inf", "12,50"] {
            assert!(
                matches!(parse_amount(input), Err(Error::InvalidAmount { .. })),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_coerce_amount_defaults_to_zero() {
        assert_eq!(coerce_amount("abc"), 0.0);
        assert_eq!(coerce_amount(""), 0.0);
        assert_eq!(coerce_amount("7"), 7.0);
    }
}
