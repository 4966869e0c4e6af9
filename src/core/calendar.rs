//! Calendar helpers - reference dates, periods and day-of-week labels.
//!
//! Nothing in the core reads the wall clock directly. Callers pass a
//! reference date, usually obtained from a [`Clock`], so every computation
//! can be pinned to a fixed day in tests.

use crate::errors::{Error, Result};
use chrono::{Datelike, Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Supplies the "today" used for goal comparisons.
pub trait Clock {
    /// Current reference date.
    fn today(&self) -> NaiveDate;
}

/// Reads the local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always returns the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// An ordered, duplicate-free set of calendar days.
///
/// Used both for single-day aggregation and for the days shown as grid
/// columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    days: Vec<NaiveDate>,
}

impl Period {
    /// A period covering exactly one day.
    #[must_use]
    pub fn day(date: NaiveDate) -> Self {
        Self { days: vec![date] }
    }

    /// Every day from `from` to `to`, both inclusive. Empty when `to < from`.
    #[must_use]
    pub fn range(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            days: from.iter_days().take_while(|d| *d <= to).collect(),
        }
    }

    /// The `count` days ending on (and including) `end`.
    #[must_use]
    pub fn trailing(end: NaiveDate, count: u32) -> Self {
        if count == 0 {
            return Self { days: Vec::new() };
        }
        let start = end
            .checked_sub_days(Days::new(u64::from(count - 1)))
            .unwrap_or(NaiveDate::MIN);
        Self::range(start, end)
    }

    /// From the first of `reference`'s month up to `reference` itself.
    #[must_use]
    pub fn month_to_date(reference: NaiveDate) -> Self {
        Self::range(reference.with_day(1).unwrap_or(reference), reference)
    }

    /// Builds a period from arbitrary days, sorting and removing duplicates.
    #[must_use]
    pub fn from_days(days: impl IntoIterator<Item = NaiveDate>) -> Self {
        let mut days: Vec<NaiveDate> = days.into_iter().collect();
        days.sort_unstable();
        days.dedup();
        Self { days }
    }

    /// Days in ascending order.
    #[must_use]
    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    /// Whether `date` falls in the period.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.days.binary_search(&date).is_ok()
    }

    /// Number of days in the period.
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether the period has no days.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Last day of the period, if any.
    #[must_use]
    pub fn last(&self) -> Option<NaiveDate> {
        self.days.last().copied()
    }
}

/// Number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(Error::InvalidDate {
        year,
        month,
        day: 1,
    })?;
    let next = first
        .checked_add_months(chrono::Months::new(1))
        .ok_or(Error::InvalidDate {
            year,
            month,
            day: 1,
        })?;
    // Cast safety: a month has between 28 and 31 days.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let days = next.signed_duration_since(first).num_days() as u32;
    Ok(days)
}

/// Day of the week with Sunday = 0 through Saturday = 6.
pub fn weekday_index(year: i32, month: u32, day: u32) -> Result<u32> {
    NaiveDate::from_ymd_opt(year, month, day)
        .map(|date| date.weekday().num_days_from_sunday())
        .ok_or(Error::InvalidDate { year, month, day })
}

/// Grid header labels, indexed Sunday = 0.
pub const WEEKDAY_LABELS: [&str; 7] = ["DOM", "SEG", "TER", "QUA", "QUI", "SEX", "SÁB"];

/// Short header label for a day of the month (e.g. `"SEX"`).
pub fn weekday_label(year: i32, month: u32, day: u32) -> Result<&'static str> {
    let index = weekday_index(year, month, day)?;
    Ok(WEEKDAY_LABELS[index as usize])
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_range_is_inclusive() {
        let period = Period::range(date(2025, 1, 22), date(2025, 1, 31));
        assert_eq!(period.len(), 10);
        assert_eq!(period.days()[0], date(2025, 1, 22));
        assert_eq!(period.last(), Some(date(2025, 1, 31)));
    }

    #[test]
    fn test_range_reversed_is_empty() {
        assert!(Period::range(date(2025, 1, 5), date(2025, 1, 1)).is_empty());
    }

    #[test]
    fn test_trailing_crosses_month_boundary() {
        let period = Period::trailing(date(2025, 3, 2), 3);
        assert_eq!(
            period.days(),
            &[date(2025, 2, 28), date(2025, 3, 1), date(2025, 3, 2)]
        );
        assert!(Period::trailing(date(2025, 3, 2), 0).is_empty());
    }

    #[test]
    fn test_month_to_date() {
        let period = Period::month_to_date(date(2025, 1, 3));
        assert_eq!(period.len(), 3);
        assert!(period.contains(date(2025, 1, 1)));
        assert!(!period.contains(date(2024, 12, 31)));
    }

    #[test]
    fn test_from_days_sorts_and_dedups() {
        let period = Period::from_days([date(2025, 1, 3), date(2025, 1, 1), date(2025, 1, 3)]);
        assert_eq!(period.days(), &[date(2025, 1, 1), date(2025, 1, 3)]);
    }

    #[test]
    fn test_days_in_month() -> Result<()> {
        assert_eq!(days_in_month(2024, 2)?, 29);
        assert_eq!(days_in_month(2025, 2)?, 28);
        assert_eq!(days_in_month(2025, 12)?, 31);
        assert!(days_in_month(2025, 13).is_err());
        Ok(())
    }

    #[test]
    fn test_weekday_sunday_is_zero() -> Result<()> {
        // 2025-01-05 was a Sunday
        assert_eq!(weekday_index(2025, 1, 5)?, 0);
        assert_eq!(weekday_label(2025, 1, 5)?, "DOM");
        // 2025-01-03 was a Friday
        assert_eq!(weekday_label(2025, 1, 3)?, "SEX");
        Ok(())
    }

    #[test]
    fn test_weekday_invalid_day() {
        assert!(matches!(
            weekday_index(2025, 2, 30),
            Err(Error::InvalidDate { day: 30, .. })
        ));
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(date(2025, 1, 3));
        assert_eq!(clock.today(), date(2025, 1, 3));
    }
}
