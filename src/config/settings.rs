//! Runtime settings from environment variables.
//!
//! Every setting has a default, so the binary runs with an empty
//! environment. Values that are present but unreadable are errors.

use crate::errors::{Error, Result};
use chrono::NaiveDate;
use std::{env, path::PathBuf, str::FromStr};

/// Default seed file location
pub const DEFAULT_SEED_PATH: &str = "seed.toml";
/// Default number of trailing days shown in the grid
pub const DEFAULT_VIEW_DAYS: u32 = 10;
/// Most trailing days the grid shows, one month of columns
pub const MAX_VIEW_DAYS: u32 = 31;

/// How the binary prints the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Fixed-width text table
    #[default]
    Text,
    /// Rows serialized as JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(Error::Config {
                message: format!("Unknown output format: {other}"),
            }),
        }
    }
}

/// Settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Seed file to load (`SALES_SEED_PATH`)
    pub seed_path: PathBuf,
    /// Fixed reference date (`SALES_REFERENCE_DATE`); today when unset
    pub reference_date: Option<NaiveDate>,
    /// Trailing days shown (`SALES_VIEW_DAYS`, 1 to 31)
    pub view_days: u32,
    /// Rows per page (`SALES_PAGE_SIZE`)
    pub page_size: usize,
    /// Output format (`SALES_OUTPUT`)
    pub output: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed_path: PathBuf::from(DEFAULT_SEED_PATH),
            reference_date: None,
            view_days: DEFAULT_VIEW_DAYS,
            page_size: crate::core::projector::DEFAULT_PAGE_SIZE,
            output: OutputFormat::default(),
        }
    }
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through `lookup`, which returns the raw value of a
    /// variable if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            seed_path: lookup("SALES_SEED_PATH").map_or(defaults.seed_path, PathBuf::from),
            reference_date: lookup("SALES_REFERENCE_DATE")
                .map(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d"))
                .transpose()?,
            view_days: parse_var(&lookup, "SALES_VIEW_DAYS")?
                .map(check_view_days)
                .transpose()?
                .unwrap_or(defaults.view_days),
            page_size: parse_var(&lookup, "SALES_PAGE_SIZE")?.unwrap_or(defaults.page_size),
            output: lookup("SALES_OUTPUT")
                .map(|raw| raw.parse())
                .transpose()?
                .unwrap_or(defaults.output),
        })
    }
}

fn check_view_days(days: u32) -> Result<u32> {
    if (1..=MAX_VIEW_DAYS).contains(&days) {
        Ok(days)
    } else {
        Err(Error::Config {
            message: format!("SALES_VIEW_DAYS must be between 1 and {MAX_VIEW_DAYS}, got {days}"),
        })
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>> {
    lookup(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|_| Error::Config {
                message: format!("{key} must be a non-negative integer, got {raw:?}"),
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_empty_environment() {
        let settings = Settings::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.seed_path, PathBuf::from("seed.toml"));
        assert_eq!(settings.view_days, 10);
        assert_eq!(settings.page_size, 10);
        assert_eq!(settings.output, OutputFormat::Text);
    }

    #[test]
    fn test_reads_all_variables() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("SALES_SEED_PATH", "data/demo.toml"),
            ("SALES_REFERENCE_DATE", "2025-01-03"),
            ("SALES_VIEW_DAYS", "7"),
            ("SALES_PAGE_SIZE", " 25 "),
            ("SALES_OUTPUT", "JSON"),
        ]))
        .unwrap();

        assert_eq!(settings.seed_path, PathBuf::from("data/demo.toml"));
        assert_eq!(
            settings.reference_date,
            NaiveDate::from_ymd_opt(2025, 1, 3)
        );
        assert_eq!(settings.view_days, 7);
        assert_eq!(settings.page_size, 25);
        assert_eq!(settings.output, OutputFormat::Json);
    }

    #[test]
    fn test_view_days_bounded_to_one_month() {
        for raw in ["0", "32", "4000000000"] {
            assert!(
                matches!(
                    Settings::from_lookup(lookup_from(&[("SALES_VIEW_DAYS", raw)])),
                    Err(Error::Config { .. })
                ),
                "{raw} should be rejected"
            );
        }
        let settings = Settings::from_lookup(lookup_from(&[("SALES_VIEW_DAYS", "31")])).unwrap();
        assert_eq!(settings.view_days, MAX_VIEW_DAYS);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Settings::from_lookup(lookup_from(&[("SALES_VIEW_DAYS", "-1")])),
            Err(Error::Config { .. })
        ));
        assert!(matches!(
            Settings::from_lookup(lookup_from(&[("SALES_REFERENCE_DATE", "03/01/2025")])),
            Err(Error::DateParse(_))
        ));
        assert!(matches!(
            Settings::from_lookup(lookup_from(&[("SALES_OUTPUT", "xml")])),
            Err(Error::Config { .. })
        ));
    }
}
