//! Plain-text report helpers for the presentation layer.
//!
//! Currency follows a single convention (Brazilian real, `R$ 1.234,56`).
//! Nothing here feeds back into aggregation.

use super::{
    calendar::{Period, WEEKDAY_LABELS},
    classify::PerformanceStatus,
    performance::PerformanceResult,
    projector::Row,
};
use chrono::Datelike;
use std::fmt::Write;

/// Formats an amount as `R$ 1.234,56`, negatives as `-R$ 1.234,56`.
///
/// Non-finite amounts render as zero, and so do amounts that round to zero.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let cents_str = format!("{:.2}", amount.abs());
    let sign = if amount < 0.0 && cents_str != "0.00" {
        "-"
    } else {
        ""
    };
    let (integer, cents) = cents_str.split_once('.').unwrap_or((cents_str.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    format!("{sign}R$ {grouped},{cents}")
}

/// Text progress bar such as `[████████░░] 80.0%`, filled up to 100%.
#[must_use]
pub fn format_progress_bar(percentage: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped = if percentage.is_finite() {
        percentage.clamp(0.0, 100.0)
    } else {
        0.0
    };

    // Cast safety: clamped ∈ [0, 100] and length is a small display width.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let filled = ((clamped / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    format!(
        "[{}{}] {percentage:.1}%",
        "█".repeat(filled),
        "░".repeat(empty)
    )
}

/// Upper-case label for a status, as shown in legends.
#[must_use]
pub const fn status_label(status: PerformanceStatus) -> &'static str {
    match status {
        PerformanceStatus::Neutral => "NO SALES",
        PerformanceStatus::Below => "BELOW GOAL",
        PerformanceStatus::Met => "GOAL MET",
        PerformanceStatus::Super => "SUPER GOAL",
    }
}

/// One-line summary of a node's performance.
#[must_use]
pub fn format_performance(name: &str, result: &PerformanceResult) -> String {
    format!(
        "{name}: {} | goal {} | super {} | {}",
        format_currency(result.total_sales),
        format_currency(result.daily_goal),
        format_currency(result.super_goal),
        if result.status == PerformanceStatus::Neutral {
            status_label(result.status).to_string()
        } else {
            format!(
                "{} {}",
                status_label(result.status),
                format_progress_bar(result.percentage, None)
            )
        }
    )
}

/// Renders rows as a fixed-width text table with one column per day.
///
/// Group rows are followed by their children, indented by depth.
#[must_use]
pub fn format_rows_table(title: &str, rows: &[Row], period: &Period) -> String {
    let mut out = String::new();
    // write! into a String cannot fail
    let _ = writeln!(out, "{title}");

    let _ = write!(out, "{:<32}{:>12}{:>12}", "", "GOAL/DAY", "SUPER/DAY");
    for day in period.days() {
        let label = WEEKDAY_LABELS[day.weekday().num_days_from_sunday() as usize];
        let _ = write!(out, "{:>8}", format!("{label} {:02}", day.day()));
    }
    let _ = writeln!(out, "{:>14}", "TOTAL");

    for row in rows {
        write_row(&mut out, row, period);
    }
    out
}

fn write_row(out: &mut String, row: &Row, period: &Period) {
    let indent = "  ".repeat(row.depth as usize);
    let name: String = format!("{indent}{}", row.name).chars().take(31).collect();
    let _ = write!(
        out,
        "{name:<32}{:>12.0}{:>12.0}",
        row.goals.daily_goal, row.goals.daily_super_goal
    );
    for day in period.days() {
        let value = row.day_value(*day);
        let marker = match row.day_status(*day).status {
            PerformanceStatus::Super => '+',
            PerformanceStatus::Met => '=',
            PerformanceStatus::Below => '-',
            PerformanceStatus::Neutral => ' ',
        };
        let _ = write!(out, "{:>8}", format!("{value:.0}{marker}"));
    }
    let _ = writeln!(out, "{:>14.2}", row.total);

    for child in &row.children {
        write_row(out, child, period);
    }
}
