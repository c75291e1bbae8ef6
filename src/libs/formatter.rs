//! Formatting helpers for minutes, countdown clocks and dates.
//!
//! - 90 minutes → "01:30"
//! - 1499 seconds → "24:59"
//! - 140 minutes → "2.3h"

use chrono::{DateTime, Utc};

/// Minutes as "HH:MM".
pub fn format_minutes(minutes: u64) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Countdown seconds as "MM:SS".
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Minutes as hours with one decimal, e.g. "2.3h".
pub fn format_hours(minutes: u64) -> String {
    format!("{:.1}h", minutes as f64 / 60.0)
}

/// Short date for table cells, "-" when absent.
pub fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_else(|| "-".to_string())
}
