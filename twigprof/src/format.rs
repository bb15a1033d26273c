//! Pure formatting helpers for timeline metrics
//!
//! Byte counts and durations are turned into the short strings shown next to
//! each timeline entry (`1.21 MB`, `20.00ms/20%`).

// Byte counts are scaled for display only
#![allow(clippy::cast_precision_loss)]

/// Units used by [`pretty_size`], each 1024 times the previous one.
const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count with 1024-based units.
///
/// The scaled value is rounded to two decimals and trailing zeros are
/// dropped, so `1024` becomes `1 KB` and `1536` becomes `1.5 KB`.
/// Values beyond the largest unit stay in `TB`.
#[must_use]
pub fn pretty_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    let formatted = format!("{rounded:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", SIZE_UNITS[unit])
}

/// Share of the root duration taken by a span, in percent.
///
/// A root duration that is zero (or not a positive number) yields 0 rather
/// than dividing by it.
#[must_use]
pub fn percent_of(duration: f64, root_duration: f64) -> f64 {
    if root_duration > 0.0 {
        duration / root_duration * 100.0
    } else {
        0.0
    }
}

/// Format a duration (seconds) and its share as `"X.XXms/YY%"`.
///
/// The percentage is rounded half away from zero.
#[must_use]
pub fn format_time(duration: f64, percent: f64) -> String {
    format!("{:.2}ms/{:.0}%", duration * 1000.0, percent.round())
}
