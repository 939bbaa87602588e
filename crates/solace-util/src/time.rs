//! Time helpers for history aggregation
//!
//! History records carry wall-clock timestamps; the analytics engine buckets
//! them by calendar day, ISO week, month, weekday, and time of day. The
//! bucketing rules live here so every aggregate uses the same keys.

use chrono::{DateTime, Datelike, Local, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Get the current local time
pub fn now() -> DateTime<Local> {
    Local::now()
}

/// Coarse time-of-day bucket for an activity timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    /// Enumeration order used for tie-breaking in aggregates
    pub const ALL: [TimeOfDay; 3] = [TimeOfDay::Morning, TimeOfDay::Afternoon, TimeOfDay::Evening];

    /// Classify an hour of day: morning < 12:00, afternoon 12:00-16:59,
    /// evening >= 17:00
    pub fn from_hour(hour: u32) -> Self {
        if hour < 12 {
            TimeOfDay::Morning
        } else if hour < 17 {
            TimeOfDay::Afternoon
        } else {
            TimeOfDay::Evening
        }
    }

    pub fn classify(dt: &DateTime<Local>) -> Self {
        Self::from_hour(dt.hour())
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Calendar-day bucket key, e.g. `2026-08-30`
pub fn day_key(dt: &DateTime<Local>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

/// ISO-week bucket key, e.g. `2026-W35`
pub fn week_key(dt: &DateTime<Local>) -> String {
    let iso = dt.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}

/// Calendar-month bucket key, e.g. `2026-08`
pub fn month_key(dt: &DateTime<Local>) -> String {
    dt.format("%Y-%m").to_string()
}

/// English weekday name for aggregate display
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Helper to format durations in human-readable form
pub fn format_duration(d: Duration) -> String {
    let total_secs = d.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
