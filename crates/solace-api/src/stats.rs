//! Derived aggregates produced by the analytics engine
//!
//! These are pure functions of the history log, recomputed on demand and
//! never persisted. Percentage fields are in [0, 100]; the per-category
//! completion rate is a fraction in [0, 1].

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use solace_util::TimeOfDay;
use std::collections::BTreeMap;

/// Completion and points statistics over the whole history log
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityStats {
    pub total_activities: usize,
    pub completed_activities: usize,

    /// Total seconds across completed items
    pub total_duration_seconds: u64,
    pub average_duration_seconds: f64,

    pub most_frequent_category: Option<String>,

    /// Percent of items that are completed, in [0, 100]
    pub completion_rate: f64,

    pub total_points: u64,
    pub average_points: f64,

    pub current_streak: u32,
    pub longest_streak: u32,
}

/// Consecutive-calendar-day streak information
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreakInfo {
    /// Length of the run anchored at the most recent activity
    pub current_streak: u32,

    pub longest_streak: u32,

    pub last_activity_date: Option<DateTime<Local>>,

    /// Start time of the oldest item in the run that produced the longest streak
    pub streak_start_date: Option<DateTime<Local>>,
}

/// Per-category aggregate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub count: usize,
    pub total_duration_seconds: u64,
    pub average_duration_seconds: f64,

    /// Completed-in-category / count-in-category, in [0, 1]
    pub completion_rate: f64,

    pub last_activity: Option<DateTime<Local>>,
}

/// Category breakdown over all history items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub categories: BTreeMap<String, CategorySummary>,
    pub most_frequent_category: Option<String>,
    pub least_frequent_category: Option<String>,

    /// Each category's share of total item count, as a percentage
    pub distribution: BTreeMap<String, f64>,
}

/// Count and duration accumulated for one calendar bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodBucket {
    pub count: usize,
    pub duration_seconds: u64,
}

/// Item counts per time-of-day bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfDayCounts {
    pub morning: usize,
    pub afternoon: usize,
    pub evening: usize,
}

impl TimeOfDayCounts {
    pub fn get(&self, bucket: TimeOfDay) -> usize {
        match bucket {
            TimeOfDay::Morning => self.morning,
            TimeOfDay::Afternoon => self.afternoon,
            TimeOfDay::Evening => self.evening,
        }
    }

    pub fn bump(&mut self, bucket: TimeOfDay) {
        match bucket {
            TimeOfDay::Morning => self.morning += 1,
            TimeOfDay::Afternoon => self.afternoon += 1,
            TimeOfDay::Evening => self.evening += 1,
        }
    }
}

/// Calendar and time-of-day breakdown over all history items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeBasedStats {
    /// Keyed by `YYYY-MM-DD`
    pub by_day: BTreeMap<String, PeriodBucket>,

    /// Keyed by ISO week, `YYYY-Www`
    pub by_week: BTreeMap<String, PeriodBucket>,

    /// Keyed by `YYYY-MM`
    pub by_month: BTreeMap<String, PeriodBucket>,

    pub time_of_day: TimeOfDayCounts,

    /// Highest-count bucket; ties break morning -> afternoon -> evening
    pub best_time_of_day: Option<TimeOfDay>,

    /// Item counts keyed by weekday name
    pub weekday_counts: BTreeMap<String, usize>,

    pub most_active_day: Option<String>,
}

/// Recommended/accepted tally for one recommendation bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSlot {
    /// Total items surfaced in this bucket
    pub recommended: usize,

    /// Items carried through to completion
    pub accepted: usize,

    /// accepted / recommended * 100, zero when nothing was recommended
    pub accuracy: f64,
}

/// Recommendation-accuracy breakdown by category and time of day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationStats {
    pub by_category: BTreeMap<String, RecommendationSlot>,
    pub by_time_of_day: BTreeMap<String, RecommendationSlot>,

    /// Completed items / total items * 100
    pub overall_accuracy: f64,
}
