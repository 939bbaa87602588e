//! Calendar-day streak computation
//!
//! A streak is a run of consecutive calendar days, looking backward from the
//! most recent activity, with at least one activity per day. Multiple
//! activities on the same day count that day once; a gap of one full missed
//! calendar day breaks the streak.

use solace_api::{ActivityHistoryItem, StreakInfo};

/// Compute streak information from the history log
pub fn streak_info(history: &[ActivityHistoryItem]) -> StreakInfo {
    if history.is_empty() {
        return StreakInfo::default();
    }

    // Most recent first
    let mut sorted: Vec<&ActivityHistoryItem> = history.iter().collect();
    sorted.sort_by(|a, b| b.start_time.cmp(&a.start_time));

    let mut longest: u32 = 0;
    let mut longest_start = None;

    // The run being walked; `run_oldest` tracks its oldest item so far
    let mut run_len: u32 = 1;
    let mut run_oldest = sorted[0].start_time;

    // Length of the run anchored at the most recent item, fixed at first break
    let mut current: Option<u32> = None;

    let mut prev_day = sorted[0].start_time.date_naive();

    for item in &sorted[1..] {
        let day = item.start_time.date_naive();
        let gap = (prev_day - day).num_days();

        if gap == 0 {
            // Same calendar day: neither extends nor breaks the run
            run_oldest = item.start_time;
        } else if gap == 1 {
            run_len += 1;
            run_oldest = item.start_time;
        } else {
            if current.is_none() {
                current = Some(run_len);
            }
            if run_len > longest {
                longest = run_len;
                longest_start = Some(run_oldest);
            }
            run_len = 1;
            run_oldest = item.start_time;
        }

        prev_day = day;
    }

    if current.is_none() {
        current = Some(run_len);
    }
    if run_len > longest {
        longest = run_len;
        longest_start = Some(run_oldest);
    }

    StreakInfo {
        current_streak: current.unwrap_or(0),
        longest_streak: longest,
        last_activity_date: Some(sorted[0].start_time),
        streak_start_date: longest_start,
    }
}
