use crate::category::most_frequent;
use crate::streak::streak_info;
use solace_api::{ActivityHistoryItem, ActivityStats};

/// Completion, duration, and points totals over the whole history log.
///
/// Duration and points only accumulate from completed items; in-flight
/// attempts have no meaningful duration yet. Averages are zero when the
/// relevant denominator is zero.
pub fn activity_stats(history: &[ActivityHistoryItem]) -> ActivityStats {
    let mut stats = ActivityStats {
        total_activities: history.len(),
        ..ActivityStats::default()
    };

    for item in history.iter().filter(|item| item.completed) {
        stats.completed_activities += 1;
        stats.total_duration_seconds += item.duration_seconds;
        stats.total_points += u64::from(item.points);
    }

    if stats.completed_activities > 0 {
        let completed = stats.completed_activities as f64;
        stats.average_duration_seconds = stats.total_duration_seconds as f64 / completed;
        stats.average_points = stats.total_points as f64 / completed;
    }
    if stats.total_activities > 0 {
        stats.completion_rate =
            stats.completed_activities as f64 / stats.total_activities as f64 * 100.0;
    }

    stats.most_frequent_category = most_frequent(
        history
            .iter()
            .filter(|item| item.completed)
            .map(|item| item.category.as_str()),
    );

    let streaks = streak_info(history);
    stats.current_streak = streaks.current_streak;
    stats.longest_streak = streaks.longest_streak;

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use solace_api::ActivityDefinition;
    use solace_util::ActivityId;

    fn item(
        category: &str,
        day: u32,
        completed: bool,
        duration_seconds: u64,
        points: u32,
    ) -> ActivityHistoryItem {
        let start = Local.with_ymd_and_hms(2026, 8, day, 9, 0, 0).unwrap();
        let definition = ActivityDefinition {
            id: ActivityId::from("breathing-box"),
            title: "Box Breathing".into(),
            description: String::new(),
            duration: "5 min".into(),
            difficulty: Default::default(),
            category: category.into(),
            steps: Vec::new(),
            benefits: Vec::new(),
        };
        let mut item = ActivityHistoryItem::attempt(&definition, start);
        if completed {
            item.completed = true;
            item.completed_at = Some(start + chrono::Duration::seconds(duration_seconds as i64));
            item.progress = 1.0;
            item.duration_seconds = duration_seconds;
            item.points = points;
        }
        item
    }

    #[test]
    fn empty_log_yields_zeroed_stats() {
        assert_eq!(activity_stats(&[]), ActivityStats::default());
    }

    #[test]
    fn totals_only_count_completed_items() {
        let history = vec![
            item("Physical", 1, true, 300, 40),
            item("Physical", 2, false, 0, 0),
            item("Mindfulness", 3, true, 600, 50),
        ];
        let stats = activity_stats(&history);
        assert_eq!(stats.total_activities, 3);
        assert_eq!(stats.completed_activities, 2);
        assert_eq!(stats.total_duration_seconds, 900);
        assert_eq!(stats.average_duration_seconds, 450.0);
        assert_eq!(stats.total_points, 90);
        assert_eq!(stats.average_points, 45.0);
    }

    #[test]
    fn completion_rate_is_a_percentage() {
        let history = vec![
            item("Physical", 1, true, 300, 40),
            item("Physical", 2, false, 0, 0),
            item("Physical", 3, false, 0, 0),
            item("Physical", 4, true, 300, 40),
        ];
        assert_eq!(activity_stats(&history).completion_rate, 50.0);
    }

    #[test]
    fn most_frequent_category_ignores_abandoned_attempts() {
        let history = vec![
            item("Physical", 1, false, 0, 0),
            item("Physical", 2, false, 0, 0),
            item("Mindfulness", 3, true, 120, 30),
        ];
        let stats = activity_stats(&history);
        assert_eq!(stats.most_frequent_category.as_deref(), Some("Mindfulness"));
    }

    #[test]
    fn streaks_come_from_the_full_log() {
        let history = vec![
            item("Physical", 1, true, 300, 40),
            item("Physical", 2, false, 0, 0),
            item("Physical", 3, true, 300, 40),
        ];
        let stats = activity_stats(&history);
        assert_eq!(stats.current_streak, 3);
        assert_eq!(stats.longest_streak, 3);
    }

    #[test]
    fn recomputation_is_stable() {
        let history = vec![
            item("Physical", 1, true, 300, 40),
            item("Social", 2, true, 200, 30),
        ];
        assert_eq!(activity_stats(&history), activity_stats(&history));
    }
}
