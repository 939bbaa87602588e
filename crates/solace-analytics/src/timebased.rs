use chrono::{Datelike, Weekday};
use solace_api::{ActivityHistoryItem, TimeBasedStats};
use solace_util::{TimeOfDay, day_key, month_key, week_key, weekday_name};

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Calendar and time-of-day breakdown over all history items.
///
/// Every item counts toward its day, ISO week, month, weekday, and
/// time-of-day buckets regardless of completion. `best_time_of_day` and
/// `most_active_day` are `None` for an empty log; ties break in
/// morning-to-evening and Monday-to-Sunday order respectively.
pub fn time_based_stats(history: &[ActivityHistoryItem]) -> TimeBasedStats {
    let mut stats = TimeBasedStats::default();

    for item in history {
        let day = stats.by_day.entry(day_key(&item.start_time)).or_default();
        day.count += 1;
        day.duration_seconds += item.duration_seconds;

        let week = stats.by_week.entry(week_key(&item.start_time)).or_default();
        week.count += 1;
        week.duration_seconds += item.duration_seconds;

        let month = stats
            .by_month
            .entry(month_key(&item.start_time))
            .or_default();
        month.count += 1;
        month.duration_seconds += item.duration_seconds;

        stats.time_of_day.bump(TimeOfDay::classify(&item.start_time));

        let weekday = weekday_name(item.start_time.weekday());
        *stats.weekday_counts.entry(weekday.to_string()).or_insert(0) += 1;
    }

    if !history.is_empty() {
        let mut best = TimeOfDay::Morning;
        for bucket in TimeOfDay::ALL {
            if stats.time_of_day.get(bucket) > stats.time_of_day.get(best) {
                best = bucket;
            }
        }
        stats.best_time_of_day = Some(best);

        let mut most_active: Option<(&'static str, usize)> = None;
        for weekday in WEEKDAYS {
            let name = weekday_name(weekday);
            let count = stats.weekday_counts.get(name).copied().unwrap_or(0);
            if most_active.is_none_or(|(_, top)| count > top) {
                most_active = Some((name, count));
            }
        }
        stats.most_active_day = most_active.map(|(name, _)| name.to_string());
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use solace_api::ActivityDefinition;
    use solace_util::ActivityId;

    fn item_at(day: u32, hour: u32) -> ActivityHistoryItem {
        let start = Local.with_ymd_and_hms(2026, 8, day, hour, 0, 0).unwrap();
        let definition = ActivityDefinition {
            id: ActivityId::from("stretch-basic"),
            title: "Basic Stretch".into(),
            description: String::new(),
            duration: "5 min".into(),
            difficulty: Default::default(),
            category: "Physical".into(),
            steps: Vec::new(),
            benefits: Vec::new(),
        };
        let mut item = ActivityHistoryItem::attempt(&definition, start);
        item.duration_seconds = 60;
        item
    }

    #[test]
    fn empty_log_has_no_best_buckets() {
        let stats = time_based_stats(&[]);
        assert!(stats.by_day.is_empty());
        assert_eq!(stats.best_time_of_day, None);
        assert_eq!(stats.most_active_day, None);
    }

    #[test]
    fn items_bucket_by_day_week_and_month() {
        // Aug 24 and Aug 25 2026 share ISO week 35; Aug 30 is the next Sunday,
        // still week 35.
        let history = vec![item_at(24, 9), item_at(24, 19), item_at(25, 9)];
        let stats = time_based_stats(&history);

        assert_eq!(stats.by_day["2026-08-24"].count, 2);
        assert_eq!(stats.by_day["2026-08-24"].duration_seconds, 120);
        assert_eq!(stats.by_day["2026-08-25"].count, 1);
        assert_eq!(stats.by_week["2026-W35"].count, 3);
        assert_eq!(stats.by_month["2026-08"].count, 3);
    }

    #[test]
    fn best_time_of_day_picks_the_busiest_bucket() {
        let history = vec![item_at(24, 9), item_at(25, 19), item_at(26, 19)];
        let stats = time_based_stats(&history);
        assert_eq!(stats.time_of_day.morning, 1);
        assert_eq!(stats.time_of_day.evening, 2);
        assert_eq!(stats.best_time_of_day, Some(TimeOfDay::Evening));
    }

    #[test]
    fn time_of_day_tie_breaks_toward_morning() {
        let history = vec![item_at(24, 9), item_at(25, 19)];
        let stats = time_based_stats(&history);
        assert_eq!(stats.best_time_of_day, Some(TimeOfDay::Morning));
    }

    #[test]
    fn most_active_day_counts_weekdays() {
        // 2026-08-24 is a Monday, 2026-08-31 the following Monday,
        // 2026-08-26 a Wednesday.
        let history = vec![item_at(24, 9), item_at(31, 9), item_at(26, 9)];
        let stats = time_based_stats(&history);
        assert_eq!(stats.weekday_counts["Monday"], 2);
        assert_eq!(stats.weekday_counts["Wednesday"], 1);
        assert_eq!(stats.most_active_day.as_deref(), Some("Monday"));
    }

    #[test]
    fn weekday_tie_breaks_in_week_order() {
        // Wednesday and Monday tie at one item each.
        let history = vec![item_at(26, 9), item_at(24, 9)];
        let stats = time_based_stats(&history);
        assert_eq!(stats.most_active_day.as_deref(), Some("Monday"));
    }
}
