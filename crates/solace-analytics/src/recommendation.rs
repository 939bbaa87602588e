use solace_api::{ActivityHistoryItem, RecommendationSlot, RecommendationStats};
use solace_util::TimeOfDay;

/// Recommendation-accuracy breakdown by category and time of day.
///
/// Every history item counts as a surfaced recommendation; completing it
/// counts as accepting it. Accuracy is a percentage and zero whenever the
/// bucket had nothing recommended.
pub fn recommendation_stats(history: &[ActivityHistoryItem]) -> RecommendationStats {
    let mut stats = RecommendationStats::default();

    for item in history {
        let slot = stats
            .by_category
            .entry(item.category.clone())
            .or_default();
        slot.recommended += 1;
        if item.completed {
            slot.accepted += 1;
        }

        let bucket = TimeOfDay::classify(&item.start_time).label();
        let slot = stats.by_time_of_day.entry(bucket.to_string()).or_default();
        slot.recommended += 1;
        if item.completed {
            slot.accepted += 1;
        }
    }

    for slot in stats
        .by_category
        .values_mut()
        .chain(stats.by_time_of_day.values_mut())
    {
        finish_slot(slot);
    }

    let completed = history.iter().filter(|item| item.completed).count();
    if !history.is_empty() {
        stats.overall_accuracy = completed as f64 / history.len() as f64 * 100.0;
    }

    stats
}

fn finish_slot(slot: &mut RecommendationSlot) {
    if slot.recommended > 0 {
        slot.accuracy = slot.accepted as f64 / slot.recommended as f64 * 100.0;
    }
}
