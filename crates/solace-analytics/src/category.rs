//! Category breakdown over all history items

use solace_api::{ActivityHistoryItem, CategoryStats};
use std::collections::HashMap;

/// Pick the highest-count key, ties broken by first encounter in `keys` order
pub(crate) fn most_frequent<'a>(keys: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for key in keys {
        if !counts.contains_key(key) {
            order.push(key);
        }
        *counts.entry(key).or_insert(0) += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for key in order {
        let count = counts[key];
        if best.is_none_or(|(_, n)| count > n) {
            best = Some((key, count));
        }
    }

    best.map(|(key, _)| key.to_string())
}

/// Compute the category breakdown: per-category summaries, most/least
/// frequent category, and the percentage distribution of item counts.
///
/// All history items participate, not only completed ones; incomplete items
/// contribute zero duration.
pub fn category_stats(history: &[ActivityHistoryItem]) -> CategoryStats {
    let mut stats = CategoryStats::default();
    if history.is_empty() {
        return stats;
    }

    let mut completed_counts: HashMap<&str, usize> = HashMap::new();

    for item in history {
        let summary = stats.categories.entry(item.category.clone()).or_default();
        summary.count += 1;
        summary.total_duration_seconds += item.duration_seconds;
        if item.completed {
            *completed_counts.entry(item.category.as_str()).or_insert(0) += 1;
        }
        if summary
            .last_activity
            .is_none_or(|last| item.start_time > last)
        {
            summary.last_activity = Some(item.start_time);
        }
    }

    for (category, summary) in stats.categories.iter_mut() {
        let completed = completed_counts.get(category.as_str()).copied().unwrap_or(0);
        summary.average_duration_seconds =
            summary.total_duration_seconds as f64 / summary.count as f64;
        summary.completion_rate = completed as f64 / summary.count as f64;
    }

    stats.most_frequent_category = most_frequent(history.iter().map(|i| i.category.as_str()));
    stats.least_frequent_category = least_frequent(history.iter().map(|i| i.category.as_str()));

    let total = history.len() as f64;
    for (category, summary) in &stats.categories {
        stats
            .distribution
            .insert(category.clone(), summary.count as f64 / total * 100.0);
    }

    stats
}

fn least_frequent<'a>(keys: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for key in keys {
        if !counts.contains_key(key) {
            order.push(key);
        }
        *counts.entry(key).or_insert(0) += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for key in order {
        let count = counts[key];
        if best.is_none_or(|(_, n)| count < n) {
            best = Some((key, count));
        }
    }

    best.map(|(key, _)| key.to_string())
}
