//! Catalog and history types

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use solace_util::{ActivityId, AttemptId};

use crate::DifficultyLevel;

/// Activity definition from the remote catalog (read-only to this engine)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityDefinition {
    pub id: ActivityId,
    pub title: String,
    pub description: String,

    /// Display duration, e.g. "5-10 minutes"
    pub duration: String,

    pub difficulty: DifficultyLevel,

    /// Category tag used for aggregate reporting
    pub category: String,

    #[serde(default)]
    pub steps: Vec<String>,

    #[serde(default)]
    pub benefits: Vec<String>,
}

/// One record in the append-only activity history log.
///
/// Starting an activity appends an attempt record; completing it appends a
/// second, terminal record. Activity title and category are copied from the
/// catalog definition at start time so later catalog edits do not
/// retroactively change history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityHistoryItem {
    pub id: AttemptId,
    pub activity_id: ActivityId,
    pub activity_title: String,
    pub category: String,

    pub start_time: DateTime<Local>,
    pub completed_at: Option<DateTime<Local>>,
    pub completed: bool,

    /// Fraction of the activity's steps worked through, in [0, 1]
    pub progress: f32,

    /// Points awarded at completion, zero for attempt records
    pub points: u32,

    /// Mood level reported at completion, in [1, 5]
    pub mood_level: Option<f32>,

    /// Wall-clock seconds between start and completion, zero until completed
    pub duration_seconds: u64,
}

impl ActivityHistoryItem {
    /// Build the attempt record appended when an activity is started
    pub fn attempt(definition: &ActivityDefinition, now: DateTime<Local>) -> Self {
        Self {
            id: AttemptId::new(),
            activity_id: definition.id.clone(),
            activity_title: definition.title.clone(),
            category: definition.category.clone(),
            start_time: now,
            completed_at: None,
            completed: false,
            progress: 0.0,
            points: 0,
            mood_level: None,
            duration_seconds: 0,
        }
    }

    /// Build the terminal record appended when this attempt is completed.
    ///
    /// Mood is clamped to [1, 5]; points are `floor(mood * 10)`.
    pub fn completion(&self, now: DateTime<Local>, mood_level: f32) -> Self {
        let mood = mood_level.clamp(1.0, 5.0);
        let duration_seconds = (now - self.start_time).num_seconds().max(0) as u64;

        Self {
            id: AttemptId::new(),
            activity_id: self.activity_id.clone(),
            activity_title: self.activity_title.clone(),
            category: self.category.clone(),
            start_time: self.start_time,
            completed_at: Some(now),
            completed: true,
            progress: 1.0,
            points: (mood * 10.0).floor() as u32,
            mood_level: Some(mood),
            duration_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_definition() -> ActivityDefinition {
        ActivityDefinition {
            id: ActivityId::new("mindful-breathing"),
            title: "Mindful Breathing".into(),
            description: "A breathing technique to reduce stress".into(),
            duration: "5-10 minutes".into(),
            difficulty: DifficultyLevel::Beginner,
            category: "Mindfulness".into(),
            steps: vec!["Sit comfortably".into(), "Breathe in for 4 counts".into()],
            benefits: vec!["Reduces stress".into()],
        }
    }

    #[test]
    fn attempt_copies_catalog_fields() {
        let def = make_definition();
        let now = Local.with_ymd_and_hms(2026, 8, 30, 9, 0, 0).unwrap();

        let item = ActivityHistoryItem::attempt(&def, now);
        assert_eq!(item.activity_id, def.id);
        assert_eq!(item.activity_title, def.title);
        assert_eq!(item.category, def.category);
        assert!(!item.completed);
        assert_eq!(item.progress, 0.0);
        assert_eq!(item.points, 0);
        assert!(item.completed_at.is_none());
    }

    #[test]
    fn completion_computes_duration_and_points() {
        let def = make_definition();
        let start = Local.with_ymd_and_hms(2026, 8, 30, 9, 0, 0).unwrap();
        let end = Local.with_ymd_and_hms(2026, 8, 30, 9, 7, 30).unwrap();

        let attempt = ActivityHistoryItem::attempt(&def, start);
        let done = attempt.completion(end, 4.5);

        assert!(done.completed);
        assert_eq!(done.completed_at, Some(end));
        assert_eq!(done.duration_seconds, 450);
        assert_eq!(done.points, 45);
        assert_eq!(done.mood_level, Some(4.5));
        assert_eq!(done.progress, 1.0);
        assert_ne!(done.id, attempt.id);
    }

    #[test]
    fn completion_clamps_mood() {
        let def = make_definition();
        let now = Local.with_ymd_and_hms(2026, 8, 30, 9, 0, 0).unwrap();
        let attempt = ActivityHistoryItem::attempt(&def, now);

        let low = attempt.completion(now, 0.2);
        assert_eq!(low.mood_level, Some(1.0));
        assert_eq!(low.points, 10);

        let high = attempt.completion(now, 9.0);
        assert_eq!(high.mood_level, Some(5.0));
        assert_eq!(high.points, 50);
    }

    #[test]
    fn completion_clock_skew_yields_zero_duration() {
        let def = make_definition();
        let start = Local.with_ymd_and_hms(2026, 8, 30, 9, 0, 0).unwrap();
        let earlier = Local.with_ymd_and_hms(2026, 8, 30, 8, 59, 0).unwrap();

        let attempt = ActivityHistoryItem::attempt(&def, start);
        let done = attempt.completion(earlier, 3.0);
        assert_eq!(done.duration_seconds, 0);
    }
}
