//! User preference types

use serde::{Deserialize, Serialize};
use solace_util::ActivityId;
use std::collections::BTreeSet;

/// Maximum number of favorite activities a session may hold
pub const MAX_FAVORITE_ACTIVITIES: usize = 50;

/// Activity difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// Preferred activity duration bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationBucket {
    #[default]
    Short,
    Medium,
    Long,
}

/// User preferences, owned by the session and synced to the remote store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default)]
    pub difficulty_level: DifficultyLevel,

    #[serde(default)]
    pub preferred_duration: DurationBucket,

    /// Favorited activity ids (capped at [`MAX_FAVORITE_ACTIVITIES`])
    #[serde(default)]
    pub favorite_activities: BTreeSet<ActivityId>,

    /// Category interest tags, e.g. "Mindfulness", "Physical"
    #[serde(default)]
    pub category_interests: BTreeSet<String>,

    #[serde(default = "default_notifications")]
    pub notifications: bool,
}

fn default_notifications() -> bool {
    true
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            difficulty_level: DifficultyLevel::default(),
            preferred_duration: DurationBucket::default(),
            favorite_activities: BTreeSet::new(),
            category_interests: BTreeSet::new(),
            notifications: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_new_session() {
        let prefs = UserPreferences::default();
        assert_eq!(prefs.difficulty_level, DifficultyLevel::Beginner);
        assert_eq!(prefs.preferred_duration, DurationBucket::Short);
        assert!(prefs.favorite_activities.is_empty());
        assert!(prefs.notifications);
    }

    #[test]
    fn enums_serialize_snake_case() {
        let json = serde_json::to_string(&DifficultyLevel::Intermediate).unwrap();
        assert_eq!(json, "\"intermediate\"");

        let json = serde_json::to_string(&DurationBucket::Long).unwrap();
        assert_eq!(json, "\"long\"");
    }

    #[test]
    fn partial_payload_fills_defaults() {
        // Remote sessions created before the notifications field existed
        let prefs: UserPreferences =
            serde_json::from_str(r#"{"difficulty_level": "advanced"}"#).unwrap();
        assert_eq!(prefs.difficulty_level, DifficultyLevel::Advanced);
        assert!(prefs.notifications);
    }
}
