//! SQLite-based store implementation

use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use solace_api::{ActivityHistoryItem, UserPreferences};
use solace_util::{ActivityId, SessionId};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;

use crate::{Store, StoreResult};

/// Snapshot keys
const KEY_SESSION_ID: &str = "session_id";
const KEY_HISTORY: &str = "activity_history";
const KEY_PROGRESS: &str = "activity_progress";
const KEY_ACTIVE_ATTEMPT: &str = "active_attempt";
const KEY_PREFERENCES: &str = "user_preferences";

/// SQLite-based store
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a store at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing)
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute_batch(
            r#"
            -- One JSON snapshot per key
            CREATE TABLE IF NOT EXISTS snapshots (
                key TEXT PRIMARY KEY,
                value_json TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )?;

        debug!("Store schema initialized");
        Ok(())
    }

    fn put_json<T: Serialize>(&self, key: &str, value: &T) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        let json = serde_json::to_string(value)?;

        conn.execute(
            r#"
            INSERT INTO snapshots (key, value_json, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key)
            DO UPDATE SET value_json = excluded.value_json,
                          updated_at = excluded.updated_at
            "#,
            params![key, json, solace_util::now().to_rfc3339()],
        )?;

        debug!(key, "Snapshot saved");
        Ok(())
    }

    fn get_json<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let conn = self.conn.lock().unwrap();

        let json: Option<String> = conn
            .query_row(
                "SELECT value_json FROM snapshots WHERE key = ?",
                [key],
                |row| row.get(0),
            )
            .optional()?;

        match json {
            Some(s) => Ok(Some(serde_json::from_str(&s)?)),
            None => Ok(None),
        }
    }

    fn delete_key(&self, key: &str) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM snapshots WHERE key = ?", [key])?;
        debug!(key, "Snapshot removed");
        Ok(())
    }
}

impl Store for SqliteStore {
    fn load_session_id(&self) -> StoreResult<Option<SessionId>> {
        self.get_json(KEY_SESSION_ID)
    }

    fn save_session_id(&self, session_id: &SessionId) -> StoreResult<()> {
        self.put_json(KEY_SESSION_ID, session_id)
    }

    fn load_history(&self) -> StoreResult<Vec<ActivityHistoryItem>> {
        Ok(self.get_json(KEY_HISTORY)?.unwrap_or_default())
    }

    fn save_history(&self, history: &[ActivityHistoryItem]) -> StoreResult<()> {
        self.put_json(KEY_HISTORY, &history)
    }

    fn load_progress(&self) -> StoreResult<HashMap<ActivityId, f32>> {
        Ok(self.get_json(KEY_PROGRESS)?.unwrap_or_default())
    }

    fn save_progress(&self, progress: &HashMap<ActivityId, f32>) -> StoreResult<()> {
        self.put_json(KEY_PROGRESS, progress)
    }

    fn load_active_attempt(&self) -> StoreResult<Option<ActivityHistoryItem>> {
        self.get_json(KEY_ACTIVE_ATTEMPT)
    }

    fn save_active_attempt(&self, item: &ActivityHistoryItem) -> StoreResult<()> {
        self.put_json(KEY_ACTIVE_ATTEMPT, item)
    }

    fn clear_active_attempt(&self) -> StoreResult<()> {
        self.delete_key(KEY_ACTIVE_ATTEMPT)
    }

    fn load_preferences(&self) -> StoreResult<Option<UserPreferences>> {
        self.get_json(KEY_PREFERENCES)
    }

    fn save_preferences(&self, preferences: &UserPreferences) -> StoreResult<()> {
        self.put_json(KEY_PREFERENCES, preferences)
    }

    fn clear(&self) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM snapshots", [])?;
        debug!("Store cleared");
        Ok(())
    }

    fn is_healthy(&self) -> bool {
        match self.conn.lock() {
            Ok(conn) => conn.query_row("SELECT 1", [], |_| Ok(())).is_ok(),
            Err(_) => {
                tracing::warn!("Store lock poisoned");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solace_api::{ActivityDefinition, DifficultyLevel};

    fn make_item(activity: &str, category: &str) -> ActivityHistoryItem {
        let def = ActivityDefinition {
            id: ActivityId::new(activity),
            title: activity.to_string(),
            description: String::new(),
            duration: "5 minutes".into(),
            difficulty: DifficultyLevel::Beginner,
            category: category.to_string(),
            steps: vec![],
            benefits: vec![],
        };
        ActivityHistoryItem::attempt(&def, solace_util::now())
    }

    #[test]
    fn test_in_memory_store() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(store.is_healthy());
    }

    #[test]
    fn test_session_id_roundtrip() {
        let store = SqliteStore::in_memory().unwrap();

        assert!(store.load_session_id().unwrap().is_none());

        let id = SessionId::new("abc-123");
        store.save_session_id(&id).unwrap();
        assert_eq!(store.load_session_id().unwrap(), Some(id.clone()));

        // Overwrite
        let id2 = SessionId::new("def-456");
        store.save_session_id(&id2).unwrap();
        assert_eq!(store.load_session_id().unwrap(), Some(id2));
    }

    #[test]
    fn test_history_roundtrip() {
        let store = SqliteStore::in_memory().unwrap();

        assert!(store.load_history().unwrap().is_empty());

        let history = vec![
            make_item("mindful-breathing", "Mindfulness"),
            make_item("mindful-walking", "Physical"),
        ];
        store.save_history(&history).unwrap();

        let loaded = store.load_history().unwrap();
        assert_eq!(loaded, history);
    }

    #[test]
    fn test_progress_roundtrip() {
        let store = SqliteStore::in_memory().unwrap();

        let mut progress = HashMap::new();
        progress.insert(ActivityId::new("body-scan"), 0.4_f32);
        store.save_progress(&progress).unwrap();

        let loaded = store.load_progress().unwrap();
        assert_eq!(loaded.get(&ActivityId::new("body-scan")), Some(&0.4));
    }

    #[test]
    fn test_preferences_roundtrip() {
        let store = SqliteStore::in_memory().unwrap();

        assert!(store.load_preferences().unwrap().is_none());

        let mut prefs = UserPreferences::default();
        prefs.favorite_activities.insert(ActivityId::new("body-scan"));
        prefs.notifications = false;
        store.save_preferences(&prefs).unwrap();

        assert_eq!(store.load_preferences().unwrap(), Some(prefs));
    }

    #[test]
    fn test_active_attempt_roundtrip() {
        let store = SqliteStore::in_memory().unwrap();

        assert!(store.load_active_attempt().unwrap().is_none());

        let item = make_item("body-scan", "Mindfulness");
        store.save_active_attempt(&item).unwrap();
        assert_eq!(store.load_active_attempt().unwrap(), Some(item));

        store.clear_active_attempt().unwrap();
        assert!(store.load_active_attempt().unwrap().is_none());
    }

    #[test]
    fn test_clear_removes_everything() {
        let store = SqliteStore::in_memory().unwrap();

        store.save_session_id(&SessionId::new("abc")).unwrap();
        store.save_history(&[make_item("x", "Mindfulness")]).unwrap();
        store.save_active_attempt(&make_item("y", "Physical")).unwrap();
        store.save_preferences(&UserPreferences::default()).unwrap();

        store.clear().unwrap();

        assert!(store.load_session_id().unwrap().is_none());
        assert!(store.load_history().unwrap().is_empty());
        assert!(store.load_active_attempt().unwrap().is_none());
        assert!(store.load_preferences().unwrap().is_none());
    }

    #[test]
    fn test_on_disk_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solace.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.save_session_id(&SessionId::new("persisted")).unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(
            store.load_session_id().unwrap(),
            Some(SessionId::new("persisted"))
        );
    }
}
