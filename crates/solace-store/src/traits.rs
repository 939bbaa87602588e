//! Store trait definitions

use solace_api::{ActivityHistoryItem, UserPreferences};
use solace_util::{ActivityId, SessionId};
use std::collections::HashMap;

use crate::StoreResult;

/// Durable local key-value store for session snapshots
pub trait Store: Send + Sync {
    // Session identity

    /// Load the persisted session id, if any
    fn load_session_id(&self) -> StoreResult<Option<SessionId>>;

    /// Persist the session id
    fn save_session_id(&self, session_id: &SessionId) -> StoreResult<()>;

    // Activity history

    /// Load the persisted history log (empty if never saved)
    fn load_history(&self) -> StoreResult<Vec<ActivityHistoryItem>>;

    /// Persist the full history log
    fn save_history(&self, history: &[ActivityHistoryItem]) -> StoreResult<()>;

    // Progress map

    /// Load the persisted per-activity progress map (empty if never saved)
    fn load_progress(&self) -> StoreResult<HashMap<ActivityId, f32>>;

    /// Persist the per-activity progress map
    fn save_progress(&self, progress: &HashMap<ActivityId, f32>) -> StoreResult<()>;

    // Active attempt

    /// Load the persisted in-flight attempt, if any
    fn load_active_attempt(&self) -> StoreResult<Option<ActivityHistoryItem>>;

    /// Persist the in-flight attempt so it survives a process restart
    fn save_active_attempt(&self, item: &ActivityHistoryItem) -> StoreResult<()>;

    /// Remove the persisted in-flight attempt
    fn clear_active_attempt(&self) -> StoreResult<()>;

    // Preferences

    /// Load persisted preferences, if any
    fn load_preferences(&self) -> StoreResult<Option<UserPreferences>>;

    /// Persist preferences
    fn save_preferences(&self, preferences: &UserPreferences) -> StoreResult<()>;

    // Reset

    /// Delete every persisted snapshot (session reset)
    fn clear(&self) -> StoreResult<()>;

    // Health

    /// Check if the store is healthy
    fn is_healthy(&self) -> bool;
}
