//! Remote client traits

use async_trait::async_trait;
use solace_api::{ActivityDefinition, ActivityHistoryItem, SessionPayload, UserPreferences};
use solace_util::{ActivityId, SessionId, UserId};

use crate::RemoteResult;

/// Client for the remote session store
#[async_trait]
pub trait SessionApi: Send + Sync {
    /// Create a new session for a user, returning its id
    async fn create_session(&self, user_id: &UserId) -> RemoteResult<SessionId>;

    /// Fetch the full authoritative session state
    async fn fetch_session(&self, session_id: &SessionId) -> RemoteResult<SessionPayload>;

    /// Fetch only the activity history log
    async fn fetch_history(&self, session_id: &SessionId)
    -> RemoteResult<Vec<ActivityHistoryItem>>;

    /// Submit updated preferences
    async fn update_preferences(
        &self,
        session_id: &SessionId,
        preferences: &UserPreferences,
    ) -> RemoteResult<()>;

    /// Notify the store that an activity was completed (best-effort)
    async fn notify_completion(
        &self,
        session_id: &SessionId,
        activity_id: &ActivityId,
        duration_seconds: u64,
    ) -> RemoteResult<()>;
}

/// Read-only client for the remote activity catalog
#[async_trait]
pub trait ActivityCatalog: Send + Sync {
    /// Fetch an activity definition by id
    async fn fetch_activity(&self, activity_id: &ActivityId) -> RemoteResult<ActivityDefinition>;

    /// Notify the catalog that an activity was started (best-effort)
    async fn notify_started(
        &self,
        session_id: &SessionId,
        activity_id: &ActivityId,
    ) -> RemoteResult<()>;
}
