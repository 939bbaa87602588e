//! Mock remote clients for testing

use async_trait::async_trait;
use solace_api::{
    ActivityDefinition, ActivityHistoryItem, SessionPayload, UserPreferences,
};
use solace_util::{ActivityId, SessionId, UserId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::{ActivityCatalog, RemoteError, RemoteResult, SessionApi};

/// Mock session store for unit/integration testing
pub struct MockSessionServer {
    sessions: Mutex<HashMap<SessionId, SessionPayload>>,
    next_id: AtomicU64,

    /// Recorded completion notifications (activity id, duration seconds)
    pub completions: Arc<Mutex<Vec<(ActivityId, u64)>>>,

    /// Configure session fetches to fail
    pub fail_fetch: Arc<Mutex<bool>>,

    /// Configure preference updates to fail
    pub fail_update: Arc<Mutex<bool>>,
}

impl MockSessionServer {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            completions: Arc::new(Mutex::new(Vec::new())),
            fail_fetch: Arc::new(Mutex::new(false)),
            fail_update: Arc::new(Mutex::new(false)),
        }
    }

    /// Seed a pre-existing session
    pub fn insert_session(&self, payload: SessionPayload) {
        self.sessions
            .lock()
            .unwrap()
            .insert(payload.session_id.clone(), payload);
    }

    pub fn set_fail_fetch(&self, fail: bool) {
        *self.fail_fetch.lock().unwrap() = fail;
    }

    pub fn set_fail_update(&self, fail: bool) {
        *self.fail_update.lock().unwrap() = fail;
    }
}

impl Default for MockSessionServer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionApi for MockSessionServer {
    async fn create_session(&self, user_id: &UserId) -> RemoteResult<SessionId> {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let session_id = SessionId::new(format!("{}-session-{}", user_id, n));
        self.insert_session(SessionPayload::empty(session_id.clone()));
        Ok(session_id)
    }

    async fn fetch_session(&self, session_id: &SessionId) -> RemoteResult<SessionPayload> {
        if *self.fail_fetch.lock().unwrap() {
            return Err(RemoteError::Network("mock fetch failure".into()));
        }

        self.sessions
            .lock()
            .unwrap()
            .get(session_id)
            .cloned()
            .ok_or_else(|| RemoteError::NotFound("session".into()))
    }

    async fn fetch_history(
        &self,
        session_id: &SessionId,
    ) -> RemoteResult<Vec<ActivityHistoryItem>> {
        if *self.fail_fetch.lock().unwrap() {
            return Err(RemoteError::Network("mock fetch failure".into()));
        }

        Ok(self.fetch_session(session_id).await?.activity_history)
    }

    async fn update_preferences(
        &self,
        session_id: &SessionId,
        preferences: &UserPreferences,
    ) -> RemoteResult<()> {
        if *self.fail_update.lock().unwrap() {
            return Err(RemoteError::Network("mock update failure".into()));
        }

        let mut sessions = self.sessions.lock().unwrap();
        let payload = sessions
            .get_mut(session_id)
            .ok_or_else(|| RemoteError::NotFound("session".into()))?;
        payload.preferences = preferences.clone();
        Ok(())
    }

    async fn notify_completion(
        &self,
        _session_id: &SessionId,
        activity_id: &ActivityId,
        duration_seconds: u64,
    ) -> RemoteResult<()> {
        self.completions
            .lock()
            .unwrap()
            .push((activity_id.clone(), duration_seconds));
        Ok(())
    }
}

/// Mock activity catalog for unit/integration testing
pub struct MockCatalog {
    activities: Mutex<HashMap<ActivityId, ActivityDefinition>>,

    /// Recorded start notifications
    pub starts: Arc<Mutex<Vec<ActivityId>>>,

    /// Configure definition fetches to fail with a network error
    pub fail_fetch: Arc<Mutex<bool>>,

    /// Configure start notifications to fail
    pub fail_notify: Arc<Mutex<bool>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self {
            activities: Mutex::new(HashMap::new()),
            starts: Arc::new(Mutex::new(Vec::new())),
            fail_fetch: Arc::new(Mutex::new(false)),
            fail_notify: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_activities(activities: impl IntoIterator<Item = ActivityDefinition>) -> Self {
        let catalog = Self::new();
        {
            let mut map = catalog.activities.lock().unwrap();
            for def in activities {
                map.insert(def.id.clone(), def);
            }
        }
        catalog
    }

    pub fn insert(&self, definition: ActivityDefinition) {
        self.activities
            .lock()
            .unwrap()
            .insert(definition.id.clone(), definition);
    }

    pub fn set_fail_fetch(&self, fail: bool) {
        *self.fail_fetch.lock().unwrap() = fail;
    }

    pub fn set_fail_notify(&self, fail: bool) {
        *self.fail_notify.lock().unwrap() = fail;
    }
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ActivityCatalog for MockCatalog {
    async fn fetch_activity(&self, activity_id: &ActivityId) -> RemoteResult<ActivityDefinition> {
        if *self.fail_fetch.lock().unwrap() {
            return Err(RemoteError::Network("mock catalog failure".into()));
        }

        self.activities
            .lock()
            .unwrap()
            .get(activity_id)
            .cloned()
            .ok_or_else(|| RemoteError::NotFound(activity_id.to_string()))
    }

    async fn notify_started(
        &self,
        _session_id: &SessionId,
        activity_id: &ActivityId,
    ) -> RemoteResult<()> {
        if *self.fail_notify.lock().unwrap() {
            return Err(RemoteError::Network("mock notify failure".into()));
        }

        self.starts.lock().unwrap().push(activity_id.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solace_api::DifficultyLevel;

    fn make_definition(id: &str) -> ActivityDefinition {
        ActivityDefinition {
            id: ActivityId::new(id),
            title: id.to_string(),
            description: String::new(),
            duration: "5 minutes".into(),
            difficulty: DifficultyLevel::Beginner,
            category: "Mindfulness".into(),
            steps: vec![],
            benefits: vec![],
        }
    }

    #[tokio::test]
    async fn catalog_returns_not_found_for_unknown_id() {
        let catalog = MockCatalog::with_activities([make_definition("body-scan")]);

        assert!(catalog.fetch_activity(&ActivityId::new("body-scan")).await.is_ok());

        let err = catalog
            .fetch_activity(&ActivityId::new("missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::NotFound(_)));
    }

    #[tokio::test]
    async fn session_server_creates_unique_ids() {
        let server = MockSessionServer::new();
        let user = UserId::new("u1");

        let a = server.create_session(&user).await.unwrap();
        let b = server.create_session(&user).await.unwrap();
        assert_ne!(a, b);

        let payload = server.fetch_session(&a).await.unwrap();
        assert!(payload.activity_history.is_empty());
    }

    #[tokio::test]
    async fn fail_fetch_toggle_breaks_fetches() {
        let server = MockSessionServer::new();
        let user = UserId::new("u1");
        let id = server.create_session(&user).await.unwrap();

        server.set_fail_fetch(true);
        assert!(matches!(
            server.fetch_session(&id).await,
            Err(RemoteError::Network(_))
        ));

        server.set_fail_fetch(false);
        assert!(server.fetch_session(&id).await.is_ok());
    }
}
