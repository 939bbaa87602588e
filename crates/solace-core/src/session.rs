//! Session state container
//!
//! `SessionStore` owns the session id, preferences, history log, and
//! progress map. Every mutation goes through it: it writes the matching
//! durable snapshot before updating in-memory state, so a crash never
//! leaves the store ahead of what was acknowledged.

use solace_api::{ActivityHistoryItem, UserPreferences, MAX_FAVORITE_ACTIVITIES};
use solace_remote::{RemoteError, SessionApi};
use solace_store::Store;
use solace_util::{ActivityId, Result, SessionId, SolaceError, UserId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Most recent history records kept after an append
pub const MAX_HISTORY_RECORDS: usize = 100;

/// How `initialize` obtained the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// No local session id existed; a fresh session was created remotely
    Created,

    /// Local session id found and the remote copy was fetched
    Restored,

    /// Local session id found but the remote fetch failed; running from
    /// the last durable snapshot
    Offline,
}

/// Client-side owner of all session state
pub struct SessionStore {
    store: Arc<dyn Store>,
    remote: Arc<dyn SessionApi>,
    user_id: UserId,

    session_id: Option<SessionId>,
    preferences: UserPreferences,
    history: Vec<ActivityHistoryItem>,
    progress: HashMap<ActivityId, f32>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn Store>, remote: Arc<dyn SessionApi>, user_id: UserId) -> Self {
        Self {
            store,
            remote,
            user_id,
            session_id: None,
            preferences: UserPreferences::default(),
            history: Vec::new(),
            progress: HashMap::new(),
        }
    }

    /// Establish the session: restore from the remote store when a local
    /// session id exists, fall back to the durable snapshot when the
    /// remote is unreachable, or create a fresh session otherwise.
    ///
    /// Safe to call again after any outcome; a repeat call re-syncs.
    pub async fn initialize(&mut self) -> Result<InitOutcome> {
        let local_id = self
            .store
            .load_session_id()
            .map_err(|e| SolaceError::storage(e.to_string()))?;

        let Some(session_id) = local_id else {
            return self.create_fresh().await;
        };

        match self.remote.fetch_session(&session_id).await {
            Ok(payload) => {
                self.session_id = Some(session_id.clone());
                self.preferences = payload.preferences;

                // The remote copy is authoritative for history, but an
                // empty remote log after a partial fetch must not wipe
                // what was persisted locally.
                let local_history = self
                    .store
                    .load_history()
                    .map_err(|e| SolaceError::storage(e.to_string()))?;
                self.history = if payload.activity_history.is_empty() {
                    local_history
                } else {
                    payload.activity_history
                };

                // Progress is client-side only; always restore it.
                self.progress = self
                    .store
                    .load_progress()
                    .map_err(|e| SolaceError::storage(e.to_string()))?;

                self.persist_history()?;
                self.persist_preferences()?;

                info!(
                    session_id = %session_id,
                    history_len = self.history.len(),
                    "Session restored from remote"
                );
                Ok(InitOutcome::Restored)
            }
            Err(err) => {
                warn!(
                    session_id = %session_id,
                    error = %err,
                    "Remote session fetch failed, using local snapshot"
                );

                self.session_id = Some(session_id);
                self.preferences = self
                    .store
                    .load_preferences()
                    .map_err(|e| SolaceError::storage(e.to_string()))?
                    .unwrap_or_default();
                self.history = self
                    .store
                    .load_history()
                    .map_err(|e| SolaceError::storage(e.to_string()))?;
                self.progress = self
                    .store
                    .load_progress()
                    .map_err(|e| SolaceError::storage(e.to_string()))?;

                Ok(InitOutcome::Offline)
            }
        }
    }

    async fn create_fresh(&mut self) -> Result<InitOutcome> {
        let session_id = self
            .remote
            .create_session(&self.user_id)
            .await
            .map_err(|e| SolaceError::network(e.to_string()))?;

        self.store
            .save_session_id(&session_id)
            .map_err(|e| SolaceError::storage(e.to_string()))?;

        self.session_id = Some(session_id.clone());
        self.preferences = UserPreferences::default();
        self.history = Vec::new();
        self.progress = HashMap::new();

        info!(session_id = %session_id, user_id = %self.user_id, "Session created");
        Ok(InitOutcome::Created)
    }

    /// Re-fetch history from the remote store, overwriting the local copy
    pub async fn refresh_history(&mut self) -> Result<()> {
        let session_id = self.require_session()?.clone();

        let history = self
            .remote
            .fetch_history(&session_id)
            .await
            .map_err(|e| SolaceError::network(e.to_string()))?;

        debug!(
            session_id = %session_id,
            history_len = history.len(),
            "History refreshed from remote"
        );

        self.history = history;
        self.persist_history()
    }

    /// Submit new preferences to the remote store, then adopt them locally.
    ///
    /// Write-through: if the remote update fails, neither in-memory state
    /// nor the durable snapshot changes.
    pub async fn update_preferences(&mut self, preferences: UserPreferences) -> Result<()> {
        let session_id = self.require_session()?.clone();

        if preferences.favorite_activities.len() > MAX_FAVORITE_ACTIVITIES {
            return Err(SolaceError::validation(format!(
                "too many favorite activities: {} (max {})",
                preferences.favorite_activities.len(),
                MAX_FAVORITE_ACTIVITIES
            )));
        }

        self.remote
            .update_preferences(&session_id, &preferences)
            .await
            .map_err(|e| match e {
                RemoteError::NotFound(what) => SolaceError::invalid_state(format!(
                    "remote session missing while updating preferences: {what}"
                )),
                other => SolaceError::network(other.to_string()),
            })?;

        self.preferences = preferences;
        self.persist_preferences()?;

        info!(session_id = %session_id, "Preferences updated");
        Ok(())
    }

    /// Clear all durable and in-memory state, then establish a fresh session
    pub async fn reset(&mut self) -> Result<InitOutcome> {
        if let Some(session_id) = &self.session_id {
            info!(session_id = %session_id, "Resetting session");
        }

        self.store
            .clear()
            .map_err(|e| SolaceError::storage(e.to_string()))?;

        self.session_id = None;
        self.preferences = UserPreferences::default();
        self.history = Vec::new();
        self.progress = HashMap::new();

        self.initialize().await
    }

    /// Append a history record and persist the log, trimming to the most
    /// recent [`MAX_HISTORY_RECORDS`]
    pub(crate) fn append_history(&mut self, item: ActivityHistoryItem) -> Result<()> {
        self.history.push(item);
        if self.history.len() > MAX_HISTORY_RECORDS {
            let excess = self.history.len() - MAX_HISTORY_RECORDS;
            self.history.drain(..excess);
        }
        self.persist_history()
    }

    /// Record per-activity progress and persist the map
    pub(crate) fn set_progress(&mut self, activity_id: ActivityId, progress: f32) -> Result<()> {
        self.progress.insert(activity_id, progress);
        self.store
            .save_progress(&self.progress)
            .map_err(|e| SolaceError::storage(e.to_string()))
    }

    pub(crate) fn load_active_attempt(&self) -> Result<Option<ActivityHistoryItem>> {
        self.store
            .load_active_attempt()
            .map_err(|e| SolaceError::storage(e.to_string()))
    }

    pub(crate) fn save_active_attempt(&self, item: &ActivityHistoryItem) -> Result<()> {
        self.store
            .save_active_attempt(item)
            .map_err(|e| SolaceError::storage(e.to_string()))
    }

    pub(crate) fn clear_active_attempt(&self) -> Result<()> {
        self.store
            .clear_active_attempt()
            .map_err(|e| SolaceError::storage(e.to_string()))
    }

    pub(crate) fn remote(&self) -> &Arc<dyn SessionApi> {
        &self.remote
    }

    pub(crate) fn require_session(&self) -> Result<&SessionId> {
        self.session_id.as_ref().ok_or(SolaceError::NoActiveSession)
    }

    fn persist_history(&self) -> Result<()> {
        self.store
            .save_history(&self.history)
            .map_err(|e| SolaceError::storage(e.to_string()))
    }

    fn persist_preferences(&self) -> Result<()> {
        self.store
            .save_preferences(&self.preferences)
            .map_err(|e| SolaceError::storage(e.to_string()))
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    pub fn history(&self) -> &[ActivityHistoryItem] {
        &self.history
    }

    pub fn progress_for(&self, activity_id: &ActivityId) -> f32 {
        self.progress.get(activity_id).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solace_api::{DifficultyLevel, SessionPayload};
    use solace_remote::MockSessionServer;
    use solace_store::SqliteStore;

    fn make_store() -> (SessionStore, Arc<MockSessionServer>, Arc<SqliteStore>) {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let remote = Arc::new(MockSessionServer::new());
        let session = SessionStore::new(store.clone(), remote.clone(), UserId::new("u1"));
        (session, remote, store)
    }

    #[tokio::test]
    async fn initialize_creates_session_when_none_persisted() {
        let (mut session, _remote, store) = make_store();

        let outcome = session.initialize().await.unwrap();
        assert_eq!(outcome, InitOutcome::Created);
        assert!(session.session_id().is_some());

        // The new id must have been persisted
        let persisted = store.load_session_id().unwrap();
        assert_eq!(persisted.as_ref(), session.session_id());
    }

    #[tokio::test]
    async fn initialize_restores_remote_preferences() {
        let (mut session, remote, store) = make_store();

        let id = SessionId::new("u1-session-9");
        store.save_session_id(&id).unwrap();

        let mut payload = SessionPayload::empty(id.clone());
        payload.preferences.difficulty_level = DifficultyLevel::Advanced;
        remote.insert_session(payload);

        let outcome = session.initialize().await.unwrap();
        assert_eq!(outcome, InitOutcome::Restored);
        assert_eq!(
            session.preferences().difficulty_level,
            DifficultyLevel::Advanced
        );
    }

    #[tokio::test]
    async fn initialize_falls_back_to_local_snapshot_when_remote_fails() {
        let (mut session, remote, store) = make_store();

        let id = SessionId::new("u1-session-9");
        store.save_session_id(&id).unwrap();
        let mut prefs = UserPreferences::default();
        prefs.difficulty_level = DifficultyLevel::Intermediate;
        store.save_preferences(&prefs).unwrap();

        remote.set_fail_fetch(true);

        let outcome = session.initialize().await.unwrap();
        assert_eq!(outcome, InitOutcome::Offline);
        assert_eq!(session.session_id(), Some(&id));
        assert_eq!(
            session.preferences().difficulty_level,
            DifficultyLevel::Intermediate
        );
    }

    #[tokio::test]
    async fn refresh_history_requires_session() {
        let (mut session, _remote, _store) = make_store();

        let err = session.refresh_history().await.unwrap_err();
        assert!(matches!(err, SolaceError::NoActiveSession));
    }

    #[tokio::test]
    async fn update_preferences_is_write_through() {
        let (mut session, remote, store) = make_store();
        session.initialize().await.unwrap();

        remote.set_fail_update(true);

        let mut prefs = UserPreferences::default();
        prefs.notifications = false;
        let err = session.update_preferences(prefs).await.unwrap_err();
        assert!(matches!(err, SolaceError::NetworkError(_)));

        // Local state and the durable snapshot stay untouched
        assert!(session.preferences().notifications);
        assert_eq!(store.load_preferences().unwrap(), None);
    }

    #[tokio::test]
    async fn update_preferences_rejects_oversized_favorites() {
        let (mut session, _remote, _store) = make_store();
        session.initialize().await.unwrap();

        let mut prefs = UserPreferences::default();
        for n in 0..=MAX_FAVORITE_ACTIVITIES {
            prefs.favorite_activities.insert(ActivityId::new(format!("a{n}")));
        }

        let err = session.update_preferences(prefs).await.unwrap_err();
        assert!(matches!(err, SolaceError::ValidationError(_)));
    }

    #[tokio::test]
    async fn reset_yields_a_fresh_session() {
        let (mut session, _remote, _store) = make_store();
        session.initialize().await.unwrap();
        let first = session.session_id().cloned().unwrap();

        let mut prefs = UserPreferences::default();
        prefs.notifications = false;
        session.update_preferences(prefs).await.unwrap();

        let outcome = session.reset().await.unwrap();
        assert_eq!(outcome, InitOutcome::Created);
        assert_ne!(session.session_id(), Some(&first));
        assert!(session.preferences().notifications);
        assert!(session.history().is_empty());
    }
}
