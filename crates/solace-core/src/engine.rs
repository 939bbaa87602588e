//! Activity lifecycle engine
//!
//! Drives the start, progress, and complete transitions for at most one
//! active attempt at a time. All history mutation flows through the
//! owned `SessionStore`; remote notifications are best-effort.

use chrono::{DateTime, Local};
use solace_api::ActivityHistoryItem;
use solace_remote::{ActivityCatalog, RemoteError};
use solace_util::{ActivityId, Result, SolaceError};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{EngineEvent, SessionStore};

/// The attempt currently in flight, if any
#[derive(Debug, Clone)]
pub struct ActiveAttempt {
    /// The attempt record as appended to history at start
    pub item: ActivityHistoryItem,
}

impl ActiveAttempt {
    pub fn activity_id(&self) -> &ActivityId {
        &self.item.activity_id
    }
}

/// Lifecycle manager over a session
pub struct WellnessEngine {
    session: SessionStore,
    catalog: Arc<dyn ActivityCatalog>,
    active: Option<ActiveAttempt>,
}

impl WellnessEngine {
    /// Build an engine over the session, rehydrating any in-flight attempt
    /// persisted by a previous process.
    pub fn new(session: SessionStore, catalog: Arc<dyn ActivityCatalog>) -> Result<Self> {
        let active = session
            .load_active_attempt()?
            .map(|item| ActiveAttempt { item });

        if let Some(attempt) = &active {
            debug!(
                activity_id = %attempt.activity_id(),
                "Restored in-flight attempt from durable store"
            );
        }

        Ok(Self {
            session,
            catalog,
            active,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionStore {
        &mut self.session
    }

    pub fn active_attempt(&self) -> Option<&ActiveAttempt> {
        self.active.as_ref()
    }

    pub fn has_active_attempt(&self) -> bool {
        self.active.is_some()
    }

    /// Start an activity: fetch its definition, append an attempt record,
    /// and mark it active.
    ///
    /// Fails without touching history when another attempt is active or
    /// the catalog does not know the id. The start notification to the
    /// catalog is best-effort.
    pub async fn start_activity(
        &mut self,
        activity_id: &ActivityId,
        now: DateTime<Local>,
    ) -> Result<EngineEvent> {
        let session_id = self.session.require_session()?.clone();

        if let Some(active) = &self.active {
            return Err(SolaceError::ActivityAlreadyActive(
                active.activity_id().clone(),
            ));
        }

        let definition = self
            .catalog
            .fetch_activity(activity_id)
            .await
            .map_err(|e| match e {
                RemoteError::NotFound(_) => SolaceError::ActivityNotFound(activity_id.clone()),
                other => SolaceError::network(other.to_string()),
            })?;

        let item = ActivityHistoryItem::attempt(&definition, now);
        self.session.append_history(item.clone())?;
        self.session.save_active_attempt(&item)?;
        self.session.set_progress(activity_id.clone(), 0.0)?;

        if let Err(err) = self.catalog.notify_started(&session_id, activity_id).await {
            warn!(
                activity_id = %activity_id,
                error = %err,
                "Start notification failed, continuing"
            );
        }

        info!(
            session_id = %session_id,
            activity_id = %activity_id,
            attempt_id = %item.id,
            "Activity started"
        );

        let event = EngineEvent::ActivityStarted {
            attempt_id: item.id,
            activity_id: activity_id.clone(),
            title: item.activity_title.clone(),
            start_time: item.start_time,
        };
        self.active = Some(ActiveAttempt { item });

        Ok(event)
    }

    /// Record progress for an activity, clamped to [0, 1].
    ///
    /// Updates and persists the progress map only; no history record is
    /// appended.
    pub fn update_progress(
        &mut self,
        activity_id: &ActivityId,
        progress: f32,
    ) -> Result<EngineEvent> {
        if !progress.is_finite() {
            return Err(SolaceError::validation(format!(
                "progress must be a finite number, got {progress}"
            )));
        }

        let clamped = progress.clamp(0.0, 1.0);
        self.session.set_progress(activity_id.clone(), clamped)?;

        debug!(activity_id = %activity_id, progress = clamped, "Progress updated");

        Ok(EngineEvent::ProgressUpdated {
            activity_id: activity_id.clone(),
            progress: clamped,
        })
    }

    /// Complete the active attempt: append a terminal record carrying the
    /// computed duration and points, and clear the active pointer.
    ///
    /// The completion notification to the remote store is best-effort.
    pub async fn complete_activity(
        &mut self,
        activity_id: &ActivityId,
        mood_level: f32,
        now: DateTime<Local>,
    ) -> Result<EngineEvent> {
        let session_id = self.session.require_session()?.clone();

        if !mood_level.is_finite() {
            return Err(SolaceError::validation(format!(
                "mood level must be a finite number, got {mood_level}"
            )));
        }

        let Some(active) = self
            .active
            .take_if(|a| a.activity_id() == activity_id)
        else {
            return Err(SolaceError::invalid_state(format!(
                "no active attempt for activity {activity_id}"
            )));
        };

        let record = active.item.completion(now, mood_level);
        let points = record.points;
        let duration_seconds = record.duration_seconds;
        let attempt_id = record.id;

        self.session.append_history(record)?;
        self.session.clear_active_attempt()?;
        self.session.set_progress(activity_id.clone(), 1.0)?;

        if let Err(err) = self
            .session
            .remote()
            .notify_completion(&session_id, activity_id, duration_seconds)
            .await
        {
            warn!(
                activity_id = %activity_id,
                error = %err,
                "Completion notification failed, continuing"
            );
        }

        info!(
            session_id = %session_id,
            activity_id = %activity_id,
            points,
            duration_seconds,
            "Activity completed"
        );

        Ok(EngineEvent::ActivityCompleted {
            attempt_id,
            activity_id: activity_id.clone(),
            points,
            duration_seconds,
        })
    }

    /// Clear all session state and establish a fresh session
    pub async fn reset(&mut self) -> Result<EngineEvent> {
        self.active = None;
        self.session.reset().await?;
        let session_id = self.session.require_session()?.clone();
        Ok(EngineEvent::SessionReset { session_id })
    }
}
