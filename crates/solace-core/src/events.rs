//! Events emitted by the lifecycle engine

use chrono::{DateTime, Local};
use solace_util::{ActivityId, AttemptId, SessionId};

/// Outcome of a lifecycle transition, suitable for display or logging
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// An attempt record was appended for this activity
    ActivityStarted {
        attempt_id: AttemptId,
        activity_id: ActivityId,
        title: String,
        start_time: DateTime<Local>,
    },

    /// The progress map was updated (no history record appended)
    ProgressUpdated {
        activity_id: ActivityId,
        progress: f32,
    },

    /// A terminal completion record was appended
    ActivityCompleted {
        attempt_id: AttemptId,
        activity_id: ActivityId,
        points: u32,
        duration_seconds: u64,
    },

    /// All local state was cleared and a fresh session established
    SessionReset { session_id: SessionId },
}
