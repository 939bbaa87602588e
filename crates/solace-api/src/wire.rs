//! Wire payloads exchanged with the remote session store

use serde::{Deserialize, Serialize};
use solace_util::SessionId;

use crate::{ActivityHistoryItem, UserPreferences};

/// Full session state as returned by `GET /session/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionPayload {
    pub session_id: SessionId,

    #[serde(default)]
    pub preferences: UserPreferences,

    #[serde(default)]
    pub activity_history: Vec<ActivityHistoryItem>,
}

impl SessionPayload {
    pub fn empty(session_id: SessionId) -> Self {
        Self {
            session_id,
            preferences: UserPreferences::default(),
            activity_history: Vec::new(),
        }
    }
}

/// Response of `POST /session/create`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedSession {
    pub session_id: SessionId,
}
