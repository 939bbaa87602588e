//! HTTP implementation of the remote client traits

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use solace_api::{
    ActivityDefinition, ActivityHistoryItem, CreatedSession, SessionPayload, UserPreferences,
};
use solace_util::{ActivityId, SessionId, UserId};
use std::time::Duration;
use tracing::debug;

use crate::{ActivityCatalog, RemoteError, RemoteResult, SessionApi};

/// HTTP client for the wellness backend, implementing both remote traits
pub struct HttpApi {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct HistoryEnvelope {
    history: Vec<ActivityHistoryItem>,
}

impl HttpApi {
    /// Build a client against the given base URL with per-request timeouts
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> RemoteResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn check_status(response: Response, what: &str) -> RemoteResult<Response> {
        match response.status() {
            StatusCode::NOT_FOUND => Err(RemoteError::NotFound(what.to_string())),
            status if status.is_success() => Ok(response),
            status => Err(RemoteError::Status(status.as_u16())),
        }
    }
}

#[async_trait]
impl SessionApi for HttpApi {
    async fn create_session(&self, user_id: &UserId) -> RemoteResult<SessionId> {
        debug!(user_id = %user_id, "Creating remote session");

        let response = self
            .client
            .post(self.url("/session/create"))
            .query(&[("user_id", user_id.as_str())])
            .send()
            .await?;

        let created: CreatedSession = Self::check_status(response, "session")?.json().await?;
        Ok(created.session_id)
    }

    async fn fetch_session(&self, session_id: &SessionId) -> RemoteResult<SessionPayload> {
        debug!(session_id = %session_id, "Fetching remote session");

        let response = self
            .client
            .get(self.url(&format!("/session/{}", session_id)))
            .send()
            .await?;

        Ok(Self::check_status(response, "session")?.json().await?)
    }

    async fn fetch_history(
        &self,
        session_id: &SessionId,
    ) -> RemoteResult<Vec<ActivityHistoryItem>> {
        let response = self
            .client
            .get(self.url("/api/activities/history"))
            .query(&[("session_id", session_id.as_str())])
            .send()
            .await?;

        let envelope: HistoryEnvelope = Self::check_status(response, "history")?.json().await?;
        Ok(envelope.history)
    }

    async fn update_preferences(
        &self,
        session_id: &SessionId,
        preferences: &UserPreferences,
    ) -> RemoteResult<()> {
        let response = self
            .client
            .post(self.url(&format!("/session/{}/preferences", session_id)))
            .json(preferences)
            .send()
            .await?;

        Self::check_status(response, "session")?;
        Ok(())
    }

    async fn notify_completion(
        &self,
        session_id: &SessionId,
        activity_id: &ActivityId,
        duration_seconds: u64,
    ) -> RemoteResult<()> {
        let response = self
            .client
            .post(self.url(&format!("/api/activities/{}/complete", activity_id)))
            .query(&[("session_id", session_id.as_str())])
            .json(&serde_json::json!({ "duration_seconds": duration_seconds }))
            .send()
            .await?;

        Self::check_status(response, "activity")?;
        Ok(())
    }
}

#[async_trait]
impl ActivityCatalog for HttpApi {
    async fn fetch_activity(&self, activity_id: &ActivityId) -> RemoteResult<ActivityDefinition> {
        debug!(activity_id = %activity_id, "Fetching activity definition");

        let response = self
            .client
            .get(self.url(&format!("/api/activities/{}", activity_id)))
            .send()
            .await?;

        Ok(Self::check_status(response, "activity")?.json().await?)
    }

    async fn notify_started(
        &self,
        session_id: &SessionId,
        activity_id: &ActivityId,
    ) -> RemoteResult<()> {
        let response = self
            .client
            .post(self.url(&format!("/api/activities/{}/start", activity_id)))
            .query(&[("session_id", session_id.as_str())])
            .send()
            .await?;

        Self::check_status(response, "activity")?;
        Ok(())
    }
}
