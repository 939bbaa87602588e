//! Validated settings derived from the raw schema

use solace_util::UserId;
use std::path::PathBuf;
use std::time::Duration;

use crate::RawConfig;

/// Default per-request timeout in seconds
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Validated runtime settings
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the wellness backend, without trailing slash
    pub api_base_url: String,

    /// Timeout applied to every remote request
    pub request_timeout: Duration,

    /// Directory holding the local sqlite store
    pub data_dir: PathBuf,

    /// User id for session creation
    pub user_id: UserId,
}

impl Settings {
    pub(crate) fn from_raw(raw: RawConfig) -> Self {
        let timeout = raw
            .service
            .request_timeout_seconds
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        Self {
            api_base_url: raw.service.api_base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(timeout),
            data_dir: raw
                .service
                .data_dir
                .unwrap_or_else(solace_util::default_data_dir),
            user_id: UserId::new(raw.user.id.unwrap_or_else(|| "local".to_string())),
        }
    }
}
