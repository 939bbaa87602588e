//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Remote service settings
    pub service: RawServiceConfig,

    /// User identity
    #[serde(default)]
    pub user: RawUserConfig,
}

/// Remote service settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawServiceConfig {
    /// Base URL of the wellness backend, e.g. "http://localhost:8000"
    pub api_base_url: String,

    /// Per-request timeout (default: 10)
    pub request_timeout_seconds: Option<u64>,

    /// Data directory for the local store (default: XDG data dir)
    pub data_dir: Option<PathBuf>,
}

/// User identity settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawUserConfig {
    /// User id passed to session creation (default: "local")
    pub id: Option<String>,
}
