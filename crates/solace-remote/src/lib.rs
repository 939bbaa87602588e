//! Remote clients for solace
//!
//! The engine talks to two remote collaborators, both behind traits so the
//! core can be tested against mocks:
//! - The session store (create/fetch session, preference sync, history)
//! - The activity catalog (definition lookup, start/complete notifications)

mod http;
mod mock;
mod traits;

pub use http::*;
pub use mock::*;
pub use traits::*;

use thiserror::Error;

/// Errors from remote operations
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unexpected status {0}")]
    Status(u16),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            RemoteError::Decode(e.to_string())
        } else {
            RemoteError::Network(e.to_string())
        }
    }
}

pub type RemoteResult<T> = Result<T, RemoteError>;
