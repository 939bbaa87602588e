//! Shared utilities for the solace engine
//!
//! This crate provides:
//! - ID types (SessionId, ActivityId, AttemptId, UserId)
//! - Time helpers (time-of-day buckets, calendar keys, duration formatting)
//! - Error types
//! - Default paths for config and data directories

mod error;
mod ids;
mod paths;
mod time;

pub use error::*;
pub use ids::*;
pub use paths::*;
pub use time::*;
