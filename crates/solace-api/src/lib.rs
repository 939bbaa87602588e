//! Shared data model for solace
//!
//! This crate defines:
//! - Catalog and history types (ActivityDefinition, ActivityHistoryItem)
//! - User preferences and their enums
//! - Wire payloads exchanged with the remote session store
//! - The derived aggregate types produced by the analytics engine

mod prefs;
mod stats;
mod types;
mod wire;

pub use prefs::*;
pub use stats::*;
pub use types::*;
pub use wire::*;
