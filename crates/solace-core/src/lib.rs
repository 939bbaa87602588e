//! Session store and activity lifecycle engine for solace
//!
//! This crate is the heart of solace, containing:
//! - The session state container (session id, preferences, history log,
//!   progress map) with write-through persistence
//! - The activity lifecycle state machine (NotStarted -> Active -> Completed)
//!   with at most one active attempt at a time
//! - Events emitted by lifecycle transitions

mod engine;
mod events;
mod session;

pub use engine::*;
pub use events::*;
pub use session::*;
