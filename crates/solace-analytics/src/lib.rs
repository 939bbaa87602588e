//! Analytics over the activity history log
//!
//! Five independent aggregations, each a pure function
//! `&[ActivityHistoryItem] -> aggregate`:
//! - Completion/points statistics
//! - Calendar-day streaks
//! - Category breakdown
//! - Time-based breakdown (day/week/month, time of day, weekday)
//! - Recommendation accuracy
//!
//! None of these functions mutate their input or perform I/O, and none of
//! them error: an empty or malformed log yields zeroed aggregates, since the
//! results feed a dashboard directly.

mod activity;
mod category;
mod recommendation;
mod streak;
mod timebased;

pub use activity::*;
pub use category::*;
pub use recommendation::*;
pub use streak::*;
pub use timebased::*;
