//! Engine Layer
//!
//! Turns drag intents into optimistic local mutations paired with client
//! requests, rolling back to the captured snapshot when a request fails.

mod clock;
mod ordered;
mod schedule;


pub use clock::{Clock, SystemClock};
pub use ordered::OrderedList;
pub use schedule::{OpId, ScheduleEngine};
