//! Mealboard Client Core
//!
//! Layered architecture:
//! - domain: Core entities and merge rules
//! - api: Abstract persistence client traits (implemented by the HTTP layer)
//! - store: Normalized calendar collection and its dedup invariant
//! - engine: Drag intents, optimistic mutation, snapshot rollback
//!
//! The view layer renders `OrderedList::display_order` and the settled
//! `CalendarStore`, and feeds drag gestures back through the engines; all
//! persistence flows through the `api` traits.

pub mod api;
pub mod domain;
pub mod engine;
pub mod store;

pub use api::{OrderingClient, ScheduleClient};
pub use domain::{CalendarEntry, DomainError, DomainResult, Entity, Recipe, RecipeRow, RowKind, Team};
pub use engine::{Clock, OpId, OrderedList, ScheduleEngine, SystemClock};
pub use store::CalendarStore;
