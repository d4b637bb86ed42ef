//! Persistence Client Traits
//!
//! Abstract interfaces to the HTTP API client. The engines call these and
//! never retry or time out themselves; transport policy lives behind them.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{CalendarEntry, DomainResult};

/// Client operations for the scheduling calendar
///
/// All operations are async; a transport or server rejection comes back as
/// `DomainError::Remote` and triggers a rollback in the calling engine.
#[async_trait]
pub trait ScheduleClient: Send + Sync {
    /// Persist a new schedule entry, returning the server-confirmed entry
    async fn create_entry(
        &self,
        recipe_id: u32,
        day: NaiveDate,
        count: u32,
        team_id: u32,
    ) -> DomainResult<CalendarEntry>;

    /// Move an entry to a new day
    async fn move_entry(&self, entry_id: u32, day: NaiveDate) -> DomainResult<()>;

    /// Change an entry's count
    async fn update_entry_count(&self, entry_id: u32, count: u32) -> DomainResult<()>;

    /// Delete an entry
    async fn delete_entry(&self, entry_id: u32) -> DomainResult<()>;
}

/// Client operations for ordered recipe rows
#[async_trait]
pub trait OrderingClient: Send + Sync {
    /// Persist a row's new fractional position
    async fn update_row_position(&self, row_id: u32, position: f64) -> DomainResult<()>;
}
