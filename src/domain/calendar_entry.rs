//! Calendar Entry Entity
//!
//! "Recipe R scheduled on day D, count N" for one team. Day equality is by
//! calendar date only; there is no time-of-day component.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use super::entity::Entity;

/// A recipe scheduled on a calendar day
///
/// Within one team the pair `(recipe_id, day)` identifies at most one live
/// entry: two entries landing on the same pair are merged by summing counts,
/// never kept side by side. `count` stays above zero; a decrement to zero
/// deletes the entry instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEntry {
    /// Unique identifier
    pub id: u32,
    /// Scheduled recipe
    pub recipe_id: u32,
    /// Calendar day, date only
    pub day: NaiveDate,
    /// How many batches are planned
    pub count: u32,
    /// Team whose calendar this entry lives on
    pub team_id: u32,
}

impl CalendarEntry {
    pub fn new(id: u32, recipe_id: u32, day: NaiveDate, count: u32, team_id: u32) -> Self {
        Self {
            id,
            recipe_id,
            day,
            count,
            team_id,
        }
    }

    /// The dedup key: entries sharing it must be merged.
    pub fn collision_key(&self) -> (u32, NaiveDate, u32) {
        (self.team_id, self.day, self.recipe_id)
    }
}

impl Entity for CalendarEntry {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Merge two entries that resolved to the same collision key.
///
/// Field provenance: every field comes from `keep` except `count`, which is
/// the sum of both sides. Which side is kept differs per call site: an upsert
/// keeps the incoming entry (it carries newer, server-confirmed attributes),
/// a move keeps the resident entry (its id stays valid for UI state already
/// referencing it).
pub fn merge_counts(keep: CalendarEntry, absorbed: &CalendarEntry) -> CalendarEntry {
    CalendarEntry {
        count: keep.count + absorbed.count,
        ..keep
    }
}
