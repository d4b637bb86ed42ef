//! Calendar Entry Store
//!
//! Normalized in-memory collection of schedule entries: a map keyed by entry
//! id plus a derived index by `(team_id, day, recipe_id)` used to detect
//! collisions. The store owns the merge/dedup invariant; callers go through
//! `upsert`/`move_to`/`remove` and never mutate entries in place.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::{merge_counts, CalendarEntry, DomainError, DomainResult};

type CollisionKey = (u32, NaiveDate, u32);

/// Normalized set of calendar entries for any number of teams
///
/// Invariant: no two live entries share a collision key. Operations uphold it
/// by merging on insert/move; `debug_assert!`s verify it after every write.
#[derive(Debug, Default)]
pub struct CalendarStore {
    entries: HashMap<u32, CalendarEntry>,
    by_key: HashMap<CollisionKey, u32>,
}

impl CalendarStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: u32) -> Option<&CalendarEntry> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CalendarEntry> {
        self.entries.values()
    }

    /// Entries on one team's day, sorted by id for stable display
    pub fn entries_for_day(&self, team_id: u32, day: NaiveDate) -> Vec<&CalendarEntry> {
        let mut entries: Vec<&CalendarEntry> = self
            .entries
            .values()
            .filter(|e| e.team_id == team_id && e.day == day)
            .collect();
        entries.sort_by_key(|e| e.id);
        entries
    }

    /// The entry currently occupying a collision key, if any
    pub fn find_by_key(&self, team_id: u32, day: NaiveDate, recipe_id: u32) -> Option<&CalendarEntry> {
        self.by_key
            .get(&(team_id, day, recipe_id))
            .and_then(|id| self.entries.get(id))
    }

    /// Insert or update an entry, merging away any collision.
    ///
    /// If another entry already occupies the same collision key, the incoming
    /// entry survives (it carries the newer attributes) with the counts
    /// summed, and the resident entry is removed from map and index. Returns
    /// the id the data now lives under.
    pub fn upsert(&mut self, entry: CalendarEntry) -> u32 {
        // Re-keying an existing id (day edit via upsert) must drop its old
        // index slot first.
        if let Some(previous) = self.entries.remove(&entry.id) {
            self.by_key.remove(&previous.collision_key());
        }

        let key = entry.collision_key();
        let survivor = match self.by_key.get(&key).copied() {
            Some(resident_id) => {
                let resident = self
                    .entries
                    .remove(&resident_id)
                    .expect("index points at a live entry");
                merge_counts(entry, &resident)
            }
            None => entry,
        };

        let id = survivor.id;
        self.by_key.insert(key, id);
        self.entries.insert(id, survivor);
        debug_assert!(self.keys_are_unique());
        id
    }

    /// Move an entry to a new day, merging into any resident collision.
    ///
    /// On collision the resident entry survives under its own id (UI state
    /// referencing that id stays valid) with the counts summed, and the moved
    /// id disappears. Otherwise the day is rewritten in place. Returns the
    /// surviving id.
    pub fn move_to(&mut self, id: u32, new_day: NaiveDate) -> DomainResult<u32> {
        let entry = self
            .entries
            .get(&id)
            .ok_or_else(|| DomainError::NotFound(format!("Calendar entry {} not found", id)))?
            .clone();

        let target_key = (entry.team_id, new_day, entry.recipe_id);
        if let Some(resident_id) = self.by_key.get(&target_key).copied() {
            if resident_id != id {
                self.entries.remove(&id);
                self.by_key.remove(&entry.collision_key());
                let resident = self
                    .entries
                    .remove(&resident_id)
                    .expect("index points at a live entry");
                self.entries.insert(resident_id, merge_counts(resident, &entry));
                debug_assert!(self.keys_are_unique());
                return Ok(resident_id);
            }
            // Same id: the move is a same-day no-op.
            return Ok(id);
        }

        self.by_key.remove(&entry.collision_key());
        self.by_key.insert(target_key, id);
        if let Some(live) = self.entries.get_mut(&id) {
            live.day = new_day;
        }
        debug_assert!(self.keys_are_unique());
        Ok(id)
    }

    /// Delete an entry unconditionally, returning it if it existed
    pub fn remove(&mut self, id: u32) -> Option<CalendarEntry> {
        let entry = self.entries.remove(&id)?;
        self.by_key.remove(&entry.collision_key());
        debug_assert!(self.keys_are_unique());
        Some(entry)
    }

    /// Restore an entry exactly as captured in a rollback snapshot.
    ///
    /// Unlike `upsert` this never merges: a snapshot replay puts back the
    /// pre-mutation state verbatim. The caller guarantees the restored set
    /// respects the dedup invariant (it held before the mutation).
    pub(crate) fn restore(&mut self, entry: CalendarEntry) {
        if let Some(previous) = self.entries.remove(&entry.id) {
            self.by_key.remove(&previous.collision_key());
        }
        self.by_key.insert(entry.collision_key(), entry.id);
        self.entries.insert(entry.id, entry);
        debug_assert!(self.keys_are_unique());
    }

    fn keys_are_unique(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        self.entries.values().all(|e| seen.insert(e.collision_key()))
            && self.by_key.len() == self.entries.len()
    }

    /// Test-only invariant check: no two live entries share a collision key.
    #[cfg(test)]
    pub fn assert_unique_keys(&self) {
        assert!(self.keys_are_unique(), "duplicate (team, day, recipe) keys");
    }
}
