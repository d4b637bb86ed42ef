//! Schedule Mutation Engine
//!
//! Translates calendar drag intents into store operations and coordinates
//! with the persistence client. Every mutation is optimistic: apply locally,
//! issue the request, and on rejection replay the pre-mutation snapshot.
//!
//! Operations are two-phase so the host event loop can interleave them:
//! `begin_*` applies the optimistic change and captures a snapshot keyed by
//! a fresh [`OpId`]; [`finish`](ScheduleEngine::finish) /
//! [`finish_create`](ScheduleEngine::finish_create) settles the operation
//! with the client's result. The async methods run both phases around a
//! single client call. A snapshot restores only entries still last-touched
//! by the failing operation, so a stale failure never undoes a newer local
//! edit.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::api::ScheduleClient;
use crate::domain::{CalendarEntry, DomainError, DomainResult};
use crate::store::CalendarStore;

use super::clock::{Clock, SystemClock};

/// Handle to an in-flight optimistic operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpId(u64);

/// Pre-mutation state of one entry the operation touched
enum SnapshotRow {
    Present(CalendarEntry),
    Absent(u32),
}

struct PendingOp {
    snapshot: Vec<SnapshotRow>,
    /// Locally allocated id awaiting its server-confirmed replacement
    tentative_id: Option<u32>,
}

/// Applies create/move/delete/count intents against the calendar store
///
/// Single-threaded by design: all mutation happens on the caller's event
/// loop, and network completions are the only suspension points. The engine
/// never retries or cancels requests; transport policy belongs to the client
/// behind [`ScheduleClient`].
pub struct ScheduleEngine<C: ScheduleClient> {
    store: CalendarStore,
    client: Arc<C>,
    clock: Box<dyn Clock>,
    pending: HashMap<OpId, PendingOp>,
    /// Last operation to touch each entry id; guards stale rollbacks
    touched: HashMap<u32, OpId>,
    op_counter: u64,
    /// Tentative ids count down from the top so they never collide with
    /// server-assigned ids
    next_local_id: u32,
    shopping_version: u32,
}

impl<C: ScheduleClient> ScheduleEngine<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self::with_clock(client, Box::new(SystemClock))
    }

    pub fn with_clock(client: Arc<C>, clock: Box<dyn Clock>) -> Self {
        Self {
            store: CalendarStore::new(),
            client,
            clock,
            pending: HashMap::new(),
            touched: HashMap::new(),
            op_counter: 0,
            next_local_id: u32::MAX,
            shopping_version: 0,
        }
    }

    /// The settled entry set, for the view layer
    pub fn store(&self) -> &CalendarStore {
        &self.store
    }

    /// Bumped on every settled mutation; the aggregated shopping list
    /// recomputes when it changes.
    pub fn shopping_version(&self) -> u32 {
        self.shopping_version
    }

    /// Load server-confirmed entries, e.g. on startup or refetch
    pub fn hydrate(&mut self, entries: Vec<CalendarEntry>) {
        for entry in entries {
            self.store.upsert(entry);
        }
    }

    // ========================
    // Two-phase operations
    // ========================

    /// Optimistically schedule a recipe onto a day.
    ///
    /// Returns `None` without any state change for drops the drag physics
    /// produce but the calendar rejects: a day in the past, or a zero count.
    pub fn begin_create(
        &mut self,
        recipe_id: u32,
        day: NaiveDate,
        count: u32,
        team_id: u32,
    ) -> Option<OpId> {
        if day < self.clock.today() {
            log::debug!("rejected schedule drop onto past day {}", day);
            return None;
        }
        if count == 0 {
            log::debug!("rejected schedule drop with zero count");
            return None;
        }

        let op = self.next_op();
        let tentative_id = self.alloc_local_id();
        let tentative = CalendarEntry::new(tentative_id, recipe_id, day, count, team_id);

        let mut snapshot = vec![SnapshotRow::Absent(tentative_id)];
        if let Some(resident) = self.store.find_by_key(team_id, day, recipe_id) {
            snapshot.push(SnapshotRow::Present(resident.clone()));
            self.touched.insert(resident.id, op);
        }
        self.touched.insert(tentative_id, op);
        self.store.upsert(tentative);
        self.pending.insert(
            op,
            PendingOp {
                snapshot,
                tentative_id: Some(tentative_id),
            },
        );
        Some(op)
    }

    /// Settle a create with the client's result.
    ///
    /// On success the tentative entry is replaced by the server-confirmed
    /// one via upsert, merging if the confirmed key collides with a
    /// concurrent creation. On failure the snapshot is replayed. Returns the
    /// id the entry settled under.
    pub fn finish_create(
        &mut self,
        op: OpId,
        result: DomainResult<CalendarEntry>,
    ) -> DomainResult<Option<u32>> {
        let pending = self.take_pending(op)?;
        match result {
            Ok(confirmed) => {
                if let Some(tentative_id) = pending.tentative_id {
                    self.store.remove(tentative_id);
                }
                let id = self.store.upsert(confirmed);
                self.settle(op);
                Ok(Some(id))
            }
            Err(e) => {
                log::warn!("schedule create rejected, rolling back: {}", e);
                self.rollback(op, pending);
                Err(e)
            }
        }
    }

    /// Optimistically move an entry to a new day.
    ///
    /// `Ok(None)` without any state change when `new_day` is in the past.
    pub fn begin_move(&mut self, entry_id: u32, new_day: NaiveDate) -> DomainResult<Option<OpId>> {
        let entry = self.entry(entry_id)?.clone();
        if new_day < self.clock.today() {
            log::debug!("rejected move of entry {} onto past day {}", entry_id, new_day);
            return Ok(None);
        }

        let op = self.next_op();
        let mut snapshot = vec![SnapshotRow::Present(entry.clone())];
        self.touched.insert(entry_id, op);
        if let Some(resident) = self.store.find_by_key(entry.team_id, new_day, entry.recipe_id) {
            if resident.id != entry_id {
                snapshot.push(SnapshotRow::Present(resident.clone()));
                self.touched.insert(resident.id, op);
            }
        }
        self.store.move_to(entry_id, new_day)?;
        self.pending.insert(
            op,
            PendingOp {
                snapshot,
                tentative_id: None,
            },
        );
        Ok(Some(op))
    }

    /// Optimistically change an entry's count.
    ///
    /// A zero count is not representable; delete the entry instead (the
    /// async [`update_count`](ScheduleEngine::update_count) does so).
    pub fn begin_update_count(&mut self, entry_id: u32, new_count: u32) -> DomainResult<OpId> {
        if new_count == 0 {
            return Err(DomainError::InvalidInput(
                "count must stay above zero; delete the entry instead".to_string(),
            ));
        }
        let entry = self.entry(entry_id)?.clone();

        let op = self.next_op();
        self.touched.insert(entry_id, op);
        let mut updated = entry.clone();
        updated.count = new_count;
        self.store.upsert(updated);
        self.pending.insert(
            op,
            PendingOp {
                snapshot: vec![SnapshotRow::Present(entry)],
                tentative_id: None,
            },
        );
        Ok(op)
    }

    /// Optimistically delete an entry.
    pub fn begin_remove(&mut self, entry_id: u32) -> DomainResult<OpId> {
        let entry = self
            .store
            .remove(entry_id)
            .ok_or_else(|| DomainError::NotFound(format!("Calendar entry {} not found", entry_id)))?;

        let op = self.next_op();
        self.touched.insert(entry_id, op);
        self.pending.insert(
            op,
            PendingOp {
                snapshot: vec![SnapshotRow::Present(entry)],
                tentative_id: None,
            },
        );
        Ok(op)
    }

    /// Settle a move/count/remove with the client's result.
    pub fn finish(&mut self, op: OpId, result: DomainResult<()>) -> DomainResult<()> {
        let pending = self.take_pending(op)?;
        match result {
            Ok(()) => {
                self.settle(op);
                Ok(())
            }
            Err(e) => {
                log::warn!("schedule mutation rejected, rolling back: {}", e);
                self.rollback(op, pending);
                Err(e)
            }
        }
    }

    // ========================
    // Intent handlers
    // ========================

    /// Drop a recipe card onto a calendar day.
    ///
    /// `Ok(None)` means the drop was silently rejected (past day); otherwise
    /// the id the entry settled under.
    pub async fn drop_create(
        &mut self,
        recipe_id: u32,
        day: NaiveDate,
        count: u32,
        team_id: u32,
    ) -> DomainResult<Option<u32>> {
        let Some(op) = self.begin_create(recipe_id, day, count, team_id) else {
            return Ok(None);
        };
        let result = self.client.create_entry(recipe_id, day, count, team_id).await;
        self.finish_create(op, result)
    }

    /// Drop an existing entry onto another day. `Ok(false)` means the drop
    /// was silently rejected (past day).
    pub async fn drop_move(&mut self, entry_id: u32, new_day: NaiveDate) -> DomainResult<bool> {
        let Some(op) = self.begin_move(entry_id, new_day)? else {
            return Ok(false);
        };
        let result = self.client.move_entry(entry_id, new_day).await;
        self.finish(op, result)?;
        Ok(true)
    }

    /// Change an entry's count; zero deletes the entry.
    pub async fn update_count(&mut self, entry_id: u32, new_count: u32) -> DomainResult<()> {
        if new_count == 0 {
            return self.remove(entry_id).await;
        }
        let op = self.begin_update_count(entry_id, new_count)?;
        let result = self.client.update_entry_count(entry_id, new_count).await;
        self.finish(op, result)
    }

    /// Explicitly delete an entry.
    pub async fn remove(&mut self, entry_id: u32) -> DomainResult<()> {
        let op = self.begin_remove(entry_id)?;
        let result = self.client.delete_entry(entry_id).await;
        self.finish(op, result)
    }

    /// A drag of an entry ended over something that rejected the drop.
    ///
    /// Dragging off the calendar removes the schedule, except for entries on
    /// past days, which are immutable via drag. Returns whether the entry
    /// was removed.
    pub async fn drag_end_without_drop(&mut self, entry_id: u32) -> DomainResult<bool> {
        let entry = self.entry(entry_id)?;
        if entry.day < self.clock.today() {
            log::debug!("entry {} lies in the past; drag-off leaves it in place", entry_id);
            return Ok(false);
        }
        self.remove(entry_id).await?;
        Ok(true)
    }

    // ========================
    // Internals
    // ========================

    fn entry(&self, entry_id: u32) -> DomainResult<&CalendarEntry> {
        self.store
            .get(entry_id)
            .ok_or_else(|| DomainError::NotFound(format!("Calendar entry {} not found", entry_id)))
    }

    fn next_op(&mut self) -> OpId {
        self.op_counter += 1;
        OpId(self.op_counter)
    }

    fn alloc_local_id(&mut self) -> u32 {
        let id = self.next_local_id;
        self.next_local_id -= 1;
        id
    }

    fn take_pending(&mut self, op: OpId) -> DomainResult<PendingOp> {
        self.pending
            .remove(&op)
            .ok_or_else(|| DomainError::Conflict(format!("operation {:?} is not pending", op)))
    }

    fn settle(&mut self, op: OpId) {
        self.touched.retain(|_, last| *last != op);
        self.shopping_version += 1;
    }

    /// Replay the snapshot exactly, skipping entries a newer operation has
    /// touched since. Removals run first so a restored entry never sees its
    /// collision key transiently occupied.
    fn rollback(&mut self, op: OpId, pending: PendingOp) {
        for row in &pending.snapshot {
            if let SnapshotRow::Absent(id) = row {
                if self.touched.get(id) == Some(&op) {
                    self.store.remove(*id);
                }
            }
        }
        for row in pending.snapshot {
            if let SnapshotRow::Present(entry) = row {
                if self.touched.get(&entry.id) != Some(&op) {
                    continue;
                }
                // A newer entry may have claimed the snapshot's collision key
                // while this operation was in flight; it wins over the stale
                // restore.
                if self
                    .store
                    .find_by_key(entry.team_id, entry.day, entry.recipe_id)
                    .is_some_and(|resident| resident.id != entry.id)
                {
                    log::debug!(
                        "skipping rollback of entry {}; its slot was re-occupied",
                        entry.id
                    );
                    continue;
                }
                self.store.restore(entry);
            }
        }
        self.touched.retain(|_, last| *last != op);
    }
}
