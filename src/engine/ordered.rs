//! Ordered List Controller
//!
//! Client-side ordering of one recipe collection (the steps of a recipe, or
//! its ingredients and section headers) across a drag gesture. The settled
//! rows stay sorted by fractional position; during a drag only a derived
//! visual order changes, and a drop rewrites exactly one row's position.

use std::sync::Arc;

use drag_order::{allocate, crossed_midpoint, gap_exhausted, neighbors_at, renumber, splice, PendingDrag};

use crate::api::OrderingClient;
use crate::domain::{DomainError, DomainResult, RecipeRow};

/// Drag-reorder state machine over one ordered collection
///
/// Settled -> Dragging (drag_start) -> Settled (drop / drag_cancel). The
/// drop commit computes neighbors from the settled order, allocates one new
/// position, persists it, and reverts the splice if persistence fails.
pub struct OrderedList<C: OrderingClient> {
    /// Settled rows, sorted by position ascending
    rows: Vec<RecipeRow>,
    drag: Option<PendingDrag>,
    client: Arc<C>,
}

impl<C: OrderingClient> OrderedList<C> {
    pub fn new(client: Arc<C>, mut rows: Vec<RecipeRow>) -> Self {
        rows.sort_by(|a, b| a.position.total_cmp(&b.position));
        Self {
            rows,
            drag: None,
            client,
        }
    }

    /// The settled order
    pub fn rows(&self) -> &[RecipeRow] {
        &self.rows
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// The order to render: the settled order, with the dragged row spliced
    /// to the hover index while a drag is in flight.
    pub fn display_order(&self) -> Vec<&RecipeRow> {
        let mut view: Vec<&RecipeRow> = self.rows.iter().collect();
        if let Some(drag) = &self.drag {
            splice(&mut view, drag.source_index, drag.hover_index);
        }
        view
    }

    /// Position for a row appended at the tail, used when the editor creates
    /// a new row.
    pub fn position_for_append(&self) -> f64 {
        allocate(self.rows.last().map(|row| row.position), None)
    }

    /// Replace the settled set with the authoritative server collection.
    /// Cancels any drag in flight.
    pub fn reconcile(&mut self, mut rows: Vec<RecipeRow>) {
        rows.sort_by(|a, b| a.position.total_cmp(&b.position));
        self.rows = rows;
        self.drag = None;
    }

    /// Begin dragging a row.
    pub fn drag_start(&mut self, row_id: u32) -> DomainResult<()> {
        if self.drag.is_some() {
            return Err(DomainError::Conflict("a drag is already in progress".to_string()));
        }
        let source_index = self
            .rows
            .iter()
            .position(|row| row.id == row_id)
            .ok_or_else(|| DomainError::NotFound(format!("Row {} not found", row_id)))?;
        self.drag = Some(PendingDrag::new(row_id, source_index));
        Ok(())
    }

    /// The pointer moved over the row at `candidate_index` (an index into
    /// the display order) whose rendered vertical midpoint is
    /// `candidate_mid_y`. The hover index only follows once the pointer has
    /// crossed that midpoint in the direction of travel.
    pub fn drag_over(&mut self, candidate_index: usize, pointer_y: f64, candidate_mid_y: f64) {
        let Some(drag) = &mut self.drag else { return };
        if candidate_index >= self.rows.len() {
            return;
        }
        if crossed_midpoint(drag.hover_index, candidate_index, pointer_y, candidate_mid_y) {
            drag.hover_index = candidate_index;
        }
    }

    /// Abandon the drag without touching any position.
    pub fn drag_cancel(&mut self) {
        self.drag = None;
    }

    /// Commit the drag: allocate a definitive position for the dragged row
    /// from its settled neighbors and persist it. Degenerate drops (no
    /// movement, or a single-row collection) are silent no-ops.
    pub async fn drag_drop(&mut self) -> DomainResult<()> {
        let Some(drag) = self.drag.take() else {
            return Ok(());
        };
        if drag.is_noop() {
            log::debug!("drop at source index; order unchanged");
            return Ok(());
        }

        let settled: Vec<(u32, f64)> = self.rows.iter().map(|row| (row.id, row.position)).collect();
        let (prev, next) = neighbors_at(&settled, drag.dragged_id, drag.hover_index);
        if prev.is_none() && next.is_none() {
            log::debug!("dragged row has no neighbors; order unchanged");
            return Ok(());
        }

        if gap_exhausted(prev, next) {
            return self.renumber_all(drag).await;
        }

        let new_position = allocate(prev, next);
        let index = self.index_of(drag.dragged_id)?;
        let old_position = self.rows[index].position;
        self.rows[index].position = new_position;
        self.resort();

        let result = self.client.update_row_position(drag.dragged_id, new_position).await;
        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                log::warn!("position update rejected, rolling back: {}", e);
                let index = self.index_of(drag.dragged_id)?;
                self.rows[index].position = old_position;
                self.resort();
                Err(e)
            }
        }
    }

    /// The neighbor gap at the drop slot is too narrow to split: renumber
    /// the whole collection to evenly spaced positions and persist each row,
    /// restoring every position if any write fails.
    async fn renumber_all(&mut self, drag: PendingDrag) -> DomainResult<()> {
        log::info!("position gap exhausted; renumbering {} rows", self.rows.len());

        let snapshot: Vec<(u32, f64)> = self.rows.iter().map(|row| (row.id, row.position)).collect();
        let mut order: Vec<u32> = snapshot.iter().map(|(id, _)| *id).collect();
        splice(&mut order, drag.source_index, drag.hover_index);

        let positions = renumber(order.len());
        for (id, position) in order.iter().zip(&positions) {
            let index = self.index_of(*id)?;
            self.rows[index].position = *position;
        }
        self.resort();

        for (id, position) in order.iter().zip(&positions) {
            let result = self.client.update_row_position(*id, *position).await;
            if let Err(e) = result {
                log::warn!("renumbering rejected at row {}, rolling back: {}", id, e);
                for (id, position) in &snapshot {
                    let index = self.index_of(*id)?;
                    self.rows[index].position = *position;
                }
                self.resort();
                return Err(e);
            }
        }
        Ok(())
    }

    fn index_of(&self, row_id: u32) -> DomainResult<usize> {
        self.rows
            .iter()
            .position(|row| row.id == row_id)
            .ok_or_else(|| DomainError::NotFound(format!("Row {} not found", row_id)))
    }

    fn resort(&mut self) {
        self.rows.sort_by(|a, b| a.position.total_cmp(&b.position));
    }
}
