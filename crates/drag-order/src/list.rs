//! Drag Gesture State
//!
//! Tracks one in-flight drag per list. The list itself stays settled; only
//! the hover index moves while the pointer travels, and the visual order is
//! derived by splicing the dragged row to the hover index.

/// Ephemeral state of a drag gesture. Exists only between drag-start and
/// drop/cancel; never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingDrag {
    pub dragged_id: u32,
    pub source_index: usize,
    pub hover_index: usize,
}

impl PendingDrag {
    pub fn new(dragged_id: u32, source_index: usize) -> Self {
        Self {
            dragged_id,
            source_index,
            hover_index: source_index,
        }
    }

    /// Whether dropping now would leave the order unchanged.
    pub fn is_noop(&self) -> bool {
        self.hover_index == self.source_index
    }
}

/// Decide whether the pointer has crossed far enough over the row at
/// `candidate_index` to take its slot.
///
/// Dragging downward the pointer must pass below the candidate's vertical
/// midpoint; dragging upward it must pass above. Keeps the hover index from
/// oscillating while the pointer rests near a row boundary.
pub fn crossed_midpoint(
    hover_index: usize,
    candidate_index: usize,
    pointer_y: f64,
    candidate_mid_y: f64,
) -> bool {
    if candidate_index > hover_index {
        pointer_y > candidate_mid_y
    } else if candidate_index < hover_index {
        pointer_y < candidate_mid_y
    } else {
        false
    }
}

/// Optimistic reorder: remove at `from`, insert at `to`.
pub fn splice<T>(rows: &mut Vec<T>, from: usize, to: usize) {
    if from == to || from >= rows.len() || to >= rows.len() {
        return;
    }
    let row = rows.remove(from);
    rows.insert(to, row);
}

/// Neighbor positions around drop slot `to`, taken from the settled order
/// with the dragged row excluded.
///
/// `settled` is the full `(id, position)` sequence sorted by position; `to`
/// is an index into the spliced visual order. Returns `(None, None)` when the
/// dragged row is the only row, in which case the caller must treat the drop
/// as a no-op rather than allocate.
pub fn neighbors_at(settled: &[(u32, f64)], dragged_id: u32, to: usize) -> (Option<f64>, Option<f64>) {
    let rest: Vec<f64> = settled
        .iter()
        .filter(|(id, _)| *id != dragged_id)
        .map(|(_, position)| *position)
        .collect();
    let prev = if to == 0 { None } else { rest.get(to - 1).copied() };
    let next = rest.get(to).copied();
    (prev, next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_drag_starts_as_noop() {
        let drag = PendingDrag::new(7, 2);
        assert!(drag.is_noop());
    }

    #[test]
    fn test_crossed_midpoint_downward() {
        // Moving down: only once the pointer is below the candidate's midpoint.
        assert!(!crossed_midpoint(0, 1, 40.0, 50.0));
        assert!(crossed_midpoint(0, 1, 55.0, 50.0));
    }

    #[test]
    fn test_crossed_midpoint_upward() {
        assert!(!crossed_midpoint(2, 1, 55.0, 50.0));
        assert!(crossed_midpoint(2, 1, 45.0, 50.0));
    }

    #[test]
    fn test_crossed_midpoint_same_slot() {
        assert!(!crossed_midpoint(1, 1, 0.0, 50.0));
    }

    #[test]
    fn test_splice_moves_row() {
        let mut rows = vec!["a", "b", "c"];
        splice(&mut rows, 0, 2);
        assert_eq!(rows, vec!["b", "c", "a"]);
        splice(&mut rows, 2, 0);
        assert_eq!(rows, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_splice_out_of_bounds_is_ignored() {
        let mut rows = vec![1, 2];
        splice(&mut rows, 0, 5);
        assert_eq!(rows, vec![1, 2]);
    }

    #[test]
    fn test_neighbors_at_tail() {
        let settled = [(1, 10.0), (2, 20.0), (3, 30.0)];
        // Dragging row 1 to the end: the slot after row 3.
        assert_eq!(neighbors_at(&settled, 1, 2), (Some(30.0), None));
    }

    #[test]
    fn test_neighbors_at_head() {
        let settled = [(1, 10.0), (2, 20.0), (3, 30.0)];
        assert_eq!(neighbors_at(&settled, 3, 0), (None, Some(10.0)));
    }

    #[test]
    fn test_neighbors_between() {
        let settled = [(1, 10.0), (2, 20.0), (3, 30.0)];
        assert_eq!(neighbors_at(&settled, 1, 1), (Some(20.0), Some(30.0)));
    }

    #[test]
    fn test_neighbors_sole_row() {
        let settled = [(1, 10.0)];
        assert_eq!(neighbors_at(&settled, 1, 0), (None, None));
    }
}
