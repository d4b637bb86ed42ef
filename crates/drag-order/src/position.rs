//! Fractional Position Allocation
//!
//! Sort keys are opaque `f64` values. Inserting between two rows takes the
//! midpoint of its neighbors' keys, so no sibling ever needs rewriting.

/// Position assigned to the first row of an empty collection.
pub const SEED_POSITION: f64 = 10.0;

/// Gap left after the tail row when appending.
pub const TAIL_GAP: f64 = 10.0;

/// Smallest neighbor gap that still admits a usable midpoint. Below this the
/// collection should be renumbered before inserting.
pub const MIN_GAP: f64 = 1e-9;

/// Compute the position for a row dropped between `prev` and `next`.
///
/// The neighbors must come from the settled (server-confirmed) order at drop
/// time, not the in-drag visual order, so floating point error does not
/// compound across repeated drags.
pub fn allocate(prev: Option<f64>, next: Option<f64>) -> f64 {
    match (prev, next) {
        (None, None) => SEED_POSITION,
        (None, Some(next)) => next / 2.0,
        (Some(prev), None) => prev + TAIL_GAP,
        (Some(prev), Some(next)) => prev + (next - prev) / 2.0,
    }
}

/// Whether the gap a drop would land in has become too narrow to split.
///
/// Head inserts halve toward zero, so a head neighbor at or below `MIN_GAP`
/// counts as exhausted too.
pub fn gap_exhausted(prev: Option<f64>, next: Option<f64>) -> bool {
    match (prev, next) {
        (Some(prev), Some(next)) => next - prev <= MIN_GAP,
        (None, Some(next)) => next <= MIN_GAP,
        _ => false,
    }
}

/// Evenly spaced replacement positions for a full renumbering pass.
pub fn renumber(count: usize) -> Vec<f64> {
    (1..=count).map(|i| i as f64 * TAIL_GAP).collect()
}
