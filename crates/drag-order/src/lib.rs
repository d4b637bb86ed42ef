//! Drag-Order Utilities
//!
//! Framework-free drag-reorder mechanics for ordered lists:
//! fractional sort positions plus the gesture math (hover tie-break,
//! optimistic splice, neighbor lookup) a controller needs during a drag.

mod list;
mod position;

pub use list::{crossed_midpoint, neighbors_at, splice, PendingDrag};
pub use position::{allocate, gap_exhausted, renumber, MIN_GAP, SEED_POSITION, TAIL_GAP};
