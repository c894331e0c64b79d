pub mod filters;
pub mod gesture;

pub use filters::{CostFilter, PoolFilters};
pub use gesture::{DragSource, MoveOutcome, ReleaseOutcome, TouchGesture};
