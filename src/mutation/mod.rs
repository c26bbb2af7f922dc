//! Versioned mutation engine.
//!
//! Computes the row that results from a PUT or an UPDATE against the current
//! row for a key:
//!
//! - PUT appends every column as a new version; a missing row is created.
//! - UPDATE applies an ordered list of [`ColumnUpdate`] steps, each against
//!   the result of the previous one. A missing row stays missing.
//!
//! The [`Clock`] supplies versions for columns written without a timestamp.

mod clock;
mod engine;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{apply_put, apply_update, ColumnUpdate, UpdateType};
