//! Multi-table, multi-row batch requests.
//!
//! Requests group their elements per table; the orchestrator dispatches each
//! element to the single-row path and tags every result with its zero-based
//! position within its table's list.

mod change;
mod orchestrator;
mod request;
mod response;

pub use change::{RowChange, RowDeleteChange, RowPutChange, RowUpdateChange};
pub use orchestrator::{batch_get_row, batch_write_row};
pub use request::{BatchGetRowRequest, BatchWriteRowRequest};
pub use response::{BatchGetRowResponse, BatchRowResponse, BatchWriteRowResponse, RowResult};
