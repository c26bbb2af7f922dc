//! Fans batch requests out into single-row operations.
//!
//! A batch is not atomic: each element is an independent single-row
//! operation, and a failure stops further elements without rolling back
//! the ones already applied.

use tracing::{debug, warn};

use super::change::RowChange;
use super::request::{BatchGetRowRequest, BatchWriteRowRequest};
use super::response::{BatchGetRowResponse, BatchWriteRowResponse, RowResult};
use crate::catalog::Catalog;
use crate::mutation::Clock;
use crate::storage::{StoreError, StoreResult};

/// Apply every change of `request`.
///
/// Tables run in ascending name order, not the order they were added to the
/// request; each table's changes run in input order. When a change fails,
/// the tables and changes before it in that order stay applied and nothing
/// after it runs.
pub fn batch_write_row(
    catalog: &Catalog,
    clock: &dyn Clock,
    request: &BatchWriteRowRequest,
) -> StoreResult<BatchWriteRowResponse> {
    let mut response = BatchWriteRowResponse::default();

    for (table, changes) in request.tables() {
        let instance = catalog.require_instance(table)?;

        for (index, change) in changes.iter().enumerate() {
            let row = match change {
                RowChange::Put(put) => Some(instance.put_row(
                    put.primary_key.clone(),
                    &put.columns,
                    clock,
                )),
                RowChange::Update(update) => {
                    instance.update_row(&update.primary_key, &update.updates, clock)
                }
                RowChange::Delete(_) => {
                    warn!(
                        table,
                        index,
                        kind = change.kind(),
                        applied = response.len(),
                        "batch write aborted on unsupported change"
                    );
                    return Err(StoreError::UnsupportedChange {
                        table: table.to_string(),
                        index,
                        kind: change.kind(),
                    });
                }
            };
            response.push(RowResult::new(table, row, index));
        }
    }

    debug!(rows = response.len(), "batch write complete");
    Ok(response)
}

/// Read every requested key: tables in ascending name order, keys in input order.
pub fn batch_get_row(
    catalog: &Catalog,
    request: &BatchGetRowRequest,
) -> StoreResult<BatchGetRowResponse> {
    let mut response = BatchGetRowResponse::default();

    for (table, keys) in request.tables() {
        let instance = catalog.require_instance(table)?;
        for (index, key) in keys.iter().enumerate() {
            response.push(RowResult::new(table, instance.get_row(key), index));
        }
    }

    debug!(rows = response.len(), "batch get complete");
    Ok(response)
}
