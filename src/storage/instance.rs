//! Versioned row store for one table.
//!
//! Rows are held as `Arc<Row>` and replaced wholesale on every write, so a
//! reader that cloned a row keeps a consistent snapshot no matter what
//! writers do afterwards. PUT and UPDATE hold the table's write lock across
//! read-compute-swap; no two writers to the same table interleave.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::{json, Value};
use tracing::debug;

use crate::mutation::{self, Clock, ColumnUpdate};
use crate::storage::cell::{Column, Row};
use crate::storage::types::PrimaryKey;

/// The key -> row mapping of a single table.
///
/// Thread-safe: share it behind an `Arc`.
#[derive(Debug)]
pub struct TableInstance {
    table_name: String,
    rows: RwLock<HashMap<PrimaryKey, Arc<Row>>>,
}

impl TableInstance {
    /// Create an empty instance for `table_name`.
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            rows: RwLock::new(HashMap::new()),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Write `columns` as new versions under `key`, creating the row if needed.
    ///
    /// Takes a single clock reading for all version-less columns.
    pub fn put_row(&self, key: PrimaryKey, columns: &[Column], clock: &dyn Clock) -> Arc<Row> {
        let mut rows = self.rows.write();
        let now = clock.now_nanos();
        let created = !rows.contains_key(&key);
        let row = Arc::new(mutation::apply_put(
            rows.get(&key).map(Arc::as_ref),
            &key,
            columns,
            now,
        ));
        rows.insert(key, Arc::clone(&row));

        debug!(
            table = %self.table_name,
            primary_key = %row.primary_key(),
            columns = columns.len(),
            created,
            versions = row.len(),
            "put row"
        );
        row
    }

    /// Apply `updates` in order to the row under `key`.
    ///
    /// Returns `None`, and stores nothing, when no row exists for `key`.
    pub fn update_row(
        &self,
        key: &PrimaryKey,
        updates: &[ColumnUpdate],
        clock: &dyn Clock,
    ) -> Option<Arc<Row>> {
        let mut rows = self.rows.write();
        let Some(current) = rows.get(key) else {
            debug!(
                table = %self.table_name,
                primary_key = %key,
                "update skipped: row does not exist"
            );
            return None;
        };

        let next = Arc::new(mutation::apply_update(Some(current.as_ref()), updates, clock)?);
        rows.insert(key.clone(), Arc::clone(&next));

        debug!(
            table = %self.table_name,
            primary_key = %key,
            updates = updates.len(),
            versions = next.len(),
            "updated row"
        );
        Some(next)
    }

    /// Snapshot of the row under `key`, all versions included.
    pub fn get_row(&self, key: &PrimaryKey) -> Option<Arc<Row>> {
        self.rows.read().get(key).cloned()
    }

    pub fn contains(&self, key: &PrimaryKey) -> bool {
        self.rows.read().contains_key(key)
    }

    /// number of rows
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    /// Drop every row, keeping the table itself.
    pub fn truncate(&self) -> usize {
        let mut rows = self.rows.write();
        let removed = rows.len();
        rows.clear();
        removed
    }

    /// JSON snapshot of the whole table, for diagnostics.
    ///
    /// Row order is unspecified.
    pub fn dump(&self) -> Value {
        let rows: Vec<Value> = self
            .rows
            .read()
            .values()
            .map(|row| serde_json::to_value(row.as_ref()).unwrap_or(Value::Null))
            .collect();
        json!({ "table": self.table_name, "rows": rows })
    }
}
