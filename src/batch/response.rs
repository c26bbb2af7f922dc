//! Batch results.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::storage::Row;

/// Outcome of one batch element.
#[derive(Debug, Clone, PartialEq)]
pub struct RowResult {
    pub table_name: String,
    /// The resulting row, or `None` when no row was produced or found.
    pub row: Option<Arc<Row>>,
    /// Zero-based position of the element within its table's list.
    pub index: usize,
}

impl RowResult {
    pub(crate) fn new(table_name: &str, row: Option<Arc<Row>>, index: usize) -> Self {
        Self {
            table_name: table_name.to_string(),
            row,
            index,
        }
    }

    pub fn has_row(&self) -> bool {
        self.row.is_some()
    }
}

/// Per-table result lists in table-name order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchRowResponse {
    tables: BTreeMap<String, Vec<RowResult>>,
}

pub type BatchWriteRowResponse = BatchRowResponse;
pub type BatchGetRowResponse = BatchRowResponse;

impl BatchRowResponse {
    pub(crate) fn push(&mut self, result: RowResult) {
        self.tables
            .entry(result.table_name.clone())
            .or_default()
            .push(result);
    }

    /// Results for `table`, in input order.
    pub fn table_results(&self, table: &str) -> &[RowResult] {
        self.tables.get(table).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Consume into the table name -> results map.
    pub fn into_tables(self) -> BTreeMap<String, Vec<RowResult>> {
        self.tables
    }

    /// total number of results across tables
    pub fn len(&self) -> usize {
        self.tables.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
