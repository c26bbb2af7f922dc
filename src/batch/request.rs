//! Batch request envelopes.
//!
//! Both requests group their elements by table name in a `BTreeMap`, so
//! tables are processed in ascending name order and each table's elements
//! in the order they were added.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::change::RowChange;
use crate::storage::PrimaryKey;

/// Row changes across one or more tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchWriteRowRequest {
    changes: BTreeMap<String, Vec<RowChange>>,
}

impl BatchWriteRowRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a change under its own table name.
    pub fn add_row_change(&mut self, change: impl Into<RowChange>) -> &mut Self {
        let change = change.into();
        self.changes
            .entry(change.table_name().to_string())
            .or_default()
            .push(change);
        self
    }

    /// Changes queued for `table`, in insertion order.
    pub fn row_changes(&self, table: &str) -> &[RowChange] {
        self.changes.get(table).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.changes.keys().map(String::as_str)
    }

    pub(crate) fn tables(&self) -> impl Iterator<Item = (&str, &[RowChange])> {
        self.changes.iter().map(|(name, changes)| (name.as_str(), changes.as_slice()))
    }

    /// total number of changes
    pub fn len(&self) -> usize {
        self.changes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Primary keys to read across one or more tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchGetRowRequest {
    criteria: BTreeMap<String, Vec<PrimaryKey>>,
}

impl BatchGetRowRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&mut self, table: impl Into<String>, key: PrimaryKey) -> &mut Self {
        self.criteria.entry(table.into()).or_default().push(key);
        self
    }

    pub fn add_criteria(
        &mut self,
        table: impl Into<String>,
        keys: impl IntoIterator<Item = PrimaryKey>,
    ) -> &mut Self {
        self.criteria.entry(table.into()).or_default().extend(keys);
        self
    }

    /// Keys queued for `table`, in insertion order.
    pub fn primary_keys(&self, table: &str) -> &[PrimaryKey] {
        self.criteria.get(table).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.criteria.keys().map(String::as_str)
    }

    pub(crate) fn tables(&self) -> impl Iterator<Item = (&str, &[PrimaryKey])> {
        self.criteria.iter().map(|(name, keys)| (name.as_str(), keys.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.criteria.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
