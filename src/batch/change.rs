//! Single-row changes carried by a batch write.

use serde::{Deserialize, Serialize};

use crate::mutation::ColumnUpdate;
use crate::storage::{Column, PrimaryKey};

/// Write new versions of some columns, creating the row if needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowPutChange {
    pub table_name: String,
    pub primary_key: PrimaryKey,
    pub columns: Vec<Column>,
}

impl RowPutChange {
    pub fn new(table_name: impl Into<String>, primary_key: PrimaryKey) -> Self {
        Self {
            table_name: table_name.into(),
            primary_key,
            columns: Vec::new(),
        }
    }

    pub fn add_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn add_columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
        self.columns.extend(columns);
        self
    }
}

/// Apply an ordered list of column operations to an existing row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowUpdateChange {
    pub table_name: String,
    pub primary_key: PrimaryKey,
    pub updates: Vec<ColumnUpdate>,
}

impl RowUpdateChange {
    pub fn new(table_name: impl Into<String>, primary_key: PrimaryKey) -> Self {
        Self {
            table_name: table_name.into(),
            primary_key,
            updates: Vec::new(),
        }
    }

    /// Put a column version.
    pub fn put(mut self, column: Column) -> Self {
        self.updates.push(ColumnUpdate::put(column));
        self
    }

    /// Delete one version of a column.
    pub fn delete_column(mut self, name: impl Into<String>, timestamp: i64) -> Self {
        self.updates.push(ColumnUpdate::delete(name, timestamp));
        self
    }

    /// Delete every version of a column.
    pub fn delete_columns(mut self, name: impl Into<String>) -> Self {
        self.updates.push(ColumnUpdate::delete_all(name));
        self
    }
}

/// Remove a whole row.
///
/// Accepted by requests so callers can express it, but the batch path rejects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowDeleteChange {
    pub table_name: String,
    pub primary_key: PrimaryKey,
}

impl RowDeleteChange {
    pub fn new(table_name: impl Into<String>, primary_key: PrimaryKey) -> Self {
        Self {
            table_name: table_name.into(),
            primary_key,
        }
    }
}

/// One element of a batch write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RowChange {
    Put(RowPutChange),
    Update(RowUpdateChange),
    Delete(RowDeleteChange),
}

impl RowChange {
    pub fn table_name(&self) -> &str {
        match self {
            RowChange::Put(c) => &c.table_name,
            RowChange::Update(c) => &c.table_name,
            RowChange::Delete(c) => &c.table_name,
        }
    }

    pub fn primary_key(&self) -> &PrimaryKey {
        match self {
            RowChange::Put(c) => &c.primary_key,
            RowChange::Update(c) => &c.primary_key,
            RowChange::Delete(c) => &c.primary_key,
        }
    }

    /// Short name of the change kind, used in logs and errors.
    pub fn kind(&self) -> &'static str {
        match self {
            RowChange::Put(_) => "put",
            RowChange::Update(_) => "update",
            RowChange::Delete(_) => "delete",
        }
    }
}

impl From<RowPutChange> for RowChange {
    fn from(change: RowPutChange) -> Self {
        RowChange::Put(change)
    }
}

impl From<RowUpdateChange> for RowChange {
    fn from(change: RowUpdateChange) -> Self {
        RowChange::Update(change)
    }
}

impl From<RowDeleteChange> for RowChange {
    fn from(change: RowDeleteChange) -> Self {
        RowChange::Delete(change)
    }
}
