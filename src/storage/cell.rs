//! Cell and row value types.
//!
//! A [`Row`] is the full set of cell versions stored under one primary key.
//! Each cell is a [`Column`]: a name, a typed value and a version timestamp.
//! The same column name may appear several times in a row with different
//! timestamps; the one with the greatest timestamp is the latest version.
//!
//! Rows are immutable once built. Every mutation produces a fresh `Row` that
//! replaces the previous one wholesale in its table.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::storage::types::PrimaryKey;

/// Typed value carried by a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnValue {
    Boolean(bool),
    String(String),
    Integer(i64),
    Binary(Vec<u8>),
    Double(f64),
}

impl ColumnValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ColumnValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ColumnValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ColumnValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ColumnValue::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            ColumnValue::Binary(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// name of the value's type, for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnValue::Boolean(_) => "BOOLEAN",
            ColumnValue::String(_) => "STRING",
            ColumnValue::Integer(_) => "INTEGER",
            ColumnValue::Binary(_) => "BINARY",
            ColumnValue::Double(_) => "DOUBLE",
        }
    }
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnValue::Boolean(b) => write!(f, "{}", b),
            ColumnValue::String(s) => write!(f, "{}", s),
            ColumnValue::Integer(n) => write!(f, "{}", n),
            ColumnValue::Binary(bytes) => write!(f, "<{} bytes>", bytes.len()),
            ColumnValue::Double(d) => write!(f, "{}", d),
        }
    }
}

impl From<bool> for ColumnValue {
    fn from(value: bool) -> Self {
        ColumnValue::Boolean(value)
    }
}

impl From<&str> for ColumnValue {
    fn from(value: &str) -> Self {
        ColumnValue::String(value.to_string())
    }
}

impl From<String> for ColumnValue {
    fn from(value: String) -> Self {
        ColumnValue::String(value)
    }
}

impl From<i64> for ColumnValue {
    fn from(value: i64) -> Self {
        ColumnValue::Integer(value)
    }
}

impl From<f64> for ColumnValue {
    fn from(value: f64) -> Self {
        ColumnValue::Double(value)
    }
}

impl From<Vec<u8>> for ColumnValue {
    fn from(value: Vec<u8>) -> Self {
        ColumnValue::Binary(value)
    }
}

/// A single cell: name, value and version.
///
/// `timestamp` is `None` for a version-less write request. The mutation
/// engine resolves it to a concrete version before anything is stored, so
/// every column read back out of a table carries `Some(timestamp)`.
///
/// Equality is by (name, value, timestamp).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub value: ColumnValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl Column {
    /// a version-less column; the store picks its version at write time
    pub fn new(name: impl Into<String>, value: impl Into<ColumnValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            timestamp: None,
        }
    }

    /// a column pinned to an explicit version
    pub fn with_timestamp(
        name: impl Into<String>,
        value: impl Into<ColumnValue>,
        timestamp: i64,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            timestamp: Some(timestamp),
        }
    }

    pub fn has_timestamp(&self) -> bool {
        self.timestamp.is_some()
    }

    /// same name and value, stamped with `timestamp` if no version was set
    pub(crate) fn stamped(&self, timestamp: i64) -> Self {
        Self {
            name: self.name.clone(),
            value: self.value.clone(),
            timestamp: Some(self.timestamp.unwrap_or(timestamp)),
        }
    }

    /// whether this is the version identified by (name, timestamp)
    pub(crate) fn is_version(&self, name: &str, timestamp: i64) -> bool {
        self.name == name && self.timestamp == Some(timestamp)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.timestamp {
            Some(ts) => write!(f, "{}={}@{}", self.name, self.value, ts),
            None => write!(f, "{}={}", self.name, self.value),
        }
    }
}

/// All cell versions stored under one primary key.
///
/// Every column of a row carries a timestamp and each (name, timestamp)
/// version appears once. Deserializing enforces both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RowRecord")]
pub struct Row {
    primary_key: PrimaryKey,
    columns: Vec<Column>,
}

/// Serialized shape of a row, checked before it becomes a [`Row`].
#[derive(Deserialize)]
struct RowRecord {
    primary_key: PrimaryKey,
    columns: Vec<Column>,
}

impl TryFrom<RowRecord> for Row {
    type Error = String;

    fn try_from(record: RowRecord) -> Result<Self, Self::Error> {
        if let Some(column) = record.columns.iter().find(|c| !c.has_timestamp()) {
            return Err(format!("column {} has no timestamp", column.name));
        }
        Ok(Row::new(record.primary_key, record.columns))
    }
}

impl Row {
    /// build a row from stamped columns in order
    ///
    /// A later column with the same (name, timestamp) as an earlier one
    /// replaces it, so each version appears at most once.
    pub(crate) fn new(primary_key: PrimaryKey, columns: impl IntoIterator<Item = Column>) -> Self {
        let mut row = Self {
            primary_key,
            columns: Vec::new(),
        };
        for column in columns {
            row.insert_version(column);
        }
        row
    }

    pub fn primary_key(&self) -> &PrimaryKey {
        &self.primary_key
    }

    /// every stored version of every column, in write order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    /// all versions of `name`, newest first; empty if the column is absent
    pub fn get_column(&self, name: &str) -> Vec<&Column> {
        let mut versions: Vec<&Column> = self.columns.iter().filter(|c| c.name == name).collect();
        versions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        versions
    }

    /// the version of `name` with the greatest timestamp
    pub fn latest_column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .filter(|c| c.name == name)
            .max_by_key(|c| c.timestamp)
    }

    /// the version of `name` stored at exactly `timestamp`
    pub fn get_column_version(&self, name: &str, timestamp: i64) -> Option<&Column> {
        self.columns.iter().find(|c| c.is_version(name, timestamp))
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// distinct column names present in the row, sorted
    pub fn column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(|c| c.name.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// number of stored cell versions
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// add a version, replacing any version with the same (name, timestamp)
    pub(crate) fn insert_version(&mut self, column: Column) {
        if let Some(ts) = column.timestamp {
            self.columns.retain(|c| !c.is_version(&column.name, ts));
        }
        self.columns.push(column);
    }

    /// drop the version identified by (name, timestamp); true if one existed
    pub(crate) fn remove_version(&mut self, name: &str, timestamp: i64) -> bool {
        let before = self.columns.len();
        self.columns.retain(|c| !c.is_version(name, timestamp));
        self.columns.len() != before
    }

    /// drop every version of `name`, returning how many were removed
    pub(crate) fn remove_all_versions(&mut self, name: &str) -> usize {
        let before = self.columns.len();
        self.columns.retain(|c| c.name != name);
        before - self.columns.len()
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ", self.primary_key)?;
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", column)?;
        }
        Ok(())
    }
}
