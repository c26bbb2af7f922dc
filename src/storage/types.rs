//! core key types for the storage layer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared type of a primary key column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimaryKeyType {
    String,
    Integer,
    Binary,
}

impl fmt::Display for PrimaryKeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimaryKeyType::String => write!(f, "STRING"),
            PrimaryKeyType::Integer => write!(f, "INTEGER"),
            PrimaryKeyType::Binary => write!(f, "BINARY"),
        }
    }
}

/// Value of a single primary key column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimaryKeyValue {
    String(String),
    Integer(i64),
    Binary(Vec<u8>),
}

impl PrimaryKeyValue {
    /// the key type this value belongs to
    pub fn value_type(&self) -> PrimaryKeyType {
        match self {
            PrimaryKeyValue::String(_) => PrimaryKeyType::String,
            PrimaryKeyValue::Integer(_) => PrimaryKeyType::Integer,
            PrimaryKeyValue::Binary(_) => PrimaryKeyType::Binary,
        }
    }
}

impl fmt::Display for PrimaryKeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimaryKeyValue::String(s) => write!(f, "{}", s),
            PrimaryKeyValue::Integer(n) => write!(f, "{}", n),
            PrimaryKeyValue::Binary(bytes) => {
                for b in bytes {
                    write!(f, "{:02x}", b)?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for PrimaryKeyValue {
    fn from(value: &str) -> Self {
        PrimaryKeyValue::String(value.to_string())
    }
}

impl From<String> for PrimaryKeyValue {
    fn from(value: String) -> Self {
        PrimaryKeyValue::String(value)
    }
}

impl From<i64> for PrimaryKeyValue {
    fn from(value: i64) -> Self {
        PrimaryKeyValue::Integer(value)
    }
}

impl From<Vec<u8>> for PrimaryKeyValue {
    fn from(value: Vec<u8>) -> Self {
        PrimaryKeyValue::Binary(value)
    }
}

/// One named component of a primary key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrimaryKeyColumn {
    pub name: String,
    pub value: PrimaryKeyValue,
}

impl PrimaryKeyColumn {
    pub fn new(name: impl Into<String>, value: impl Into<PrimaryKeyValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A composite primary key.
///
/// Column order is significant: it mirrors the table's declared key schema,
/// so `(a=1, b=2)` and `(b=2, a=1)` are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrimaryKey(Vec<PrimaryKeyColumn>);

impl PrimaryKey {
    pub fn new(columns: Vec<PrimaryKeyColumn>) -> Self {
        Self(columns)
    }

    /// start building a key column by column
    pub fn builder() -> PrimaryKeyBuilder {
        PrimaryKeyBuilder::default()
    }

    /// key columns in declaration order
    pub fn columns(&self) -> &[PrimaryKeyColumn] {
        &self.0
    }

    /// look up a key column by name
    pub fn get(&self, name: &str) -> Option<&PrimaryKeyValue> {
        self.0.iter().find(|c| c.name == name).map(|c| &c.value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PrimaryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, column) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", column.name, column.value)?;
        }
        Ok(())
    }
}

/// Builder for [`PrimaryKey`].
#[derive(Debug, Default)]
pub struct PrimaryKeyBuilder {
    columns: Vec<PrimaryKeyColumn>,
}

impl PrimaryKeyBuilder {
    /// append a key column
    pub fn add_column(mut self, name: impl Into<String>, value: impl Into<PrimaryKeyValue>) -> Self {
        self.columns.push(PrimaryKeyColumn::new(name, value));
        self
    }

    pub fn build(self) -> PrimaryKey {
        PrimaryKey(self.columns)
    }
}
