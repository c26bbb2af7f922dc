//! Table metadata definitions.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::PrimaryKeyType;

/// One column of a table's primary key schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryKeySchema {
    /// Key column name.
    pub name: String,
    /// Declared key type.
    #[serde(rename = "type")]
    pub key_type: PrimaryKeyType,
}

impl PrimaryKeySchema {
    pub fn new(name: impl Into<String>, key_type: PrimaryKeyType) -> Self {
        Self {
            name: name.into(),
            key_type,
        }
    }
}

impl fmt::Display for PrimaryKeySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.key_type)
    }
}

/// Table metadata: the name and the ordered primary key schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMeta {
    /// Table name, unique within a catalog.
    pub table_name: String,
    /// Primary key columns in declaration order.
    pub primary_key: Vec<PrimaryKeySchema>,
}

impl TableMeta {
    /// Create metadata with an empty key schema.
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            primary_key: Vec::new(),
        }
    }

    /// Append a primary key column.
    pub fn with_primary_key_column(mut self, name: impl Into<String>, key_type: PrimaryKeyType) -> Self {
        self.primary_key.push(PrimaryKeySchema::new(name, key_type));
        self
    }

    /// Append a primary key column in place.
    pub fn add_primary_key_column(&mut self, schema: PrimaryKeySchema) {
        self.primary_key.push(schema);
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Key column names in declaration order.
    pub fn primary_key_names(&self) -> Vec<&str> {
        self.primary_key.iter().map(|c| c.name.as_str()).collect()
    }
}

impl fmt::Display for TableMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (", self.table_name)?;
        for (i, column) in self.primary_key.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", column)?;
        }
        write!(f, ")")
    }
}

/// Point-in-time description of a registered table.
#[derive(Debug, Clone)]
pub struct TableDescription {
    /// Table metadata as registered.
    pub meta: Arc<TableMeta>,
    /// When the table was created.
    pub created_at: DateTime<Utc>,
    /// Number of rows at the time of the call.
    pub row_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_meta() -> TableMeta {
        TableMeta::new("orders")
            .with_primary_key_column("region", PrimaryKeyType::String)
            .with_primary_key_column("order_id", PrimaryKeyType::Integer)
    }

    #[test]
    fn test_meta_builder() {
        let meta = sample_meta();
        assert_eq!(meta.table_name(), "orders");
        assert_eq!(meta.primary_key_names(), vec!["region", "order_id"]);
        assert_eq!(meta.to_string(), "orders (region STRING, order_id INTEGER)");
    }

    #[test]
    fn test_add_primary_key_column() {
        let mut meta = TableMeta::new("cts_table");
        meta.add_primary_key_column(PrimaryKeySchema::new("pk1", PrimaryKeyType::String));
        assert_eq!(meta.primary_key.len(), 1);
        assert_eq!(meta.primary_key[0].key_type, PrimaryKeyType::String);
    }

    #[test]
    fn test_meta_serialization() {
        let meta = sample_meta();
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["primary_key"][1]["type"], "integer");

        let restored: TableMeta = serde_json::from_value(json).unwrap();
        assert_eq!(restored, meta);
    }
}
