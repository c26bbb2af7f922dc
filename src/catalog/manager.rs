//! Catalog manager: table registration and instance lifecycle.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::info;

use super::meta::{TableDescription, TableMeta};
use crate::storage::{StoreError, StoreResult, TableInstance};

/// A registered table: its metadata and its row store, created and dropped together.
#[derive(Debug, Clone)]
struct TableEntry {
    meta: Arc<TableMeta>,
    instance: Arc<TableInstance>,
    created_at: DateTime<Utc>,
}

/// The catalog tracks every table by name.
///
/// Thread-safe. Lookups hand out `Arc`s, so a row operation never holds the
/// catalog lock while it works on a table.
#[derive(Debug, Default)]
pub struct Catalog {
    tables: RwLock<HashMap<String, TableEntry>>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table and allocate its empty row store.
    pub fn create_table(&self, meta: TableMeta) -> StoreResult<Arc<TableInstance>> {
        let mut tables = self.tables.write();
        if tables.contains_key(meta.table_name()) {
            return Err(StoreError::TableAlreadyExists(meta.table_name.clone()));
        }

        let instance = Arc::new(TableInstance::new(meta.table_name()));
        info!(table = %meta, "created table");
        tables.insert(
            meta.table_name.clone(),
            TableEntry {
                meta: Arc::new(meta),
                instance: Arc::clone(&instance),
                created_at: Utc::now(),
            },
        );
        Ok(instance)
    }

    /// Drop a table's metadata and all its rows.
    pub fn delete_table(&self, name: &str) -> StoreResult<()> {
        let entry = self
            .tables
            .write()
            .remove(name)
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))?;

        let rows = entry.instance.truncate();
        info!(table = name, rows, "deleted table");
        Ok(())
    }

    /// Get a table's metadata.
    pub fn table_meta(&self, name: &str) -> Option<Arc<TableMeta>> {
        self.tables.read().get(name).map(|e| Arc::clone(&e.meta))
    }

    /// Get a table's row store.
    pub fn table_instance(&self, name: &str) -> Option<Arc<TableInstance>> {
        self.tables.read().get(name).map(|e| Arc::clone(&e.instance))
    }

    /// Get a table's row store, failing if the table is not registered.
    pub fn require_instance(&self, name: &str) -> StoreResult<Arc<TableInstance>> {
        self.table_instance(name)
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))
    }

    /// Describe a table.
    pub fn describe_table(&self, name: &str) -> Option<TableDescription> {
        let tables = self.tables.read();
        let entry = tables.get(name)?;
        Some(TableDescription {
            meta: Arc::clone(&entry.meta),
            created_at: entry.created_at,
            row_count: entry.instance.len(),
        })
    }

    /// Check if a table exists.
    pub fn table_exists(&self, name: &str) -> bool {
        self.tables.read().contains_key(name)
    }

    /// List all table names, sorted.
    pub fn list_tables(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Remove every row of a table, keeping the table registered.
    pub fn truncate_table(&self, name: &str) -> StoreResult<usize> {
        let instance = self.require_instance(name)?;
        let rows = instance.truncate();
        info!(table = name, rows, "truncated table");
        Ok(rows)
    }

    /// Drop every table.
    pub fn clear(&self) -> usize {
        let dropped: Vec<TableEntry> = self.tables.write().drain().map(|(_, e)| e).collect();
        for entry in &dropped {
            entry.instance.truncate();
        }
        if !dropped.is_empty() {
            info!(tables = dropped.len(), "cleared catalog");
        }
        dropped.len()
    }
}
