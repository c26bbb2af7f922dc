//! Store API - high-level interface for cellstore.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, trace};

use super::config::StoreConfig;
use crate::batch::{self, BatchGetRowRequest, BatchGetRowResponse, BatchWriteRowRequest, BatchWriteRowResponse};
use crate::catalog::{Catalog, TableDescription, TableMeta};
use crate::mutation::ColumnUpdate;
use crate::storage::{Column, PrimaryKey, Row, StoreError, StoreResult, TableInstance};

/// The main store handle.
///
/// `Send + Sync`; share it between threads behind an `Arc`.
#[derive(Debug, Default)]
pub struct TableStore {
    config: StoreConfig,
    catalog: Catalog,
}

impl TableStore {
    /// Create an empty store with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with custom configuration.
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config,
            catalog: Catalog::new(),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Register a new table.
    pub fn create_table(&self, meta: TableMeta) -> StoreResult<()> {
        self.catalog.create_table(meta)?;
        Ok(())
    }

    /// Drop a table and all its rows.
    pub fn delete_table(&self, table: &str) -> StoreResult<()> {
        self.catalog.delete_table(table)
    }

    /// Get a table's metadata, or `None` if it is not registered.
    pub fn table_meta(&self, table: &str) -> Option<Arc<TableMeta>> {
        self.catalog.table_meta(table)
    }

    /// Describe a registered table.
    pub fn describe_table(&self, table: &str) -> StoreResult<TableDescription> {
        self.catalog
            .describe_table(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))
    }

    /// List all table names, sorted.
    pub fn list_tables(&self) -> Vec<String> {
        self.catalog.list_tables()
    }

    /// Write `columns` as new versions of the row under `key`.
    pub fn put_row(&self, table: &str, key: PrimaryKey, columns: &[Column]) -> StoreResult<Arc<Row>> {
        let instance = self.catalog.require_instance(table)?;
        let row = instance.put_row(key, columns, self.config.clock.as_ref());
        self.trace_row(table, &row);
        Ok(row)
    }

    /// Apply `updates` in order to the row under `key`.
    ///
    /// `Ok(None)` means no row exists for `key`; nothing was stored.
    pub fn update_row(
        &self,
        table: &str,
        key: &PrimaryKey,
        updates: &[ColumnUpdate],
    ) -> StoreResult<Option<Arc<Row>>> {
        let instance = self.catalog.require_instance(table)?;
        let row = instance.update_row(key, updates, self.config.clock.as_ref());
        if let Some(row) = &row {
            self.trace_row(table, row);
        }
        Ok(row)
    }

    /// Read the row under `key`, all versions included.
    pub fn get_row(&self, table: &str, key: &PrimaryKey) -> StoreResult<Option<Arc<Row>>> {
        let row = self.catalog.require_instance(table)?.get_row(key);
        debug!(table, primary_key = %key, found = row.is_some(), "get row");
        Ok(row)
    }

    /// Apply a multi-table batch of row changes.
    pub fn batch_write_row(&self, request: &BatchWriteRowRequest) -> StoreResult<BatchWriteRowResponse> {
        let response = batch::batch_write_row(&self.catalog, self.config.clock.as_ref(), request)?;
        if self.config.dump_rows {
            for table in response.table_names() {
                for row in response.table_results(table).iter().filter_map(|r| r.row.as_ref()) {
                    self.trace_row(table, row);
                }
            }
        }
        Ok(response)
    }

    /// Read a multi-table batch of rows.
    pub fn batch_get_row(&self, request: &BatchGetRowRequest) -> StoreResult<BatchGetRowResponse> {
        batch::batch_get_row(&self.catalog, request)
    }

    /// Remove every row of a table, keeping the table registered.
    pub fn truncate_table(&self, table: &str) -> StoreResult<usize> {
        self.catalog.truncate_table(table)
    }

    /// Drop every table.
    pub fn clear(&self) -> usize {
        self.catalog.clear()
    }

    /// JSON snapshot of a whole table.
    pub fn dump_table(&self, table: &str) -> StoreResult<Value> {
        Ok(self.catalog.require_instance(table)?.dump())
    }

    /// Direct access to a table's row store.
    pub fn table_instance(&self, table: &str) -> Option<Arc<TableInstance>> {
        self.catalog.table_instance(table)
    }

    fn trace_row(&self, table: &str, row: &Row) {
        if !self.config.dump_rows {
            return;
        }
        match serde_json::to_string(row) {
            Ok(json) => trace!(table, row = %json, "row dump"),
            Err(e) => trace!(table, error = %e, "row dump failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::{RowPutChange, RowUpdateChange};
    use crate::catalog::PrimaryKeyType;
    use crate::mutation::{ManualClock, SystemClock};

    const CTS: &str = "cts_table";

    fn store() -> TableStore {
        let store = TableStore::new();
        store.create_table(meta()).unwrap();
        store
    }

    fn meta() -> TableMeta {
        TableMeta::new(CTS).with_primary_key_column("pk1", PrimaryKeyType::String)
    }

    fn key(v: &str) -> PrimaryKey {
        PrimaryKey::builder().add_column("pk1", v).build()
    }

    fn initial_columns() -> Vec<Column> {
        vec![
            Column::new("co1", true),
            Column::new("co2", "abbb"),
            Column::new("co3", 13445_i64),
        ]
    }

    #[test]
    fn test_create_table() {
        let store = store();
        assert_eq!(*store.table_meta(CTS).unwrap(), meta());
        assert_eq!(store.list_tables(), vec![CTS]);
    }

    #[test]
    fn test_create_table_when_table_exists() {
        let store = store();
        let err = store.create_table(meta()).unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn test_delete_table() {
        let store = store();
        store.delete_table(CTS).unwrap();
        assert!(store.table_meta(CTS).is_none());

        let err = store.delete_table(CTS).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_any_table_name_is_accepted() {
        let store = TableStore::new();
        for name in ["my-table", "1st", "users/admin", "表"] {
            store.create_table(TableMeta::new(name)).unwrap();
            store.put_row(name, key("aa"), &[Column::new("c", true)]).unwrap();
            assert!(store.get_row(name, &key("aa")).unwrap().is_some());
        }
        assert_eq!(store.list_tables().len(), 4);

        // only the existence check applies
        let err = store.create_table(TableMeta::new("my-table")).unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn test_row_ops_on_missing_table() {
        let store = TableStore::new();
        assert!(store.put_row("nope", key("aa"), &initial_columns()).unwrap_err().is_not_found());
        assert!(store.update_row("nope", &key("aa"), &[]).unwrap_err().is_not_found());
        assert!(store.get_row("nope", &key("aa")).unwrap_err().is_not_found());
        assert!(store.describe_table("nope").unwrap_err().is_not_found());
        assert!(store.dump_table("nope").unwrap_err().is_not_found());
    }

    #[test]
    fn test_put_creates_row() {
        let store = store();
        store.put_row(CTS, key("aa"), &initial_columns()).unwrap();

        let row = store.get_row(CTS, &key("aa")).unwrap().unwrap();
        assert_eq!(row.len(), 3);
        assert_eq!(row.latest_column("co1").unwrap().value.as_bool(), Some(true));
        assert_eq!(row.latest_column("co2").unwrap().value.as_str(), Some("abbb"));
        assert_eq!(row.latest_column("co3").unwrap().value.as_i64(), Some(13445));
        assert!(row.columns().iter().all(Column::has_timestamp));
    }

    #[test]
    fn test_put_preserves_supplied_timestamp() {
        let store = store();
        let row = store
            .put_row(CTS, key("aa"), &[Column::with_timestamp("co2", "abbb", 12345)])
            .unwrap();
        assert_eq!(row.latest_column("co2").unwrap().timestamp, Some(12345));
    }

    #[test]
    fn test_put_again_appends_version() {
        let store = store();
        let first = store.put_row(CTS, key("aa"), &initial_columns()).unwrap();
        let old_ts = first.latest_column("co3").unwrap().timestamp.unwrap();

        store.put_row(CTS, key("aa"), &[Column::new("co3", "aaaEx")]).unwrap();

        let row = store.get_row(CTS, &key("aa")).unwrap().unwrap();
        assert_eq!(row.latest_column("co1").unwrap().value.as_bool(), Some(true));
        assert_eq!(row.latest_column("co2").unwrap().value.as_str(), Some("abbb"));
        assert_eq!(row.latest_column("co3").unwrap().value.as_str(), Some("aaaEx"));
        assert_eq!(row.get_column("co3").len(), 2);
        assert_eq!(
            row.get_column_version("co3", old_ts).unwrap().value.as_i64(),
            Some(13445)
        );
    }

    #[test]
    fn test_full_scenario() {
        let store = store();
        store.put_row(CTS, key("aa"), &initial_columns()).unwrap();
        store.put_row(CTS, key("aa"), &[Column::new("co3", "aaaEx")]).unwrap();

        let co2_ts = store
            .get_row(CTS, &key("aa"))
            .unwrap()
            .unwrap()
            .latest_column("co2")
            .unwrap()
            .timestamp
            .unwrap();

        let updates = [
            ColumnUpdate::delete_all("co1"),
            ColumnUpdate::delete("co2", co2_ts),
            ColumnUpdate::put(Column::new("co3", "siemens")),
        ];
        store.update_row(CTS, &key("aa"), &updates).unwrap().unwrap();

        let row = store.get_row(CTS, &key("aa")).unwrap().unwrap();
        assert_eq!(row.column_names(), vec!["co3"]);
        assert_eq!(row.latest_column("co3").unwrap().value.as_str(), Some("siemens"));
        assert!(row.latest_column("co1").is_none());
        assert!(row.get_column("co2").is_empty());
    }

    #[test]
    fn test_update_row() {
        let store = store();
        let co2_ts = 777;
        store
            .put_row(
                CTS,
                key("aa"),
                &[
                    Column::new("co1", true),
                    Column::with_timestamp("co2", "abbb", co2_ts),
                    Column::new("co3", 13445_i64),
                ],
            )
            .unwrap();

        let change = RowUpdateChange::new(CTS, key("aa"))
            .delete_columns("co1")
            .delete_column("co2", co2_ts)
            .put(Column::new("co3", "siemens"));
        store.update_row(CTS, &change.primary_key, &change.updates).unwrap();

        let row = store.get_row(CTS, &key("aa")).unwrap().unwrap();
        assert_eq!(row.len(), 1);
        assert!(row.latest_column("co1").is_none());
        assert!(row.get_column("co2").is_empty());
        assert_eq!(row.latest_column("co3").unwrap().value.as_str(), Some("siemens"));
    }

    #[test]
    fn test_update_row_with_version() {
        let store = store();
        let ts = 4242;
        store
            .put_row(
                CTS,
                key("aa"),
                &[
                    Column::new("co1", true),
                    Column::with_timestamp("co2", "abbb", ts),
                    Column::new("co3", 13445_i64),
                ],
            )
            .unwrap();

        let updates = [ColumnUpdate::put(Column::with_timestamp("co2", "siemens", ts))];
        store.update_row(CTS, &key("aa"), &updates).unwrap();

        let row = store.get_row(CTS, &key("aa")).unwrap().unwrap();
        assert_eq!(row.latest_column("co1").unwrap().value.as_bool(), Some(true));
        assert_eq!(row.latest_column("co2").unwrap().value.as_str(), Some("siemens"));
        assert_eq!(row.get_column("co2").len(), 1);
        assert_eq!(row.latest_column("co3").unwrap().value.as_i64(), Some(13445));
    }

    #[test]
    fn test_update_replaces_latest_even_with_future_versions() {
        let store = store();
        let t1 = chrono::Utc::now().timestamp_nanos_opt().unwrap() + 3_600_000_000_000;
        let t2 = t1 + 1;
        store
            .put_row(
                CTS,
                key("aa"),
                &[Column::with_timestamp("x", "v1", t1), Column::with_timestamp("x", "v2", t2)],
            )
            .unwrap();

        let row = store
            .update_row(CTS, &key("aa"), &[ColumnUpdate::put(Column::new("x", "new"))])
            .unwrap()
            .unwrap();

        let latest = row.latest_column("x").unwrap();
        assert_eq!(latest.value.as_str(), Some("new"));
        assert!(latest.timestamp.unwrap() > t2);
        assert!(row.get_column_version("x", t2).is_none());
        assert_eq!(row.get_column_version("x", t1).unwrap().value.as_str(), Some("v1"));
    }

    #[test]
    fn test_update_missing_row_is_absent() {
        let store = store();
        let result = store
            .update_row(CTS, &key("ghost"), &[ColumnUpdate::put(Column::new("c", 1_i64))])
            .unwrap();
        assert!(result.is_none());
        assert!(store.get_row(CTS, &key("ghost")).unwrap().is_none());
    }

    #[test]
    fn test_manual_clock_timestamps() {
        let clock = Arc::new(ManualClock::starting_at(1000));
        let store = TableStore::with_config(StoreConfig::new().clock(clock.clone()));
        store.create_table(meta()).unwrap();

        let row = store.put_row(CTS, key("aa"), &initial_columns()).unwrap();
        assert!(row.columns().iter().all(|c| c.timestamp == Some(1000)));

        let row = store
            .update_row(CTS, &key("aa"), &[ColumnUpdate::put(Column::new("co1", false))])
            .unwrap()
            .unwrap();
        assert_eq!(row.latest_column("co1").unwrap().timestamp, Some(1001));
        assert_eq!(clock.peek(), 1002);
    }

    #[test]
    fn test_batch_put_row_and_response() {
        let store = store();

        let mut write = BatchWriteRowRequest::new();
        write
            .add_row_change(RowPutChange::new(CTS, key("aa")).add_columns([
                Column::new("co0", true),
                Column::new("co1", "a"),
                Column::new("co2", 1_i64),
            ]))
            .add_row_change(RowPutChange::new(CTS, key("bb")).add_columns([
                Column::new("co0", false),
                Column::new("co1", "b"),
                Column::new("co2", 2_i64),
            ]));
        let written = store.batch_write_row(&write).unwrap();
        assert_eq!(written.table_results(CTS).len(), 2);

        let mut get = BatchGetRowRequest::new();
        get.add_row(CTS, key("aa")).add_row(CTS, key("bb"));
        let response = store.batch_get_row(&get).unwrap();

        let results = response.table_results(CTS);
        assert_eq!(results.len(), 2);
        let first = results[0].row.as_ref().unwrap();
        let second = results[1].row.as_ref().unwrap();
        assert_eq!(first.latest_column("co0").unwrap().value.as_bool(), Some(true));
        assert_eq!(first.latest_column("co1").unwrap().value.as_str(), Some("a"));
        assert_eq!(second.latest_column("co0").unwrap().value.as_bool(), Some(false));
        assert_eq!(second.latest_column("co2").unwrap().value.as_i64(), Some(2));
    }

    #[test]
    fn test_dump_rows_does_not_change_results() {
        let store = TableStore::with_config(StoreConfig::new().dump_rows(true));
        store.create_table(meta()).unwrap();

        let row = store.put_row(CTS, key("aa"), &initial_columns()).unwrap();
        assert_eq!(row.len(), 3);

        let dump = store.dump_table(CTS).unwrap();
        assert_eq!(dump["table"], CTS);
        assert_eq!(dump["rows"][0]["columns"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn test_truncate_describe_clear() {
        let store = store();
        store.put_row(CTS, key("aa"), &initial_columns()).unwrap();
        assert_eq!(store.describe_table(CTS).unwrap().row_count, 1);

        assert_eq!(store.truncate_table(CTS).unwrap(), 1);
        assert_eq!(store.describe_table(CTS).unwrap().row_count, 0);

        assert_eq!(store.clear(), 1);
        assert!(store.list_tables().is_empty());
    }

    #[test]
    fn test_concurrent_writers_across_tables() {
        let store = Arc::new(TableStore::with_config(
            StoreConfig::new().clock(Arc::new(SystemClock::new())),
        ));
        for name in ["left", "right"] {
            store.create_table(TableMeta::new(name)).unwrap();
        }

        std::thread::scope(|s| {
            for t in 0..6_i64 {
                let store = Arc::clone(&store);
                s.spawn(move || {
                    let table = if t % 2 == 0 { "left" } else { "right" };
                    for i in 0..100_i64 {
                        store
                            .put_row(table, key("shared"), &[Column::new("n", t * 100 + i)])
                            .unwrap();
                    }
                });
            }
        });

        for name in ["left", "right"] {
            let row = store.get_row(name, &key("shared")).unwrap().unwrap();
            assert_eq!(row.get_column("n").len(), 300);
        }
    }
}
