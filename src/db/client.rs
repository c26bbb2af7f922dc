//! Synchronous client interface.
//!
//! Application code written against [`SyncClient`] can run on a
//! [`TableStore`] in place of a remote table service.

use std::sync::Arc;

use super::api::TableStore;
use crate::batch::{
    BatchGetRowRequest, BatchGetRowResponse, BatchWriteRowRequest, BatchWriteRowResponse,
    RowPutChange, RowUpdateChange,
};
use crate::catalog::TableMeta;
use crate::storage::{PrimaryKey, Row, StoreResult};

/// The request-shaped operations of a synchronous table client.
pub trait SyncClient: Send + Sync {
    fn create_table(&self, meta: TableMeta) -> StoreResult<()>;

    fn delete_table(&self, table_name: &str) -> StoreResult<()>;

    fn put_row(&self, change: &RowPutChange) -> StoreResult<Arc<Row>>;

    /// `Ok(None)` when the target row does not exist.
    fn update_row(&self, change: &RowUpdateChange) -> StoreResult<Option<Arc<Row>>>;

    fn get_row(&self, table_name: &str, primary_key: &PrimaryKey) -> StoreResult<Option<Arc<Row>>>;

    fn batch_write_row(&self, request: &BatchWriteRowRequest) -> StoreResult<BatchWriteRowResponse>;

    fn batch_get_row(&self, request: &BatchGetRowRequest) -> StoreResult<BatchGetRowResponse>;
}

impl SyncClient for TableStore {
    fn create_table(&self, meta: TableMeta) -> StoreResult<()> {
        TableStore::create_table(self, meta)
    }

    fn delete_table(&self, table_name: &str) -> StoreResult<()> {
        TableStore::delete_table(self, table_name)
    }

    fn put_row(&self, change: &RowPutChange) -> StoreResult<Arc<Row>> {
        TableStore::put_row(
            self,
            &change.table_name,
            change.primary_key.clone(),
            &change.columns,
        )
    }

    fn update_row(&self, change: &RowUpdateChange) -> StoreResult<Option<Arc<Row>>> {
        TableStore::update_row(self, &change.table_name, &change.primary_key, &change.updates)
    }

    fn get_row(&self, table_name: &str, primary_key: &PrimaryKey) -> StoreResult<Option<Arc<Row>>> {
        TableStore::get_row(self, table_name, primary_key)
    }

    fn batch_write_row(&self, request: &BatchWriteRowRequest) -> StoreResult<BatchWriteRowResponse> {
        TableStore::batch_write_row(self, request)
    }

    fn batch_get_row(&self, request: &BatchGetRowRequest) -> StoreResult<BatchGetRowResponse> {
        TableStore::batch_get_row(self, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PrimaryKeyType;
    use crate::storage::Column;

    const CTS: &str = "cts_table";

    fn key() -> PrimaryKey {
        PrimaryKey::builder().add_column("pk1", "aa").build()
    }

    fn client() -> Arc<dyn SyncClient> {
        Arc::new(TableStore::new())
    }

    #[test]
    fn test_client_round_trip() {
        let client = client();
        client
            .create_table(TableMeta::new(CTS).with_primary_key_column("pk1", PrimaryKeyType::String))
            .unwrap();

        let put = RowPutChange::new(CTS, key())
            .add_column(Column::new("co1", true))
            .add_column(Column::new("co3", 13445_i64));
        client.put_row(&put).unwrap();

        let update = RowUpdateChange::new(CTS, key()).delete_columns("co1");
        let row = client.update_row(&update).unwrap().unwrap();
        assert_eq!(row.column_names(), vec!["co3"]);

        let row = client.get_row(CTS, &key()).unwrap().unwrap();
        assert!(row.get_column("co1").is_empty());

        client.delete_table(CTS).unwrap();
        assert!(client.get_row(CTS, &key()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_client_errors() {
        let client = client();
        let meta = TableMeta::new(CTS);
        client.create_table(meta.clone()).unwrap();
        assert!(client.create_table(meta).unwrap_err().is_conflict());
        assert!(client.delete_table("missing").unwrap_err().is_not_found());
    }

    #[test]
    fn test_client_batch() {
        let client = client();
        client.create_table(TableMeta::new(CTS)).unwrap();

        let mut write = BatchWriteRowRequest::new();
        write.add_row_change(RowPutChange::new(CTS, key()).add_column(Column::new("c", 1_i64)));
        assert_eq!(client.batch_write_row(&write).unwrap().len(), 1);

        let mut get = BatchGetRowRequest::new();
        get.add_row(CTS, key());
        let response = client.batch_get_row(&get).unwrap();
        assert!(response.table_results(CTS)[0].has_row());
    }
}
