//! cellstore - an in-process, multi-version column-family store
//!
//! Tables hold rows keyed by a composite primary key. Every cell carries a
//! name, a typed value and a version timestamp, and a column name may hold
//! many versions in one row. Writes never lose versions under concurrent
//! callers: each PUT or UPDATE swaps in a fresh immutable row under the
//! table's write lock.
//!
//! # Example
//!
//! ```
//! use cellstore::catalog::{PrimaryKeyType, TableMeta};
//! use cellstore::db::TableStore;
//! use cellstore::mutation::ColumnUpdate;
//! use cellstore::storage::{Column, PrimaryKey};
//!
//! let store = TableStore::new();
//! store
//!     .create_table(TableMeta::new("users").with_primary_key_column("id", PrimaryKeyType::String))
//!     .unwrap();
//!
//! let key = PrimaryKey::builder().add_column("id", "alice").build();
//! store.put_row("users", key.clone(), &[Column::new("age", 30_i64)]).unwrap();
//! store.put_row("users", key.clone(), &[Column::new("age", 31_i64)]).unwrap();
//!
//! let row = store.get_row("users", &key).unwrap().unwrap();
//! assert_eq!(row.get_column("age").len(), 2);
//!
//! store.update_row("users", &key, &[ColumnUpdate::delete_all("age")]).unwrap();
//! assert!(store.get_row("users", &key).unwrap().unwrap().is_empty());
//! ```

pub mod batch;
pub mod catalog;
pub mod db;
pub mod mutation;
pub mod storage;
