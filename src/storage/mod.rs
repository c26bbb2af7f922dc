//! storage layer for cellstore
//!
//! Value types for keys and cells, the per-table versioned row store, and
//! the crate-wide error type.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TableInstance                          │
//! │        (PrimaryKey -> Arc<Row>, guarded by an RwLock)       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!               ┌──────────────┴──────────────┐
//!               ▼                             ▼
//!        ┌─────────────┐               ┌─────────────┐
//!        │    types    │               │    cell     │
//!        │   (keys)    │               │(Column, Row)│
//!        └─────────────┘               └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use cellstore::mutation::SystemClock;
//! use cellstore::storage::{Column, PrimaryKey, TableInstance};
//!
//! let table = TableInstance::new("users");
//! let clock = SystemClock::new();
//! let key = PrimaryKey::builder().add_column("id", "alice").build();
//!
//! table.put_row(key.clone(), &[Column::new("age", 30_i64)], &clock);
//! let row = table.get_row(&key).unwrap();
//! assert_eq!(row.latest_column("age").unwrap().value.as_i64(), Some(30));
//! ```

mod cell;
mod error;
mod instance;
mod types;

pub use cell::{Column, ColumnValue, Row};
pub use error::{StoreError, StoreResult};
pub use instance::TableInstance;
pub use types::{PrimaryKey, PrimaryKeyBuilder, PrimaryKeyColumn, PrimaryKeyType, PrimaryKeyValue};
