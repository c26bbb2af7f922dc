//! Catalog module for table management.
//!
//! The catalog registers table metadata and owns the lifecycle of each
//! table's row store: both are created together and dropped together.

mod manager;
mod meta;

pub use manager::Catalog;
pub use meta::{PrimaryKeySchema, TableDescription, TableMeta};
pub use crate::storage::PrimaryKeyType;
