//! High-level store API.
//!
//! [`TableStore`] ties the catalog, the mutation engine and the batch
//! orchestrator together behind one handle; [`SyncClient`] is the
//! request-shaped interface it also implements.

mod api;
mod client;
mod config;

pub use api::TableStore;
pub use client::SyncClient;
pub use config::StoreConfig;
