//! esfeed-core — record building and day-partitioned batch indexing.
//!
//! This crate holds everything between a parsed CSV record and a store call,
//! plus the shared types used by the HTTP client and the binary.
//!
//! # Architecture
//!
//! ```text
//! raw fields ──► record::build ──► Event ──► Indexer ──► IndexStore
//!                                              │
//!                                              └──► Summary
//! ```
//!
//! The indexer owns its buffer and its store; nothing else touches either.

pub mod config;
pub mod error;
pub mod indexer;
pub mod record;
pub mod schema;
pub mod store;
pub mod types;

pub use error::{FormatError, IndexerError, StoreError};
pub use indexer::{day_index_name, Indexer, IndexerOptions};
pub use schema::IndexSettings;
pub use store::{IndexStore, MemoryStore, StoreCall};
pub use types::{Event, Summary};
