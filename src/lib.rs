//! esfeed — bulk-load CSV log lines into day-partitioned Elasticsearch indices.
//!
//! The workspace is split by layer so that integration tests can import each
//! one directly:
//!
//! ```text
//! stdin ──► pipeline (csv) ──► esfeed_core::record ──► esfeed_core::Indexer
//!                                                          │
//!                                     esfeed_elastic::ElasticStore / MemoryStore
//! ```
//!
//! Everything runs on one task; the indexer is driven record by record.

pub mod pipeline;

pub use pipeline::{load, LoadError};
