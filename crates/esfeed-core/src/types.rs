//! Core types for esfeed-core.
//!
//! This module defines the data structures shared across the pipeline: the
//! normalised [`Event`] produced by the record builder, and the [`Summary`]
//! reported by the indexer at end of stream.

use serde::Serialize;

/// A normalised log event, ready to be written as one search document.
///
/// Field order and key names match the document layout stored in the index;
/// `timestamp` is written under the Logstash-style `@timestamp` key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Event {
    /// Hex SHA-256 of the raw input fields. Identical raw lines share an id,
    /// so re-submitting them overwrites rather than duplicates.
    pub id: String,
    /// Short categorical status, copied verbatim.
    pub status: String,
    /// `YYYY-MM-DDTHH:MM:SS`.
    #[serde(rename = "@timestamp")]
    pub timestamp: String,
    /// Time-of-day counter with separators and the millisecond suffix
    /// removed. Serialised as `null` when the source field was empty.
    pub time: Option<i64>,
    pub location: String,
    pub desc: String,
}

/// Counters accumulated by the indexer over one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Documents acknowledged by the store.
    pub documents: usize,
    /// Bulk-write calls that succeeded.
    pub batches: usize,
    /// Index names activated, in activation order. A day revisited after an
    /// interleaving day appears twice.
    pub indices: Vec<String>,
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} documents in {} batches across {} index activations",
            self.documents,
            self.batches,
            self.indices.len()
        )
    }
}
