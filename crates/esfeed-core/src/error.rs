//! Error types for the record builder, the index store and the indexer.

use std::time::Duration;

/// A raw record could not be turned into an [`Event`](crate::Event).
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("timestamp {value:?} does not match DD/MM/YYYY HH:MM:SS")]
    Timestamp {
        value: String,
        /// `None` when the value was rejected before parsing.
        #[source]
        source: Option<chrono::ParseError>,
    },

    #[error("time {value:?} is not a dotted integer with a three-digit suffix")]
    Time { value: String },
}

/// A call to the index store failed.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Index creation hit an index that is already there.
    #[error("index {index} already exists")]
    AlreadyExists { index: String },

    /// The store answered with a failure status.
    #[error("store rejected request with status {status}: {reason}")]
    Rejected { status: u16, reason: String },

    /// The bulk call went through but some documents were refused.
    #[error("{failed} of {total} documents rejected: {reason}")]
    BulkRejected {
        failed: usize,
        total: usize,
        reason: String,
    },

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid store url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("transport error")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("unreadable store response")]
    InvalidResponse(#[from] serde_json::Error),
}

impl StoreError {
    pub fn is_already_exists(&self) -> bool {
        matches!(self, StoreError::AlreadyExists { .. })
    }
}

/// The indexer could not complete an index setup or a bulk write.
#[derive(Debug, thiserror::Error)]
pub enum IndexerError {
    #[error("failed to create index {index}")]
    IndexCreation {
        index: String,
        #[source]
        source: StoreError,
    },

    #[error("failed to apply mapping to index {index}")]
    Mapping {
        index: String,
        #[source]
        source: StoreError,
    },

    /// The buffered documents are still held by the indexer.
    #[error("bulk write of {count} documents to {index} failed")]
    IndexStore {
        index: String,
        count: usize,
        #[source]
        source: StoreError,
    },
}
