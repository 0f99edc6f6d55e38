//! Batching indexer: maps a stream of events onto day-partitioned bulk
//! writes.
//!
//! Each event is routed to `prefix + YYYY.MM.DD` of its own timestamp, not
//! of the wall clock. The indexer keeps one active index at a time:
//!
//! ```text
//! Uninitialized ──first event──► Active(day A) ──event for day B──► Active(day B)
//! ```
//!
//! On every switch the pending buffer is flushed to the old index, then the
//! new index is created (an existing index is fine) and its mapping applied.
//! Interleaved days therefore cost one flush and one setup per switch; there
//! is no per-day buffering.

use crate::error::IndexerError;
use crate::schema::{log_mapping, IndexSettings};
use crate::store::IndexStore;
use crate::types::{Event, Summary};

/// Default prefix for day index names.
pub const DEFAULT_PREFIX: &str = "logstash-";
/// Default number of buffered events that triggers a flush.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Tunables for an [`Indexer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexerOptions {
    pub prefix: String,
    /// Must be at least 1.
    pub batch_size: usize,
    pub settings: IndexSettings,
    pub document_type: Option<String>,
}

impl Default for IndexerOptions {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            settings: IndexSettings::default(),
            document_type: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Uninitialized,
    Active(String),
}

/// Index name for an ISO timestamp: `prefix` followed by `YYYY.MM.DD`.
pub fn day_index_name(prefix: &str, timestamp: &str) -> String {
    let day = timestamp.get(..10).unwrap_or(timestamp);
    format!("{prefix}{}", day.replace('-', "."))
}

/// Buffers events and writes them through an [`IndexStore`].
///
/// Not reentrant; one indexer per run.
pub struct Indexer<S> {
    store: S,
    options: IndexerOptions,
    state: State,
    buffer: Vec<Event>,
    summary: Summary,
}

impl<S: IndexStore> Indexer<S> {
    pub fn new(store: S, options: IndexerOptions) -> Self {
        let batch_size = options.batch_size.max(1);
        Self {
            store,
            buffer: Vec::with_capacity(batch_size),
            options: IndexerOptions {
                batch_size,
                ..options
            },
            state: State::Uninitialized,
            summary: Summary::default(),
        }
    }

    /// Queue `event`, switching day index and flushing as needed.
    pub async fn index(&mut self, event: Event) -> Result<(), IndexerError> {
        let name = day_index_name(&self.options.prefix, &event.timestamp);

        if self.active_index() != Some(name.as_str()) {
            self.flush().await?;
            tracing::debug!(
                from = ?self.active_index(),
                to = %name,
                "day index transition"
            );
            self.prepare_index(&name).await?;
            self.summary.indices.push(name.clone());
            self.state = State::Active(name);
        }

        self.buffer.push(event);
        if self.buffer.len() >= self.options.batch_size {
            self.flush().await?;
        }
        Ok(())
    }

    /// Write the buffer to the active index in one bulk call.
    ///
    /// The buffer is cleared only when the write succeeds; after a failure
    /// the same documents are sent again by the next flush.
    pub async fn flush(&mut self) -> Result<(), IndexerError> {
        let State::Active(index) = &self.state else {
            return Ok(());
        };
        if self.buffer.is_empty() {
            return Ok(());
        }

        let count = self.buffer.len();
        self.store
            .bulk_index(index, self.options.document_type.as_deref(), &self.buffer)
            .await
            .map_err(|source| IndexerError::IndexStore {
                index: index.clone(),
                count,
                source,
            })?;

        tracing::debug!(index = %index, count, "flushed batch");
        self.summary.documents += count;
        self.summary.batches += 1;
        self.buffer.clear();
        Ok(())
    }

    /// Flush what is left and report the run totals.
    pub async fn finish(mut self) -> Result<Summary, IndexerError> {
        self.flush().await?;
        Ok(self.summary)
    }

    pub fn active_index(&self) -> Option<&str> {
        match &self.state {
            State::Uninitialized => None,
            State::Active(name) => Some(name),
        }
    }

    /// Events waiting for the next flush, in arrival order.
    pub fn buffered(&self) -> &[Event] {
        &self.buffer
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn options(&self) -> &IndexerOptions {
        &self.options
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    async fn prepare_index(&mut self, name: &str) -> Result<(), IndexerError> {
        match self.store.create_index(name, &self.options.settings).await {
            Ok(()) => tracing::debug!(index = %name, "created index"),
            Err(e) if e.is_already_exists() => {
                tracing::debug!(index = %name, "index already exists")
            }
            Err(source) => {
                return Err(IndexerError::IndexCreation {
                    index: name.to_string(),
                    source,
                })
            }
        }

        self.store
            .put_mapping(name, self.options.document_type.as_deref(), &log_mapping())
            .await
            .map_err(|source| IndexerError::Mapping {
                index: name.to_string(),
                source,
            })
    }
}
