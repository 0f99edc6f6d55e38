//! Test builders — ergonomic constructors for `Event`s, raw rows and indexers.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use esfeed_core::{Event, IndexStore, Indexer, IndexerOptions, MemoryStore};

// ---------------------------------------------------------------------------
// EventBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Event`] fixtures.
///
/// # Example
///
/// ```rust
/// let event = EventBuilder::new("2020-03-01T10:15:30")
///     .id("a")
///     .status("FAIL")
///     .time(10150)
///     .build();
/// ```
pub struct EventBuilder {
    id: String,
    status: String,
    timestamp: String,
    time: Option<i64>,
    location: String,
    desc: String,
}

impl EventBuilder {
    pub fn new(timestamp: impl Into<String>) -> Self {
        let timestamp = timestamp.into();
        Self {
            id: format!("id-{timestamp}"),
            status: "OK".to_string(),
            timestamp,
            time: None,
            location: "front".to_string(),
            desc: "door open".to_string(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn time(mut self, time: i64) -> Self {
        self.time = Some(time);
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = desc.into();
        self
    }

    pub fn build(self) -> Event {
        Event {
            id: self.id,
            status: self.status,
            timestamp: self.timestamp,
            time: self.time,
            location: self.location,
            desc: self.desc,
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// `n` events on `day` (`YYYY-MM-DD`), one second apart, with readable ids
/// `{day}#{i}`.
pub fn day_events(day: &str, n: usize) -> Vec<Event> {
    (0..n)
        .map(|i| {
            EventBuilder::new(format!(
                "{day}T{:02}:{:02}:{:02}",
                i / 3600 % 24,
                i / 60 % 60,
                i % 60
            ))
            .id(format!("{day}#{i}"))
            .time(i as i64)
            .build()
        })
        .collect()
}

/// An indexer over a fresh [`MemoryStore`] with the default prefix.
pub fn memory_indexer(batch_size: usize) -> Indexer<MemoryStore> {
    indexer_over(MemoryStore::new(), batch_size)
}

pub fn indexer_over<S: IndexStore>(store: S, batch_size: usize) -> Indexer<S> {
    Indexer::new(
        store,
        IndexerOptions {
            batch_size,
            ..IndexerOptions::default()
        },
    )
}

/// Index every event, panicking on the first error.
pub async fn index_all<S: IndexStore>(indexer: &mut Indexer<S>, events: Vec<Event>) {
    for event in events {
        indexer.index(event).await.expect("index");
    }
}

/// Render a raw CSV line from the five source fields.
pub fn csv_line(status: &str, timestamp: &str, time: &str, desc: &str, location: &str) -> String {
    format!("{status},{timestamp},{time},{desc},{location}\n")
}
