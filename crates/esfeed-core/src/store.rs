//! Store: the capability the indexer writes through.
//!
//! [`IndexStore`] is the seam between the batching indexer and whatever holds
//! the documents. `esfeed-elastic` provides the HTTP implementation;
//! [`MemoryStore`] keeps everything in-process for dry runs and tests.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use crate::error::StoreError;
use crate::schema::IndexSettings;
use crate::types::Event;

/// Operations the indexer needs from a search index service.
///
/// `document_type` is `Some` for clusters that still use mapping types and
/// `None` for typeless clusters.
#[allow(async_fn_in_trait)]
pub trait IndexStore {
    /// Create `name`. An index that already exists must be reported as
    /// [`StoreError::AlreadyExists`] so callers can tell it apart.
    async fn create_index(&mut self, name: &str, settings: &IndexSettings)
        -> Result<(), StoreError>;

    /// Apply `schema` to `name`. Repeating the call with the same schema
    /// must succeed.
    async fn put_mapping(
        &mut self,
        name: &str,
        document_type: Option<&str>,
        schema: &Value,
    ) -> Result<(), StoreError>;

    /// Write `documents` to `name` in one call.
    async fn bulk_index(
        &mut self,
        name: &str,
        document_type: Option<&str>,
        documents: &[Event],
    ) -> Result<(), StoreError>;
}

impl<S: IndexStore> IndexStore for &mut S {
    async fn create_index(
        &mut self,
        name: &str,
        settings: &IndexSettings,
    ) -> Result<(), StoreError> {
        (**self).create_index(name, settings).await
    }

    async fn put_mapping(
        &mut self,
        name: &str,
        document_type: Option<&str>,
        schema: &Value,
    ) -> Result<(), StoreError> {
        (**self).put_mapping(name, document_type, schema).await
    }

    async fn bulk_index(
        &mut self,
        name: &str,
        document_type: Option<&str>,
        documents: &[Event],
    ) -> Result<(), StoreError> {
        (**self).bulk_index(name, document_type, documents).await
    }
}

/// One call observed by a [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    CreateIndex { index: String },
    PutMapping { index: String },
    Bulk { index: String, ids: Vec<String> },
}

/// In-process [`IndexStore`] that records every call.
///
/// Documents are keyed by id within each index, so writing the same event
/// twice leaves one copy, as an id-deduplicating store would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    calls: Vec<StoreCall>,
    indices: BTreeSet<String>,
    mappings: BTreeMap<String, Value>,
    documents: BTreeMap<String, BTreeMap<String, Event>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> &[StoreCall] {
        &self.calls
    }

    /// Names of created indices.
    pub fn indices(&self) -> impl Iterator<Item = &str> {
        self.indices.iter().map(String::as_str)
    }

    pub fn mapping(&self, index: &str) -> Option<&Value> {
        self.mappings.get(index)
    }

    /// Stored documents of `index`, ordered by id.
    pub fn documents(&self, index: &str) -> Vec<&Event> {
        self.documents
            .get(index)
            .map(|docs| docs.values().collect())
            .unwrap_or_default()
    }

    pub fn document(&self, index: &str, id: &str) -> Option<&Event> {
        self.documents.get(index).and_then(|docs| docs.get(id))
    }

    /// Number of bulk calls made against `index`.
    pub fn bulk_calls(&self, index: &str) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, StoreCall::Bulk { index: i, .. } if i == index))
            .count()
    }
}

impl IndexStore for MemoryStore {
    async fn create_index(
        &mut self,
        name: &str,
        _settings: &IndexSettings,
    ) -> Result<(), StoreError> {
        self.calls.push(StoreCall::CreateIndex {
            index: name.to_string(),
        });
        if !self.indices.insert(name.to_string()) {
            return Err(StoreError::AlreadyExists {
                index: name.to_string(),
            });
        }
        Ok(())
    }

    async fn put_mapping(
        &mut self,
        name: &str,
        _document_type: Option<&str>,
        schema: &Value,
    ) -> Result<(), StoreError> {
        self.calls.push(StoreCall::PutMapping {
            index: name.to_string(),
        });
        if !self.indices.contains(name) {
            return Err(StoreError::Rejected {
                status: 404,
                reason: format!("no such index [{name}]"),
            });
        }
        self.mappings.insert(name.to_string(), schema.clone());
        Ok(())
    }

    async fn bulk_index(
        &mut self,
        name: &str,
        _document_type: Option<&str>,
        documents: &[Event],
    ) -> Result<(), StoreError> {
        self.calls.push(StoreCall::Bulk {
            index: name.to_string(),
            ids: documents.iter().map(|d| d.id.clone()).collect(),
        });
        let stored = self.documents.entry(name.to_string()).or_default();
        for doc in documents {
            stored.insert(doc.id.clone(), doc.clone());
        }
        Ok(())
    }
}
