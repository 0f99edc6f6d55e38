//! Domain-specific assertions for esfeed harnesses.
//!
//! These add context-rich failure messages that make it clear *which*
//! batching invariant was violated and *where* in the call sequence.

use esfeed_core::{day_index_name, MemoryStore, StoreCall};

/// Assert that every bulk call only carries events of the index it targets.
///
/// Each id is looked up in the store and its day derived from the stored
/// timestamp, so this holds for events from any source.
pub fn assert_bulks_are_single_day(store: &MemoryStore, prefix: &str) {
    for (n, call) in store.calls().iter().enumerate() {
        if let StoreCall::Bulk { index, ids } = call {
            for id in ids {
                let doc = store
                    .document(index, id)
                    .unwrap_or_else(|| panic!("bulk call #{n} to {index}: {id:?} was not stored"));
                let expected = day_index_name(prefix, &doc.timestamp);
                assert_eq!(
                    &expected, index,
                    "bulk call #{n} to {index} carried {id:?} ({}), which belongs to {expected}",
                    doc.timestamp
                );
            }
        }
    }
}

/// Assert that every bulk call to an index comes after that index was created
/// and mapped, with no other index set up in between.
pub fn assert_setup_precedes_writes(store: &MemoryStore) {
    let mut current: Option<&str> = None;
    let mut mapped = false;
    for (n, call) in store.calls().iter().enumerate() {
        match call {
            StoreCall::CreateIndex { index } => {
                current = Some(index.as_str());
                mapped = false;
            }
            StoreCall::PutMapping { index } => {
                assert_eq!(
                    current,
                    Some(index.as_str()),
                    "mapping call #{n} for {index} without a preceding create"
                );
                mapped = true;
            }
            StoreCall::Bulk { index, .. } => {
                assert_eq!(
                    current,
                    Some(index.as_str()),
                    "bulk call #{n} to {index} while {current:?} was the last index set up"
                );
                assert!(mapped, "bulk call #{n} to {index} before its mapping");
            }
        }
    }
}

/// Number of create calls made for `index`.
pub fn create_calls(store: &MemoryStore, index: &str) -> usize {
    store
        .calls()
        .iter()
        .filter(|c| matches!(c, StoreCall::CreateIndex { index: i } if i == index))
        .count()
}

/// Sizes of the bulk calls made against `index`, in order.
pub fn bulk_sizes(store: &MemoryStore, index: &str) -> Vec<usize> {
    store
        .calls()
        .iter()
        .filter_map(|c| match c {
            StoreCall::Bulk { index: i, ids } if i == index => Some(ids.len()),
            _ => None,
        })
        .collect()
}
