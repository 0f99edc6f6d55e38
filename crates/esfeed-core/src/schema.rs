//! Index settings and field mapping applied to every day index.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Settings sent when an index is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSettings {
    pub number_of_shards: u32,
    pub number_of_replicas: u32,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            number_of_shards: 1,
            number_of_replicas: 0,
        }
    }
}

impl IndexSettings {
    /// Request body for index creation.
    pub fn to_body(&self) -> Value {
        json!({ "settings": self })
    }
}

/// Exact-match string field with norms off and a `raw` sub-field for
/// aggregations.
fn exact_match() -> Value {
    json!({
        "type": "keyword",
        "norms": false,
        "fields": {
            "raw": {
                "type": "keyword",
                "ignore_above": 256
            }
        }
    })
}

/// The mapping for event documents.
pub fn log_mapping() -> Value {
    json!({
        "properties": {
            "id": exact_match(),
            "status": exact_match(),
            "location": exact_match(),
            "desc": exact_match(),
            "time": { "type": "integer" },
            "@timestamp": { "type": "date" }
        }
    })
}
