//! Request bodies and response classification for the Elasticsearch REST API.

use std::collections::HashMap;

use esfeed_core::{Event, StoreError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Bulk request
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct BulkAction<'a> {
    index: ActionMeta<'a>,
}

#[derive(Serialize)]
struct ActionMeta<'a> {
    #[serde(rename = "_index")]
    index: &'a str,
    #[serde(rename = "_type", skip_serializing_if = "Option::is_none")]
    document_type: Option<&'a str>,
    #[serde(rename = "_id")]
    id: &'a str,
}

/// NDJSON body for `POST /_bulk`: an action line and a source line per
/// document, each terminated by `\n`.
pub fn bulk_body(
    index: &str,
    document_type: Option<&str>,
    documents: &[Event],
) -> Result<Vec<u8>, serde_json::Error> {
    let mut body = Vec::with_capacity(documents.len() * 256);
    for doc in documents {
        let action = BulkAction {
            index: ActionMeta {
                index,
                document_type,
                id: &doc.id,
            },
        };
        serde_json::to_writer(&mut body, &action)?;
        body.push(b'\n');
        serde_json::to_writer(&mut body, doc)?;
        body.push(b'\n');
    }
    Ok(body)
}

// ---------------------------------------------------------------------------
// Bulk response
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct BulkResponse {
    #[serde(default)]
    errors: bool,
    #[serde(default)]
    items: Vec<HashMap<String, BulkItem>>,
}

#[derive(Deserialize)]
struct BulkItem {
    #[serde(default)]
    error: Option<Value>,
}

/// Inspect a 2xx bulk response. Item-level failures turn the whole call into
/// [`StoreError::BulkRejected`].
pub fn check_bulk_response(body: &[u8], total: usize) -> Result<(), StoreError> {
    let response: BulkResponse = serde_json::from_slice(body)?;
    if !response.errors {
        return Ok(());
    }

    let errors: Vec<&Value> = response
        .items
        .iter()
        .flat_map(|item| item.values())
        .filter_map(|result| result.error.as_ref())
        .collect();

    Err(StoreError::BulkRejected {
        failed: errors.len(),
        total,
        reason: errors
            .first()
            .map(|e| describe_error(e))
            .unwrap_or_else(|| "unknown".to_string()),
    })
}

// ---------------------------------------------------------------------------
// Error responses
// ---------------------------------------------------------------------------

/// Map a non-2xx response onto a [`StoreError`].
///
/// `resource_already_exists_exception` (and the older
/// `index_already_exists_exception`) become [`StoreError::AlreadyExists`].
pub fn classify_failure(status: u16, body: &[u8], index: &str) -> StoreError {
    let parsed: Option<Value> = serde_json::from_slice(body).ok();
    let error = parsed.as_ref().and_then(|v| v.get("error"));

    let kind = match error {
        Some(Value::Object(obj)) => obj.get("type").and_then(Value::as_str).unwrap_or(""),
        Some(Value::String(s)) => s.as_str(),
        _ => "",
    };
    if kind.contains("already_exists") || kind.contains("IndexAlreadyExists") {
        return StoreError::AlreadyExists {
            index: index.to_string(),
        };
    }

    StoreError::Rejected {
        status,
        reason: error
            .map(describe_error)
            .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string()),
    }
}

fn describe_error(error: &Value) -> String {
    match error {
        Value::String(s) => s.clone(),
        Value::Object(obj) => {
            let kind = obj.get("type").and_then(Value::as_str);
            let reason = obj.get("reason").and_then(Value::as_str);
            match (kind, reason) {
                (Some(k), Some(r)) => format!("{k}: {r}"),
                (Some(k), None) => k.to_string(),
                (None, Some(r)) => r.to_string(),
                (None, None) => error.to_string(),
            }
        }
        other => other.to_string(),
    }
}
