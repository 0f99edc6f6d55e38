//! Record builder: one raw CSV record in, one [`Event`] out.
//!
//! Records carry five ordered fields: `status, timestamp, time, desc,
//! location`. The builder is a pure function; calling it twice on the same
//! fields yields the same event, id included.

use chrono::NaiveDateTime;
use sha2::{Digest, Sha256};

use crate::error::FormatError;
use crate::types::Event;

/// Number of fields in a raw record.
pub const FIELD_COUNT: usize = 5;

const SOURCE_TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";
const EVENT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Build an [`Event`] from the raw fields of one record.
pub fn build<S: AsRef<str>>(fields: &[S]) -> Result<Event, FormatError> {
    let [status, timestamp, time, desc, location] = fields else {
        return Err(FormatError::FieldCount {
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    };

    Ok(Event {
        id: content_id(fields),
        status: status.as_ref().to_string(),
        timestamp: normalize_timestamp(timestamp.as_ref())?,
        time: parse_time(time.as_ref())?,
        location: location.as_ref().to_string(),
        desc: desc.as_ref().to_string(),
    })
}

/// Hex SHA-256 over the fields encoded as a JSON array of strings.
pub fn content_id<S: AsRef<str>>(fields: &[S]) -> String {
    let canonical = serde_json::Value::Array(
        fields
            .iter()
            .map(|f| serde_json::Value::String(f.as_ref().to_string()))
            .collect(),
    )
    .to_string();

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Reparse `DD/MM/YYYY HH:MM:SS` into `YYYY-MM-DDTHH:MM:SS`.
///
/// The date and time may be separated by any run of whitespace; exports in
/// the wild use two spaces. Leading or trailing whitespace is rejected.
pub fn normalize_timestamp(raw: &str) -> Result<String, FormatError> {
    let rejected = |source: Option<chrono::ParseError>| FormatError::Timestamp {
        value: raw.to_string(),
        source,
    };
    if raw.trim() != raw {
        return Err(rejected(None));
    }

    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let parsed = NaiveDateTime::parse_from_str(&collapsed, SOURCE_TIMESTAMP_FORMAT)
        .map_err(|e| rejected(Some(e)))?;
    Ok(parsed.format(EVENT_TIMESTAMP_FORMAT).to_string())
}

/// Strip every `.`, drop the trailing three characters, parse the rest.
///
/// `"10.150.000"` becomes `10150`. An empty field means "no value".
pub fn parse_time(raw: &str) -> Result<Option<i64>, FormatError> {
    if raw.is_empty() {
        return Ok(None);
    }

    let digits: String = raw.chars().filter(|c| *c != '.').collect();
    let head = digits
        .char_indices()
        .rev()
        .nth(2)
        .map(|(cut, _)| &digits[..cut])
        .unwrap_or("");

    head.parse::<i64>()
        .map(Some)
        .map_err(|_| FormatError::Time {
            value: raw.to_string(),
        })
}
