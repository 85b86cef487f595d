use import_logging::{import_debug, import_info};
use serde_json::Value;
use thiserror::Error;

use crate::normalize::normalize_entry;
use crate::{ImportResult, SourceGroup};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("catalog is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("unrecognized catalog format: expected an array or an object with a `sources` or `list` array")]
    UnrecognizedFormat,
}

/// Envelope shapes a published catalog may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    /// `[ ... ]`
    Array,
    /// `{"sources": [ ... ]}`
    Sources,
    /// `{"list": [ ... ]}`
    List,
}

/// Detects the envelope of a parsed catalog and returns its entries.
/// A bare array wins over `sources`, which wins over `list`.
pub fn detect_envelope(value: &Value) -> Option<(Envelope, &[Value])> {
    if let Some(entries) = value.as_array() {
        return Some((Envelope::Array, entries.as_slice()));
    }
    let obj = value.as_object()?;
    if let Some(entries) = obj.get("sources").and_then(Value::as_array) {
        return Some((Envelope::Sources, entries.as_slice()));
    }
    obj.get("list")
        .and_then(Value::as_array)
        .map(|entries| (Envelope::List, entries.as_slice()))
}

/// Parses raw catalog text into categorized source records.
///
/// Malformed JSON and unknown envelopes fail the whole call; individual
/// entries that do not validate are skipped.
pub fn parse_catalog(text: &str) -> Result<ImportResult, ParseError> {
    let value: Value = serde_json::from_str(text)?;
    let (envelope, entries) = detect_envelope(&value).ok_or(ParseError::UnrecognizedFormat)?;

    let mut result = ImportResult::default();
    let mut skipped = 0usize;
    for (index, entry) in entries.iter().enumerate() {
        let Some(record) = normalize_entry(entry) else {
            import_debug!("Skipping invalid catalog entry at index {}", index);
            skipped += 1;
            continue;
        };
        match record.group {
            SourceGroup::Restricted => result.restricted.push(record),
            SourceGroup::Standard => result.standard.push(record),
        }
    }

    import_info!(
        "Parsed catalog envelope={:?} standard={} restricted={} skipped={}",
        envelope,
        result.standard.len(),
        result.restricted.len(),
        skipped
    );
    Ok(result)
}
