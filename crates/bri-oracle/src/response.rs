//! Parse tagging-service output into labeled spans
//!
//! A single malformed span rejects the whole response.

use crate::OracleError;
use bri_domain::{FieldTag, LabeledSpan};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct RawSpan {
    label: String,
    #[serde(default)]
    text: Option<String>,
    start_pos: usize,
    end_pos: usize,
}

/// Parse a JSON response into spans local to `window`
///
/// Accepts either a bare array of spans or an object with a `spans` array.
/// Each span needs `label` (code or name), `start_pos` and `end_pos`; a
/// missing `text` is filled from the window.
///
/// # Errors
///
/// Returns `OracleError::InvalidResponse` if the body is not JSON, a label is
/// unknown, offsets fall outside the window or off a character boundary, or
/// spans are out of order.
pub fn parse_spans(body: &str, window: &str) -> Result<Vec<LabeledSpan>, OracleError> {
    let json: Value = serde_json::from_str(body.trim())
        .map_err(|e| OracleError::InvalidResponse(format!("JSON parse error: {}", e)))?;

    let array = match json {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("spans") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(OracleError::InvalidResponse(
                    "Expected a 'spans' array".to_string(),
                ))
            }
        },
        _ => {
            return Err(OracleError::InvalidResponse(
                "Expected JSON array or object".to_string(),
            ))
        }
    };

    let mut spans: Vec<LabeledSpan> = Vec::with_capacity(array.len());
    for (idx, item) in array.into_iter().enumerate() {
        let raw: RawSpan = serde_json::from_value(item)
            .map_err(|e| OracleError::InvalidResponse(format!("Span {}: {}", idx, e)))?;
        let span = validate_span(idx, raw, window)?;

        if let Some(previous) = spans.last() {
            if span.start_pos < previous.start_pos {
                return Err(OracleError::InvalidResponse(format!(
                    "Span {} starts at {} before previous span at {}",
                    idx, span.start_pos, previous.start_pos
                )));
            }
        }
        spans.push(span);
    }

    Ok(spans)
}

fn validate_span(idx: usize, raw: RawSpan, window: &str) -> Result<LabeledSpan, OracleError> {
    let label: FieldTag = raw
        .label
        .parse()
        .map_err(|e| OracleError::InvalidResponse(format!("Span {}: {}", idx, e)))?;

    if raw.start_pos > raw.end_pos {
        return Err(OracleError::InvalidResponse(format!(
            "Span {}: start {} after end {}",
            idx, raw.start_pos, raw.end_pos
        )));
    }

    let slice = window.get(raw.start_pos..raw.end_pos).ok_or_else(|| {
        OracleError::InvalidResponse(format!(
            "Span {}: offsets {}..{} outside the {}-byte window",
            idx,
            raw.start_pos,
            raw.end_pos,
            window.len()
        ))
    })?;

    let text = raw.text.unwrap_or_else(|| slice.to_string());
    Ok(LabeledSpan::new(label, text, raw.start_pos, raw.end_pos))
}
