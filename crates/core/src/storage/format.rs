use crate::errors::CoreError;
use crate::models::history::History;

/// Encode a history as the stored blob: a plain JSON array of entries,
/// oldest first.
///
/// ```text
/// [{"timestamp":"01/01, 10:00 a. m.","bcv":36.0,"bcv_eur":39.0,"binance":40.0}, ...]
/// ```
pub fn encode_history(history: &History) -> Result<String, CoreError> {
    serde_json::to_string(history)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize history: {e}")))
}

/// Decode a stored blob.
///
/// Returns `Ok(None)` when the blob is valid JSON but not an array (a
/// foreign or legacy value under the key); the caller treats it as no
/// history. An array whose elements are not entries is an error.
pub fn decode_history(blob: &str) -> Result<Option<History>, CoreError> {
    let value: serde_json::Value = serde_json::from_str(blob)
        .map_err(|e| CoreError::Deserialization(format!("History blob is not JSON: {e}")))?;

    if !value.is_array() {
        return Ok(None);
    }

    let history: History = serde_json::from_value(value)
        .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize history: {e}")))?;
    Ok(Some(history))
}
