//! Helpers for turning raw error bodies into messages.

use super::BlogError;

/// Extract a human-readable message from an error body.
///
/// Recognised shapes, in order:
/// - `{"error": "..."}` (streaming endpoints)
/// - `{"error": {"message": "..."}}`
/// - `{"code": 404, "message": "..."}` (envelope)
///
/// Returns `None` when the body is not JSON or carries none of these fields.
pub fn extract_error_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body.trim()).ok()?;
    let candidate = match &json["error"] {
        serde_json::Value::String(s) => Some(s.as_str()),
        serde_json::Value::Object(obj) => obj.get("message").and_then(|m| m.as_str()),
        _ => None,
    }
    .or_else(|| json["message"].as_str())?;

    if candidate.is_empty() {
        None
    } else {
        Some(candidate.to_string())
    }
}

/// Build the transport error for a failed response, falling back to a
/// generic status message when the body has nothing usable.
pub fn error_from_status(status: u16, body: &str) -> BlogError {
    let message =
        extract_error_message(body).unwrap_or_else(|| format!("HTTP error, status={status}"));
    if status == 401 {
        BlogError::Unauthorized(message)
    } else {
        BlogError::http_status(status, message)
    }
}
