//! Mapping of HTTP failures onto the error taxonomy.

use reqwest::StatusCode;
use serde_json::Value;
use taskdeck_core::TaskdeckError;

/// What a request was about, so a 404 can name the missing entity.
#[derive(Debug, Clone)]
pub struct RequestTarget {
    pub entity_type: &'static str,
    pub id: String,
}

impl RequestTarget {
    pub fn new(entity_type: &'static str, id: impl ToString) -> Self {
        Self {
            entity_type,
            id: id.to_string(),
        }
    }
}

/// Maps a non-2xx response onto a `TaskdeckError`.
///
/// - 400, 409, 422 → `Validation`
/// - 401, 403 → `Auth`
/// - 404 → `NotFound` for `target`
/// - anything else → `Service`
pub fn map_http_error(status: StatusCode, body: &str, target: &RequestTarget) -> TaskdeckError {
    let message = extract_detail(body).unwrap_or_else(|| {
        if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string()
        } else {
            body.trim().to_string()
        }
    });

    match status {
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            TaskdeckError::validation(message)
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => TaskdeckError::auth(message),
        StatusCode::NOT_FOUND => TaskdeckError::not_found(target.entity_type, &target.id),
        _ => TaskdeckError::service(Some(status.as_u16()), message),
    }
}

/// Maps a transport-level failure (no HTTP status) onto `Service`.
pub fn map_transport_error(err: &reqwest::Error, action: &str) -> TaskdeckError {
    let status = err.status().map(|s| s.as_u16());
    let kind = if err.is_timeout() {
        "timed out"
    } else if err.is_connect() {
        "could not connect"
    } else if err.is_decode() {
        "returned an unreadable body"
    } else {
        "failed"
    };
    TaskdeckError::service(status, format!("{action} {kind}: {err}"))
}

/// Pulls a human-readable message out of an error body.
///
/// The server reports `{"detail": "..."}`, or for rejected payloads
/// `{"detail": [{"loc": [...], "msg": "..."}]}`.
fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) => Some(detail.clone()),
        Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| {
                    let msg = item.get("msg")?.as_str()?;
                    let field = item
                        .get("loc")
                        .and_then(Value::as_array)
                        .and_then(|loc| loc.last())
                        .and_then(Value::as_str);
                    Some(match field {
                        Some(field) => format!("{field}: {msg}"),
                        None => msg.to_string(),
                    })
                })
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}
