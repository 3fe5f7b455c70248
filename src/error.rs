//! Assessment and backend-boundary errors.

use serde_json::Value;

/// Errors the scorer itself can produce. Anything short of these two hard
/// constraints is treated as an absent signal, not an error.
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("invalid input: {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
}

/// Tagged replacement for the arbitrarily-shaped error payloads the lending
/// backend returns. Callers owning a transport construct `Network` themselves;
/// `from_payload` classifies anything that arrived as a response body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("{0}")]
    Unknown(String),
}

impl ApiError {
    /// Map a backend error payload to a tagged variant.
    ///
    /// Recognized shapes, in order:
    /// - `{"detail": [{"msg": ...}, ...]}`: validation errors, messages joined
    /// - `{"detail": "..."}`: a single validation message
    /// - `{"message": "..."}`: a general error
    ///
    /// Anything else becomes `Unknown` with a fallback message.
    pub fn from_payload(payload: &Value) -> Self {
        match payload.get("detail") {
            Some(Value::Array(items)) => {
                let msgs: Vec<&str> = items
                    .iter()
                    .filter_map(|item| {
                        item.get("msg")
                            .or_else(|| item.get("message"))
                            .and_then(Value::as_str)
                    })
                    .collect();
                if msgs.is_empty() {
                    ApiError::Validation("Validation error".to_string())
                } else {
                    ApiError::Validation(msgs.join(", "))
                }
            }
            Some(Value::String(detail)) => ApiError::Validation(detail.clone()),
            _ => match payload.get("message").and_then(Value::as_str) {
                Some(message) => ApiError::Unknown(message.to_string()),
                None => ApiError::Unknown("An unexpected error occurred".to_string()),
            },
        }
    }
}
