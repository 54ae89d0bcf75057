//! Error types for the auction API client.

use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by [`crate::ApiClient`].
#[derive(Error, Debug)]
pub enum ApiError {
    /// Network or transport failure before a response was obtained.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("API error {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Parsed response body.
        body: ErrorBody,
    },

    /// Server answered 2xx but the body could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Body of a non-success response: JSON when it parses, raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    Json(Value),
    Text(String),
}

impl ErrorBody {
    /// Parse raw response text, falling back to the text itself.
    pub(crate) fn from_text(text: String) -> Self {
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(text),
        }
    }

    /// Human-readable message. Understands the backend's error formats:
    /// `{"detail": "msg"}`, `{"detail": ["msg", ...]}` and field-level
    /// `{"field": ["msg"]}` maps.
    pub fn message(&self) -> String {
        match self {
            Self::Text(text) if text.is_empty() => "request failed".to_string(),
            Self::Text(text) => text.clone(),
            Self::Json(value) => json_message(value),
        }
    }
}

fn json_message(value: &Value) -> String {
    let obj = match value {
        Value::String(s) => return s.clone(),
        Value::Object(obj) => obj,
        other => return other.to_string(),
    };

    if let Some(detail) = obj.get("detail") {
        return match detail {
            Value::String(s) => s.clone(),
            Value::Array(items) => {
                items.iter().map(scalar_message).collect::<Vec<_>>().join(". ")
            },
            other => other.to_string(),
        };
    }

    // Field-level errors: { "username": ["taken"], "email": ["invalid"] }
    let mut parts = Vec::new();
    for (field, errors) in obj {
        if errors.is_null() {
            continue;
        }
        match errors {
            Value::Array(items) => {
                for item in items {
                    parts.push(format!("{}: {}", field, scalar_message(item)));
                }
            },
            other => parts.push(format!("{}: {}", field, scalar_message(other))),
        }
    }

    if parts.is_empty() { value.to_string() } else { parts.join(". ") }
}

fn scalar_message(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl ApiError {
    /// HTTP status of the response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::InvalidResponse(_) => None,
        }
    }

    /// Whether this is a 401 the caller should treat as "not authenticated".
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Human-readable message suitable for display.
    pub fn message(&self) -> String {
        match self {
            Self::Status { body, .. } => body.message(),
            Self::Transport(e) => e.to_string(),
            Self::InvalidResponse(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detail_string() {
        let body = ErrorBody::Json(json!({"detail": "Invalid credentials"}));
        assert_eq!(body.message(), "Invalid credentials");
    }

    #[test]
    fn test_detail_array() {
        let body = ErrorBody::Json(json!({"detail": ["Too fast", "Slow down"]}));
        assert_eq!(body.message(), "Too fast. Slow down");
    }

    #[test]
    fn test_field_level_errors() {
        let body = ErrorBody::Json(json!({"username": ["already taken"]}));
        assert_eq!(body.message(), "username: already taken");
    }

    #[test]
    fn test_text_fallback() {
        let body = ErrorBody::from_text("<html>bad gateway</html>".to_string());
        assert_eq!(body, ErrorBody::Text("<html>bad gateway</html>".to_string()));
        assert_eq!(body.message(), "<html>bad gateway</html>");
    }

    #[test]
    fn test_json_text_is_parsed() {
        let body = ErrorBody::from_text(r#"{"detail": "nope"}"#.to_string());
        assert_eq!(body.message(), "nope");
    }

    #[test]
    fn test_unauthorized_flag() {
        let err = ApiError::Status { status: 401, body: ErrorBody::Text(String::new()) };
        assert!(err.is_unauthorized());
        assert_eq!(err.message(), "request failed");
    }
}
