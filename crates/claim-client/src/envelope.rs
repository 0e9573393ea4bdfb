//! Lenient parsing of the `{ code, data, message }` response envelope.

use serde_json::Value;

use crate::error::{ClientError, ClientResult};

/// Application-level success code.
pub(crate) const SUCCESS_CODE: i64 = 200;

/// Longest raw body echoed back in an error message.
const MAX_BODY_ECHO: usize = 256;

/// The service's response envelope.
#[derive(Debug, Clone, Default)]
pub(crate) struct Envelope {
    pub(crate) code: Option<i64>,
    pub(crate) data: Value,
    pub(crate) message: Option<String>,
}

impl Envelope {
    /// Parse a response body. Non-object bodies are rejected.
    pub(crate) fn parse(body: &str) -> ClientResult<Self> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| ClientError::InvalidResponse(format!("body is not JSON: {e}")))?;

        let Value::Object(mut map) = value else {
            return Err(ClientError::InvalidResponse(
                "body is not a JSON object".to_string(),
            ));
        };

        // `code` is sometimes sent as a string.
        let code = match map.get("code") {
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        };

        let message = match map.get("message") {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        };

        Ok(Self {
            code,
            data: map.remove("data").unwrap_or(Value::Null),
            message,
        })
    }

    /// Whether the application-level code signals success.
    pub(crate) fn is_success(&self) -> bool {
        self.code == Some(SUCCESS_CODE)
    }

    /// Non-empty `data.token`, if any.
    pub(crate) fn token(&self) -> Option<&str> {
        self.data
            .get("token")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// The remote message, falling back to the raw body.
    pub(crate) fn message_or(&self, body: &str) -> String {
        self.message.clone().unwrap_or_else(|| echo_body(body))
    }
}

/// Best-effort message extraction from an error body.
pub(crate) fn remote_message(body: &str) -> String {
    Envelope::parse(body)
        .ok()
        .and_then(|e| e.message)
        .unwrap_or_else(|| echo_body(body))
}

fn echo_body(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return "empty response body".to_string();
    }
    if body.chars().count() <= MAX_BODY_ECHO {
        return body.to_string();
    }
    let truncated: String = body.chars().take(MAX_BODY_ECHO).collect();
    format!("{truncated}...")
}
