//! Wire types for the answering service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A supporting source returned alongside an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub snippet: String,
    pub confidence: f64,
}

impl Source {
    /// Confidence as a whole percentage, clamped to 0..=100.
    pub fn confidence_percent(&self) -> u8 {
        confidence_percent(self.confidence)
    }
}

/// A successful answer from the service.
///
/// `sources` keep the order the server returned them in (relevance order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerPayload {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<Source>,
    pub confidence_score: f64,
}

impl AnswerPayload {
    pub fn confidence_percent(&self) -> u8 {
        confidence_percent(self.confidence_score)
    }
}

/// Request body for `POST /api/query`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryRequest<'a> {
    pub text: &'a str,
    pub user_id: &'a str,
}

/// Error body the service may return on failure.
///
/// FastAPI sends either a plain string or, for validation failures, a list of
/// `{ "loc": [...], "msg": "...", "type": "..." }` objects.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// Parse an error body, returning the server detail message if one is usable.
    pub fn detail_from_bytes(bytes: &[u8]) -> Option<String> {
        let body: ErrorBody = serde_json::from_slice(bytes).ok()?;
        body.detail_message()
    }

    pub fn detail_message(&self) -> Option<String> {
        let message = match self.detail.as_ref()? {
            Value::String(text) => text.trim().to_string(),
            Value::Array(items) => items
                .iter()
                .filter_map(|item| match item {
                    Value::String(text) => Some(text.trim()),
                    Value::Object(map) => map.get("msg").and_then(Value::as_str).map(str::trim),
                    _ => None,
                })
                .filter(|msg| !msg.is_empty())
                .collect::<Vec<_>>()
                .join("; "),
            _ => return None,
        };

        if message.is_empty() {
            None
        } else {
            Some(message)
        }
    }
}

fn confidence_percent(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (value.clamp(0.0, 1.0) * 100.0).round() as u8
}
