//! # Better Stack Error Types
//!
//! Error taxonomy for the Better Stack REST client.
//!
//! Every non-2xx/3xx response becomes an [`ApiError`] carrying the HTTP status
//! code and the most useful message found in the body. Callers classify with
//! [`is_not_found`] and [`is_quota_exceeded`] rather than matching on codes.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Structured error returned by the Better Stack API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Better Stack API error (status {status_code}): {message}")]
pub struct ApiError {
    pub status_code: u16,
    pub message: String,
}

impl ApiError {
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
        }
    }

    /// Build an error from a failed response
    ///
    /// Message precedence:
    /// 1. `errors[]` entries, `detail` preferred over `title`, joined with `"; "`
    /// 2. top-level `error` or `message` string
    /// 3. the raw body
    /// 4. the HTTP status text
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        Self::new(status.as_u16(), extract_message(status, body))
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code == StatusCode::NOT_FOUND.as_u16()
    }

    pub fn is_quota_exceeded(&self) -> bool {
        self.status_code == StatusCode::FORBIDDEN.as_u16()
            && self.message.to_lowercase().contains("quota")
    }
}

/// Errors produced by [`BetterStackClient`](super::BetterStackClient)
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("request to Better Stack failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("failed to encode or decode Better Stack payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid Better Stack URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("Better Stack returned no content for {method} {path}")]
    EmptyResponse { method: String, path: String },
}

impl Error {
    /// The structured API error, if this is one
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(api) => Some(api),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.api().is_some_and(ApiError::is_not_found)
    }

    pub fn is_quota_exceeded(&self) -> bool {
        self.api().is_some_and(ApiError::is_quota_exceeded)
    }
}

/// True iff `err` is an API error with status 404
pub fn is_not_found(err: &Error) -> bool {
    err.is_not_found()
}

/// True iff `err` is an API error with status 403 whose message mentions a quota
pub fn is_quota_exceeded(err: &Error) -> bool {
    err.is_quota_exceeded()
}

fn extract_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(body) {
        if let Some(Value::Array(items)) = map.get("errors") {
            let details: Vec<&str> = items
                .iter()
                .filter_map(|item| non_empty_str(item, "detail").or_else(|| non_empty_str(item, "title")))
                .collect();
            if !details.is_empty() {
                return details.join("; ");
            }
        }

        for key in ["error", "message"] {
            if let Some(message) = map.get(key).and_then(Value::as_str).filter(|s| !s.is_empty()) {
                return message.to_string();
            }
        }
    }

    let raw = String::from_utf8_lossy(body);
    let raw = raw.trim();
    if !raw.is_empty() {
        return raw.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_string()
}

fn non_empty_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}
