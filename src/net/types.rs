//! Wire-level request/response types shared by the API client and transports.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

// =============================================================================
// REQUEST OPTIONS
// =============================================================================

/// Per-call options for [`crate::net::api::ApiClient::fetch`].
///
/// Defaults to a bodiless `GET` with no extra headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self { method: Method::GET, headers: BTreeMap::new(), body: None }
    }
}

impl RequestOptions {
    #[must_use]
    pub fn get() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn post() -> Self {
        Self { method: Method::POST, ..Self::default() }
    }

    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_owned(), value.to_owned());
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `payload` as the body and mark it `application/json`.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if `payload` cannot be encoded.
    pub fn json<T: Serialize + ?Sized>(self, payload: &T) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_string(payload)?;
        Ok(self.header(CONTENT_TYPE, APPLICATION_JSON).body(body))
    }
}

// =============================================================================
// TRANSPORT MESSAGES
// =============================================================================

/// A fully resolved request handed to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

/// A completed response. Bodies are kept as text; decoding is the client's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// =============================================================================
// HTTP ERROR
// =============================================================================

/// Normalized non-success response.
///
/// When the body is JSON, `message` and `error_code` are lifted from it and
/// the whole value is kept in `detail`. Otherwise the error falls back to
/// `HTTP error! status: N` / `HTTP_N`.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpError {
    pub status: u16,
    pub message: Option<String>,
    pub error_code: String,
    pub detail: Option<Value>,
}

impl HttpError {
    #[must_use]
    pub fn from_response(response: &HttpResponse) -> Self {
        let status = response.status;
        let Ok(detail) = serde_json::from_str::<Value>(&response.body) else {
            return Self { status, message: None, error_code: fallback_error_code(status), detail: None };
        };

        let message = detail
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.trim().is_empty())
            .map(ToOwned::to_owned);
        let error_code = detail
            .get("error_code")
            .and_then(Value::as_str)
            .map_or_else(|| fallback_error_code(status), ToOwned::to_owned);

        Self { status, message, error_code, detail: Some(detail) }
    }

    /// The `{message, error_code}` pair as it would be reported to a caller
    /// inspecting the structured detail.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match &self.detail {
            Some(detail @ Value::Object(_)) => detail.clone(),
            _ => serde_json::json!({
                "message": fallback_message(self.status),
                "error_code": self.error_code,
            }),
        }
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{message} (status: {})", self.status),
            None => f.write_str(&fallback_message(self.status)),
        }
    }
}

fn fallback_message(status: u16) -> String {
    format!("HTTP error! status: {status}")
}

fn fallback_error_code(status: u16) -> String {
    format!("HTTP_{status}")
}
