//! Generic request helper for the backend API.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is logged once here, at its origin, and then returned
//! unchanged. Callers decide what to show the user; this module never
//! swallows an error and never retries.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use super::transport::{HttpTransport, ReqwestTransport, TransportError};
use super::types::{HttpError, HttpRequest, RequestOptions};
use crate::config::ApiConfig;
use crate::error::ErrorCode;

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never completed. Message is passed through verbatim.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with a non-success status.
    #[error("{0}")]
    Http(HttpError),

    /// No response within the configured request timeout.
    #[error("request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    /// A success response whose body is not valid JSON.
    #[error("response parse failed: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status for [`ApiError::Http`], `None` otherwise.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(err) => Some(err.status),
            _ => None,
        }
    }
}

impl ErrorCode for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "E_TRANSPORT",
            Self::Http(_) => "E_HTTP",
            Self::Timeout(_) => "E_TIMEOUT",
            Self::Decode(_) => "E_DECODE",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout(_) => true,
            Self::Http(err) => matches!(err.status, 429 | 500..=599),
            Self::Decode(_) => false,
        }
    }
}

// =============================================================================
// CLIENT
// =============================================================================

/// Issues requests against `{base_url}/{endpoint}`.
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    request_timeout: Duration,
}

impl ApiClient {
    /// Build a client backed by reqwest.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(config.timeouts.connect)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    #[must_use]
    pub fn with_transport(config: &ApiConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            request_timeout: config.timeouts.request,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Send one request and return the decoded JSON body.
    ///
    /// A 2xx body is returned exactly as decoded; an empty 2xx body decodes
    /// to `Value::Null`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Transport`] when the request never completes
    /// - [`ApiError::Timeout`] when no response arrives in time
    /// - [`ApiError::Http`] for any non-2xx status
    /// - [`ApiError::Decode`] when a 2xx body is not JSON
    pub async fn fetch(&self, endpoint: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let request = HttpRequest {
            method: options.method,
            url: self.endpoint_url(endpoint),
            headers: options.headers,
            body: options.body,
        };
        let method = request.method.clone();

        let response = match tokio::time::timeout(self.request_timeout, self.transport.send(request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                tracing::error!(%method, endpoint, error = %e, "api request failed");
                return Err(ApiError::Transport(e));
            }
            Err(_) => {
                let err = ApiError::Timeout(self.request_timeout);
                tracing::error!(%method, endpoint, error = %err, "api request timed out");
                return Err(err);
            }
        };

        if !response.is_success() {
            let err = HttpError::from_response(&response);
            tracing::error!(
                %method,
                endpoint,
                status = err.status,
                error_code = %err.error_code,
                error = %err,
                "api returned error status"
            );
            return Err(ApiError::Http(err));
        }

        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str::<Value>(&response.body).map_err(|e| {
            tracing::error!(%method, endpoint, error = %e, "api response parse failed");
            ApiError::Decode(e)
        })
    }
}
