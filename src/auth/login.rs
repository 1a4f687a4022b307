//! Login flow orchestration.
//!
//! SYSTEM CONTEXT
//! ==============
//! Sits between the console and the backend. Network I/O is delegated to
//! [`ApiClient`]; the only state it mutates besides its own phase is the
//! shared [`SessionStore`], and only on success.
//!
//! DESIGN
//! ======
//! `Idle -> Submitting -> Authenticated | Failed(message)`. Each submit
//! clears the previous error. Submissions are single-flight: a second submit
//! while one is outstanding is refused without sending anything.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use serde_json::Value;

use crate::error::ErrorCode;
use crate::net::api::{ApiClient, ApiError};
use crate::net::types::RequestOptions;
use crate::state::session::SessionStore;

pub const LOGIN_ENDPOINT: &str = "auth/login";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";
pub const GENERIC_FAILURE_MESSAGE: &str = "Login failed";

// =============================================================================
// CREDENTIALS
// =============================================================================

/// Username and password as typed. Never stored beyond the submit call.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Another submission is still outstanding.
    #[error("login already in progress")]
    InFlight,

    /// The server answered successfully but returned no token.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The credentials could not be serialized.
    #[error("request encode failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ErrorCode for LoginError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InFlight => "E_LOGIN_IN_FLIGHT",
            Self::InvalidCredentials => "E_INVALID_CREDENTIALS",
            Self::Encode(_) => "E_ENCODE",
            Self::Api(e) => e.error_code(),
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::InFlight => true,
            Self::InvalidCredentials | Self::Encode(_) => false,
            Self::Api(e) => e.retryable(),
        }
    }
}

impl LoginError {
    /// Text shown to the user next to the login form.
    #[must_use]
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() { GENERIC_FAILURE_MESSAGE.to_owned() } else { message }
    }
}

// =============================================================================
// PHASE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoginPhase {
    #[default]
    Idle,
    Submitting,
    Authenticated,
    Failed(String),
}

// =============================================================================
// FLOW
// =============================================================================

pub struct LoginFlow {
    api: ApiClient,
    session: SessionStore,
    phase: Mutex<LoginPhase>,
    in_flight: AtomicBool,
}

/// Releases the in-flight flag when the submit future completes or is
/// dropped. A dropped submit leaves no half-finished `Submitting` phase.
struct InFlightGuard<'a> {
    flow: &'a LoginFlow,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let mut phase = self.flow.phase.lock().unwrap_or_else(PoisonError::into_inner);
        if *phase == LoginPhase::Submitting {
            *phase = LoginPhase::Idle;
        }
        drop(phase);
        self.flow.in_flight.store(false, Ordering::Release);
    }
}

impl LoginFlow {
    #[must_use]
    pub fn new(api: ApiClient, session: SessionStore) -> Self {
        Self { api, session, phase: Mutex::new(LoginPhase::Idle), in_flight: AtomicBool::new(false) }
    }

    #[must_use]
    pub fn phase(&self) -> LoginPhase {
        self.phase.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// The currently displayed error, if the last submit failed.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        match self.phase() {
            LoginPhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Submit credentials to the authentication endpoint.
    ///
    /// On success the session becomes authenticated with the returned token
    /// and the token is returned. On any failure the session is left as it
    /// was and the phase records the user-facing message.
    ///
    /// # Errors
    ///
    /// - [`LoginError::InFlight`] if a previous submit is still running
    /// - [`LoginError::InvalidCredentials`] if the response has no token
    /// - [`LoginError::Api`] for transport, timeout, HTTP, or decode failures
    pub async fn submit(&self, credentials: &Credentials) -> Result<String, LoginError> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            tracing::debug!(username = %credentials.username, "login submit ignored; already in flight");
            return Err(LoginError::InFlight);
        }
        let _guard = InFlightGuard { flow: self };

        self.set_phase(LoginPhase::Submitting);

        match self.request_token(credentials).await {
            Ok(token) => {
                self.session.set_auth(true, Some(token.clone()));
                self.set_phase(LoginPhase::Authenticated);
                tracing::info!(username = %credentials.username, "login succeeded");
                Ok(token)
            }
            Err(err) => {
                tracing::warn!(username = %credentials.username, error = %err, "login failed");
                self.set_phase(LoginPhase::Failed(err.user_message()));
                Err(err)
            }
        }
    }

    /// Clear the session and return to `Idle`.
    pub fn logout(&self) {
        self.session.logout();
        self.set_phase(LoginPhase::Idle);
        tracing::info!("logged out");
    }

    async fn request_token(&self, credentials: &Credentials) -> Result<String, LoginError> {
        let options = RequestOptions::post().json(credentials)?;
        let response = self.api.fetch(LOGIN_ENDPOINT, options).await?;
        extract_token(&response).ok_or(LoginError::InvalidCredentials)
    }

    fn set_phase(&self, phase: LoginPhase) {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner) = phase;
    }
}

fn extract_token(response: &Value) -> Option<String> {
    response
        .get("token")
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .map(ToOwned::to_owned)
}
