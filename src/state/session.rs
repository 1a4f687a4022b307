//! Authentication session for the running console.
//!
//! SYSTEM CONTEXT
//! ==============
//! Written by the login flow's success path and by logout; read by the shell
//! to pick between the login view and the main view.
//!
//! TRADE-OFFS
//! ==========
//! Reads and writes are synchronous through a `std::sync::RwLock`. Each write
//! replaces the whole value in one assignment, so readers never observe a
//! half-applied update. A poisoned lock still holds a complete `Session` and
//! is recovered rather than propagated.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, PoisonError, RwLock};

/// Snapshot of the authentication state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub authenticated: bool,
    pub token: Option<String>,
}

/// Shared handle to the session. Clones observe the same underlying value.
#[derive(Clone, Debug, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Session>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite both fields. No validation is performed.
    pub fn set_auth(&self, authenticated: bool, token: Option<String>) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Session { authenticated, token };
        tracing::debug!(authenticated, "session updated");
    }

    /// Reset to the unauthenticated default. Calling it twice is a no-op.
    pub fn logout(&self) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Session::default();
        tracing::debug!("session cleared");
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).authenticated
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).token.clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}
