//! Machine-readable error classification.
//!
//! Every error surfaced to the console carries a stable code next to its
//! human message so scripted callers can branch without string matching.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Stable error code plus a retry hint for display alongside the message.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

/// Render an error as `[CODE] message`, appending a retry hint when useful.
pub fn describe(err: &(impl ErrorCode + ?Sized)) -> String {
    if err.retryable() {
        format!("[{}] {} (retryable)", err.error_code(), err)
    } else {
        format!("[{}] {}", err.error_code(), err)
    }
}
