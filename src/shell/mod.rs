//! Application shell: which view to show and what the navigation offers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The shell only reads the session's `authenticated` flag. It has no other
//! coupling to the login flow and never writes to the session.

pub mod pages;

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

use std::fmt::Write;

pub use pages::{NAVIGATION, Page};

use crate::state::session::Session;

pub const BRAND_TITLE: &str = "MILITARY-GRADE";
pub const BRAND_SUBTITLE: &str = "QUANTUM ENCRYPTION";

/// Top-level view for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Main,
}

impl View {
    #[must_use]
    pub fn for_session(session: &Session) -> Self {
        if session.authenticated { Self::Main } else { Self::Login }
    }
}

/// Render the navigation menu as shown in the main view's side panel.
#[must_use]
pub fn render_menu() -> String {
    let mut out = format!("{BRAND_TITLE}\n{BRAND_SUBTITLE}\n");
    for page in NAVIGATION {
        let _ = writeln!(out, "  {:<34} {}", page.title(), page.path());
    }
    out
}

/// Render a page body: title line followed by its placeholder text.
#[must_use]
pub fn render_page(page: Page) -> String {
    format!("{}\n{}\n{}\n", page.title(), "=".repeat(page.title().len()), page.summary())
}
