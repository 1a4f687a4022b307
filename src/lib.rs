//! # quantum-console
//!
//! Console front end for the quantum encryption management API.
//!
//! The crate is small on purpose: an injectable session store, a request
//! helper that normalizes backend responses, and a login flow that ties the
//! two together. The shell and console modules only read the session to
//! decide between the login view and the main application view.

pub mod auth;
pub mod config;
pub mod console;
pub mod error;
pub mod net;
pub mod shell;
pub mod state;
