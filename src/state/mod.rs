//! Client-side application state.
//!
//! DESIGN
//! ======
//! State lives in explicit handles that are constructed once and passed to
//! their collaborators. Nothing here is a process-wide singleton, so every
//! test can build an isolated instance.

pub mod session;
