//! Backend API access.
//!
//! ARCHITECTURE
//! ============
//! `api::ApiClient` owns URL building and response normalization. It talks
//! to the network only through the `transport::HttpTransport` trait, so the
//! reqwest-backed transport can be swapped for a scripted one in tests.

pub mod api;
pub mod transport;
pub mod types;
