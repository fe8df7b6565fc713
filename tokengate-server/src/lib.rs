//! tokengate-server: HTTP surface for the ownership-gated stream
//!
//! Exposed as a library so integration tests can assemble the app
//! in-process; the binary entry point lives in `main.rs`.

pub mod config;
pub mod error;
pub mod media;
pub mod routes;
pub mod state;
