//! Gatehouse HTTP server library.
//!
//! Exposes config, state, identity wiring, the session-gating middleware and
//! routes so integration tests and the binary entrypoint share them.

pub mod config;
pub mod error;
pub mod identity;
pub mod middleware;
pub mod pages;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
