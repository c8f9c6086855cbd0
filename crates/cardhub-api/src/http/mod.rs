//! HTTP API layer for cardhub.
//!
//! Axum router serving the client `cards.json` listing and a health check,
//! with CORS and request tracing.

pub mod error;
pub mod handlers;
pub mod router;
