//! Shared domain types for cardhub.
//!
//! Content items and their kinds, the client-facing card shape, server
//! configuration, and the error types shared by every layer.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror, secrecy.

pub mod config;
pub mod content;
pub mod error;
