//! Infrastructure layer for cardhub.
//!
//! Contains implementations of the repository traits defined in `cardhub-core`
//! (SQLite storage) and the configuration loader.

pub mod config;
pub mod sqlite;
