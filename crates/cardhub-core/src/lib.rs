//! Card listing logic and repository trait definitions for cardhub.
//!
//! This crate defines the "ports" (repository and formatter traits) that the
//! infrastructure layer implements. It depends only on `cardhub-types` -- never
//! on `cardhub-infra` or any database/IO crate.

pub mod repository;
pub mod service;
