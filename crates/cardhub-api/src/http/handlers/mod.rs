//! HTTP request handlers.

pub mod cards;
