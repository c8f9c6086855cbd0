//! Application error type mapping to HTTP status codes and the error body.
//!
//! Error bodies are `{ "error": "...", "code": "..." }`; `code` is present only
//! for errors a client is expected to act on.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use cardhub_types::error::CardListError;

/// Message returned when the listing fails because storage was never set up.
pub const NOT_INITIALIZED_RESPONSE: &str =
    "database connection not initialized, check environment configuration";

/// Message returned for every other listing failure.
pub const LIST_FAILED_MESSAGE: &str = "failed to fetch character card list";

/// Message returned when key protection refuses the request.
pub const KEY_REQUIRED_MESSAGE: &str =
    "this server has key protection enabled, please access it through a keyed link";

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Card listing errors.
    CardList(CardListError),
}

impl From<CardListError> for AppError {
    fn from(e: CardListError) -> Self {
        AppError::CardList(e)
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, Option<&'static str>, &'static str) {
        match self {
            AppError::CardList(CardListError::KeyRequired) => {
                (StatusCode::FORBIDDEN, Some("KEY_REQUIRED"), KEY_REQUIRED_MESSAGE)
            }
            AppError::CardList(CardListError::StorageNotInitialized) => {
                (StatusCode::INTERNAL_SERVER_ERROR, None, NOT_INITIALIZED_RESPONSE)
            }
            AppError::CardList(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, None, LIST_FAILED_MESSAGE)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = match code {
            Some(code) => json!({ "error": message, "code": code }),
            None => json!({ "error": message }),
        };

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
