//! Client card catalogue endpoint.
//!
//! GET /api/cards.json - Character cards in the client `cards.json` format.

use std::time::Instant;

use axum::extract::State;
use axum::Json;

use cardhub_types::content::CardList;
use cardhub_types::error::CardListError;

use crate::http::error::AppError;
use crate::state::AppState;

/// GET /api/cards.json - List every character card.
///
/// Refused with 403 when a member key is configured. Storage failures on
/// character cards produce a 500; failures on the companion kinds are
/// absorbed by the service.
pub async fn list_cards(State(state): State<AppState>) -> Result<Json<CardList>, AppError> {
    let start = Instant::now();

    match state.card_service.list_cards().await {
        Ok(list) => {
            tracing::info!(
                count = list.cards.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "served card list"
            );
            Ok(Json(list))
        }
        Err(e @ CardListError::KeyRequired) => Err(e.into()),
        Err(e) => {
            tracing::error!(error = %e, "failed to fetch character card list");
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use cardhub_core::repository::content::ContentRepository;
    use cardhub_infra::sqlite::content::SqliteContentRepository;
    use cardhub_infra::sqlite::pool::DatabasePool;
    use cardhub_types::config::{AccessKeys, ServerConfig};
    use cardhub_types::content::{ContentItem, ContentKind};
    use serde_json::{json, Value};

    use crate::http::error::{KEY_REQUIRED_MESSAGE, LIST_FAILED_MESSAGE, NOT_INITIALIZED_RESPONSE};

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn state_with(repo: SqliteContentRepository, member_key: Option<&str>) -> AppState {
        let keys = AccessKeys::new(member_key.map(str::to_string), None);
        AppState::from_parts(repo, ServerConfig::default(), keys)
    }

    async fn call(state: AppState) -> (StatusCode, Value) {
        let response = list_cards(State(state)).await.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_member_key_returns_forbidden() {
        // Uninitialized storage would fail if it were touched.
        let state = state_with(SqliteContentRepository::uninitialized(), Some("member-secret"));

        let (status, body) = call(state).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, json!({ "error": KEY_REQUIRED_MESSAGE, "code": "KEY_REQUIRED" }));
    }

    #[tokio::test]
    async fn test_empty_store_returns_empty_cards() {
        let state = state_with(SqliteContentRepository::new(test_pool().await), Some("  "));

        let (status, body) = call(state).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "cards": [] }));
    }

    #[tokio::test]
    async fn test_returns_formatted_cards() {
        let repo = SqliteContentRepository::new(test_pool().await);
        for name in ["Luna", "Sol"] {
            let item = ContentItem::new(
                ContentKind::CharacterCard,
                name,
                json!({ "spec": "chara_card_v2", "data": { "creator": "ayla", "tags": ["demo"] } }),
            );
            repo.create(&item).await.unwrap();
        }
        repo.create(&ContentItem::new(ContentKind::StoryBook, "Lore", json!({})))
            .await
            .unwrap();

        let (status, body) = call(state_with(repo, None)).await;
        assert_eq!(status, StatusCode::OK);

        let cards = body["cards"].as_array().unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0]["name"], "Luna");
        assert_eq!(cards[1]["name"], "Sol");
        assert_eq!(cards[0]["creator"], "ayla");
        assert_eq!(cards[0]["tags"], json!(["demo"]));
    }

    #[tokio::test]
    async fn test_uninitialized_storage_returns_specific_error() {
        let state = state_with(SqliteContentRepository::uninitialized(), None);

        let (status, body) = call(state).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": NOT_INITIALIZED_RESPONSE }));
    }

    #[tokio::test]
    async fn test_storage_failure_returns_generic_error() {
        let pool = test_pool().await;
        sqlx::query("DROP TABLE contents")
            .execute(&pool.writer)
            .await
            .unwrap();
        let state = state_with(SqliteContentRepository::new(pool), None);

        let (status, body) = call(state).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": LIST_FAILED_MESSAGE }));
    }
}
