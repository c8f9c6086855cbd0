//! Content repository trait definition.

use cardhub_types::content::{ContentItem, ContentKind};
use cardhub_types::error::RepositoryError;

/// Repository trait for content persistence.
///
/// Implementations live in cardhub-infra (e.g., SqliteContentRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait ContentRepository: Send + Sync {
    /// List every stored item of the given kind, oldest first.
    ///
    /// Returns `RepositoryError::NotInitialized` when no storage has been configured.
    fn list_by_kind(
        &self,
        kind: ContentKind,
    ) -> impl std::future::Future<Output = Result<Vec<ContentItem>, RepositoryError>> + Send;

    /// Store a new item. Returns the stored item.
    fn create(
        &self,
        item: &ContentItem,
    ) -> impl std::future::Future<Output = Result<ContentItem, RepositoryError>> + Send;
}
