//! Application state wiring the card service together.
//!
//! The service is generic over repository/formatter traits, but AppState
//! pins it to the concrete infra implementations.

use std::sync::Arc;

use cardhub_core::service::card_format::TavernCardFormatter;
use cardhub_core::service::card_list::CardListService;
use cardhub_infra::sqlite::content::SqliteContentRepository;
use cardhub_infra::sqlite::pool::DatabasePool;
use cardhub_types::config::{AccessKeys, ServerConfig};

/// Concrete type alias for the service generics pinned to infra implementations.
pub type ConcreteCardListService = CardListService<SqliteContentRepository, TavernCardFormatter>;

/// Shared application state.
///
/// Used by both CLI commands and HTTP handlers. Built once at startup;
/// nothing in it changes while serving.
#[derive(Clone)]
pub struct AppState {
    pub card_service: Arc<ConcreteCardListService>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Initialize the application state: connect to DB (when configured), wire services.
    pub async fn init(config: ServerConfig, keys: AccessKeys) -> anyhow::Result<Self> {
        let pool = DatabasePool::connect_optional(config.database_url.as_deref()).await?;
        Ok(Self::from_parts(SqliteContentRepository::from(pool), config, keys))
    }

    /// Wire the state around an existing repository.
    pub fn from_parts(
        repo: SqliteContentRepository,
        config: ServerConfig,
        keys: AccessKeys,
    ) -> Self {
        let card_service = CardListService::new(
            repo,
            TavernCardFormatter::new(),
            keys,
            config.prefetch_companion_kinds,
        );

        Self {
            card_service: Arc::new(card_service),
            config: Arc::new(config),
        }
    }
}
