use thiserror::Error;

/// Message fragment storage adapters use when no database has been configured.
pub const NOT_INITIALIZED_MESSAGE: &str = "database connection not initialized";

/// Errors from repository operations (used by trait definitions in cardhub-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection not initialized")]
    NotInitialized,

    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Whether this error means storage was never set up.
    ///
    /// Adapters that only carry a message are matched on its text.
    pub fn is_not_initialized(&self) -> bool {
        match self {
            RepositoryError::NotInitialized => true,
            RepositoryError::Query(msg) => msg.contains(NOT_INITIALIZED_MESSAGE),
            _ => false,
        }
    }
}

/// Errors raised while turning stored items into client cards.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("invalid card payload for '{name}': {reason}")]
    InvalidPayload { name: String, reason: String },

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Errors surfaced by the card listing use case.
#[derive(Debug, Error)]
pub enum CardListError {
    #[error("member key configured, keyed access required")]
    KeyRequired,

    #[error("database connection not initialized")]
    StorageNotInitialized,

    #[error("storage error: {0}")]
    Storage(RepositoryError),

    #[error("format error: {0}")]
    Format(#[from] FormatError),
}

impl From<RepositoryError> for CardListError {
    fn from(e: RepositoryError) -> Self {
        if e.is_not_initialized() {
            CardListError::StorageNotInitialized
        } else {
            CardListError::Storage(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_not_initialized_detected_by_variant_and_message() {
        assert!(RepositoryError::NotInitialized.is_not_initialized());
        assert!(
            RepositoryError::Query("pool: database connection not initialized".to_string())
                .is_not_initialized()
        );
        assert!(!RepositoryError::Connection.is_not_initialized());
        assert!(!RepositoryError::Query("no such table".to_string()).is_not_initialized());
    }

    #[test]
    fn test_card_list_error_from_repository_error() {
        let err: CardListError = RepositoryError::NotInitialized.into();
        assert!(matches!(err, CardListError::StorageNotInitialized));

        let err: CardListError = RepositoryError::Connection.into();
        assert!(matches!(err, CardListError::Storage(RepositoryError::Connection)));
    }
}
