//! SQLite content repository implementation.
//!
//! Implements `ContentRepository` from `cardhub-core` using sqlx with split read/write pools.

use cardhub_core::repository::content::ContentRepository;
use cardhub_types::content::{ContentId, ContentItem, ContentKind};
use cardhub_types::error::RepositoryError;
use chrono::{DateTime, Utc};
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ContentRepository`.
///
/// Holds no pool when the server was started without a database URL; every
/// call then fails with `RepositoryError::NotInitialized`.
pub struct SqliteContentRepository {
    pool: Option<DatabasePool>,
}

impl SqliteContentRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool: Some(pool) }
    }

    /// Create a repository with no database behind it.
    pub fn uninitialized() -> Self {
        Self { pool: None }
    }

    fn pool(&self) -> Result<&DatabasePool, RepositoryError> {
        self.pool.as_ref().ok_or(RepositoryError::NotInitialized)
    }
}

impl From<Option<DatabasePool>> for SqliteContentRepository {
    fn from(pool: Option<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain ContentItem.
struct ContentRow {
    id: String,
    kind: String,
    name: String,
    description: String,
    tags: String,
    data: String,
    created_at: String,
    updated_at: String,
}

impl ContentRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            kind: row.try_get("kind")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            tags: row.try_get("tags")?,
            data: row.try_get("data")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_item(self) -> Result<ContentItem, RepositoryError> {
        let id = self
            .id
            .parse::<ContentId>()
            .map_err(|e| RepositoryError::Query(format!("invalid content id: {e}")))?;

        let kind: ContentKind = self.kind.parse().map_err(RepositoryError::Query)?;

        let tags: Vec<String> = serde_json::from_str(&self.tags)
            .map_err(|e| RepositoryError::Query(format!("invalid tags JSON: {e}")))?;

        let data: serde_json::Value = serde_json::from_str(&self.data)
            .map_err(|e| RepositoryError::Query(format!("invalid data JSON: {e}")))?;

        Ok(ContentItem {
            id,
            kind,
            name: self.name,
            description: self.description,
            tags,
            data,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

impl ContentRepository for SqliteContentRepository {
    async fn list_by_kind(&self, kind: ContentKind) -> Result<Vec<ContentItem>, RepositoryError> {
        let pool = self.pool()?;

        let rows = sqlx::query("SELECT * FROM contents WHERE kind = ? ORDER BY created_at ASC, id ASC")
            .bind(kind.as_str())
            .fetch_all(&pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            let content_row =
                ContentRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            items.push(content_row.into_item()?);
        }

        Ok(items)
    }

    async fn create(&self, item: &ContentItem) -> Result<ContentItem, RepositoryError> {
        let pool = self.pool()?;

        let tags_json =
            serde_json::to_string(&item.tags).map_err(|e| RepositoryError::Query(e.to_string()))?;
        let data_json =
            serde_json::to_string(&item.data).map_err(|e| RepositoryError::Query(e.to_string()))?;

        let result = sqlx::query(
            "INSERT INTO contents (id, kind, name, description, tags, data, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(item.id.to_string())
        .bind(item.kind.as_str())
        .bind(&item.name)
        .bind(&item.description)
        .bind(&tags_json)
        .bind(&data_json)
        .bind(format_datetime(&item.created_at))
        .bind(format_datetime(&item.updated_at))
        .execute(&pool.writer)
        .await;

        match result {
            Ok(_) => Ok(item.clone()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => Err(
                RepositoryError::Conflict(format!("content '{}' already exists", item.id)),
            ),
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }
}
