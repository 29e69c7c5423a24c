use chrono::{DateTime, Utc};
use recall_core::{repair_all, Card, CollectionStore, StorageError, DEFAULT_COLLECTION};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Row, SqlitePool,
};
use std::path::Path;
use tracing::debug;

/// Collections live as JSON blobs, one row per key.
pub struct SqliteStore {
    pool: SqlitePool,
    key: String,
}

impl SqliteStore {
    pub async fn open_file(path: impl AsRef<Path>, key: &str) -> Result<Self, StorageError> {
        let opts = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .map_err(backend("sqlite connect"))?;
        Self::with_pool(pool, key).await
    }

    pub async fn open_memory() -> Result<Self, StorageError> {
        // A second connection would see a different in-memory database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(backend("sqlite connect"))?;
        Self::with_pool(pool, DEFAULT_COLLECTION).await
    }

    async fn with_pool(pool: SqlitePool, key: &str) -> Result<Self, StorageError> {
        let store = Self {
            pool,
            key: key.to_string(),
        };
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Another key in the same database.
    pub fn sibling(&self, key: &str) -> Self {
        Self {
            pool: self.pool.clone(),
            key: key.to_string(),
        }
    }

    async fn ensure_schema(&self) -> Result<(), StorageError> {
        const STMT: &str = r#"
        CREATE TABLE IF NOT EXISTS collections (
          name        TEXT PRIMARY KEY,
          body        TEXT NOT NULL,
          updated_at  TEXT NOT NULL
        )
        "#;
        sqlx::query(STMT)
            .execute(&self.pool)
            .await
            .map_err(backend("sqlite schema"))?;
        Ok(())
    }

    /// When this collection was last saved, if ever.
    pub async fn updated_at(&self) -> Result<Option<DateTime<Utc>>, StorageError> {
        let row = sqlx::query("SELECT updated_at FROM collections WHERE name=?")
            .bind(self.key.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(backend("read collection"))?;
        row.map(|r| dt_from_str(r.get::<String, _>("updated_at")))
            .transpose()
    }
}

#[async_trait::async_trait]
impl CollectionStore for SqliteStore {
    fn collection(&self) -> &str {
        &self.key
    }

    async fn load(&self) -> Result<Vec<Card>, StorageError> {
        let row = sqlx::query("SELECT body FROM collections WHERE name=?")
            .bind(self.key.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(backend("read collection"))?;
        let Some(row) = row else {
            return Ok(Vec::new());
        };
        let mut cards: Vec<Card> = serde_json::from_str(&row.get::<String, _>("body"))?;
        let repaired = repair_all(&mut cards);
        debug!(key = %self.key, cards = cards.len(), repaired, "loaded collection");
        Ok(cards)
    }

    async fn save(&self, cards: &[Card]) -> Result<(), StorageError> {
        let body = serde_json::to_string(cards)?;
        sqlx::query(
            "INSERT INTO collections (name,body,updated_at) VALUES (?,?,?) \
             ON CONFLICT(name) DO UPDATE SET body=excluded.body, updated_at=excluded.updated_at",
        )
        .bind(self.key.as_str())
        .bind(body)
        .bind(dt_to_str(Utc::now()))
        .execute(&self.pool)
        .await
        .map_err(backend("write collection"))?;
        debug!(key = %self.key, cards = cards.len(), "saved collection");
        Ok(())
    }
}

fn backend(what: &'static str) -> impl Fn(sqlx::Error) -> StorageError {
    move |e| StorageError::Backend(format!("{what}: {e}"))
}

fn dt_to_str(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn dt_from_str(s: String) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(&s)
        .map_err(|e| StorageError::Backend(format!("datetime: {e}")))
        .map(|dt| dt.with_timezone(&Utc))
}
