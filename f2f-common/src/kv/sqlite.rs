//! SQLite-backed key-value store
//!
//! One `kv_store` table keyed by string. The database file and its parent
//! directory are created on first open.

use super::KeyValueStore;
use crate::Result;
use async_trait::async_trait;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone)]
pub struct SqliteKvStore {
    pool: SqlitePool,
}

impl SqliteKvStore {
    /// Open (or create) the database at `db_path`
    pub async fn open(db_path: &Path) -> Result<Self> {
        let newly_created = !db_path.exists();

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect(&db_url)
            .await?;

        if newly_created {
            info!("Initialized new database: {}", db_path.display());
        } else {
            info!("Opened existing database: {}", db_path.display());
        }

        // WAL keeps readers from blocking the single writer
        sqlx::query("PRAGMA journal_mode = WAL")
            .execute(&pool)
            .await?;
        sqlx::query("PRAGMA busy_timeout = 5000")
            .execute(&pool)
            .await?;

        Self::from_pool(pool).await
    }

    /// Private in-memory database, gone when the store is dropped
    pub async fn in_memory() -> Result<Self> {
        // A second connection would see a different empty database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self> {
        create_kv_table(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

async fn create_kv_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

#[async_trait]
impl KeyValueStore for SqliteKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let value: Option<(String,)> = sqlx::query_as("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value.map(|(v,)| v))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO kv_store (key, value, updated_at)
            VALUES (?, ?, CURRENT_TIMESTAMP)
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove(&self, keys: &[&str]) -> Result<()> {
        for key in keys {
            sqlx::query("DELETE FROM kv_store WHERE key = ?")
                .bind(*key)
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_roundtrip() {
        let store = SqliteKvStore::in_memory().await.unwrap();
        assert_eq!(store.get("favorites").await.unwrap(), None);

        store.set("favorites", r#"["1"]"#).await.unwrap();
        store.set("favorites", r#"["1","2"]"#).await.unwrap();
        assert_eq!(
            store.get("favorites").await.unwrap().as_deref(),
            Some(r#"["1","2"]"#)
        );

        store.remove(&["favorites", "absent"]).await.unwrap();
        assert_eq!(store.get("favorites").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("data").join("kv.db");

        {
            let store = SqliteKvStore::open(&db_path).await.unwrap();
            store.set("isInitialized", "true").await.unwrap();
            store.pool().close().await;
        }

        assert!(db_path.exists());
        let reopened = SqliteKvStore::open(&db_path).await.unwrap();
        assert_eq!(
            reopened.get("isInitialized").await.unwrap().as_deref(),
            Some("true")
        );
    }
}
