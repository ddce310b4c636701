mod port_cache;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};

use crate::cache::{port_cache_key, PortCache};
use crate::models::*;
use crate::utils::normalize_switch_id;

/// Typed error for "resource not found" — enables reliable downcast
/// in the API error handler instead of fragile string matching.
#[derive(Debug)]
pub struct NotFoundError {
    pub resource: String,
    pub id: String,
}

impl NotFoundError {
    pub fn new(resource: &str, id: &str) -> Self {
        Self {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }
}

impl std::fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} not found: {}", self.resource, self.id)
    }
}

impl std::error::Error for NotFoundError {}

/// Store handles all database operations, delegating to per-entity repo modules.
#[derive(Clone)]
pub struct Store {
    pool: Pool<Sqlite>,
}

impl Store {
    /// Create a new database store with a specific pool size
    pub async fn with_pool_size(db_path: &str, max_connections: u32) -> Result<Self> {
        let db_url = format!("sqlite:{}?mode=rwc", db_path);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(&db_url)
            .await
            .context("Failed to connect to database")?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Private in-memory database on a single long-lived connection
    #[cfg(test)]
    pub async fn in_memory() -> Result<Self> {
        use sqlx::sqlite::SqliteConnectOptions;
        use std::str::FromStr;

        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("Failed to open in-memory database")?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Run database migrations
    async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    // ========== Port Cache Operations ==========

    pub async fn get_port_cache_entry(&self, switch_id: &str, port_number: u32) -> Result<PortCacheEntry> {
        let key = port_cache_key(switch_id, &port_number.to_string());
        port_cache::PortCacheRepo::get(&self.pool, &key)
            .await?
            .ok_or_else(|| NotFoundError::new("Port cache entry", &key).into())
    }

    pub async fn list_port_cache_entries(&self, switch_id: &str) -> Result<Vec<PortCacheEntry>> {
        port_cache::PortCacheRepo::list_for_switch(&self.pool, &normalize_switch_id(switch_id)).await
    }

    /// Store a serialized record for a switch port under its normalized key
    pub async fn put_port_cache_entry(&self, switch_id: &str, port_number: u32, value: &str) -> Result<PortCacheEntry> {
        let key = port_cache_key(switch_id, &port_number.to_string());
        port_cache::PortCacheRepo::put(&self.pool, &key, &normalize_switch_id(switch_id), port_number, value).await
    }

    pub async fn delete_port_cache_entry(&self, switch_id: &str, port_number: u32) -> Result<()> {
        let key = port_cache_key(switch_id, &port_number.to_string());
        if !port_cache::PortCacheRepo::delete(&self.pool, &key).await? {
            return Err(NotFoundError::new("Port cache entry", &key).into());
        }
        Ok(())
    }
}

#[async_trait]
impl PortCache for Store {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        port_cache::PortCacheRepo::get_value(&self.pool, key).await
    }
}
