use anyhow::Result;
use sqlx::{sqlite::SqliteRow, Pool, Row, Sqlite};

use crate::models::*;

fn map_row(row: &SqliteRow) -> PortCacheEntry {
    PortCacheEntry {
        key: row.get("cache_key"),
        switch_id: row.get("switch_id"),
        port_number: row.get::<i64, _>("port_number") as u32,
        value: row.get("value"),
        updated_at: row.get("updated_at"),
    }
}

const SELECT_PORT_CACHE: &str =
    "SELECT cache_key, switch_id, port_number, value, updated_at FROM port_cache";

pub struct PortCacheRepo;

impl PortCacheRepo {
    /// Raw stored value for a key
    pub async fn get_value(pool: &Pool<Sqlite>, key: &str) -> Result<Option<String>> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM port_cache WHERE cache_key = ?")
            .bind(key)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(|(v,)| v))
    }

    pub async fn get(pool: &Pool<Sqlite>, key: &str) -> Result<Option<PortCacheEntry>> {
        let row = sqlx::query(&format!("{} WHERE cache_key = ?", SELECT_PORT_CACHE))
            .bind(key)
            .fetch_optional(pool)
            .await?;
        Ok(row.as_ref().map(map_row))
    }

    /// List all entries for a normalized switch id, ordered by port
    pub async fn list_for_switch(pool: &Pool<Sqlite>, switch_id: &str) -> Result<Vec<PortCacheEntry>> {
        let rows = sqlx::query(&format!(
            "{} WHERE switch_id = ? ORDER BY port_number",
            SELECT_PORT_CACHE
        ))
        .bind(switch_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.iter().map(map_row).collect())
    }

    /// Upsert an entry; the value is stored verbatim
    pub async fn put(
        pool: &Pool<Sqlite>,
        key: &str,
        switch_id: &str,
        port_number: u32,
        value: &str,
    ) -> Result<PortCacheEntry> {
        let now = chrono::Utc::now();
        sqlx::query(
            r#"
            INSERT INTO port_cache (cache_key, switch_id, port_number, value, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(cache_key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(switch_id)
        .bind(port_number as i64)
        .bind(value)
        .bind(now)
        .execute(pool)
        .await?;

        let row = sqlx::query(&format!("{} WHERE cache_key = ?", SELECT_PORT_CACHE))
            .bind(key)
            .fetch_one(pool)
            .await?;

        Ok(map_row(&row))
    }

    /// Delete an entry, returning whether a row was removed
    pub async fn delete(pool: &Pool<Sqlite>, key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM port_cache WHERE cache_key = ?")
            .bind(key)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
