//! [`SqliteCache`]: a [`CacheStore`] persisted in SQLite.
//!
//! Unlike [`brewstat_core::cache::MemoryCache`], entries survive restarts and
//! can be shared by several server processes pointing at the same file.

use std::{path::Path, time::Duration};

use brewstat_core::store::CacheStore;
use chrono::Utc;
use rusqlite::OptionalExtension as _;

use crate::{
  Result,
  encode::{encode_expiry, encode_instant},
  schema::CACHE_SCHEMA,
};

/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteCache {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteCache {
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let cache = Self { conn };
    cache.init_schema().await?;
    Ok(cache)
  }

  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let cache = Self { conn };
    cache.init_schema().await?;
    Ok(cache)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(CACHE_SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

impl CacheStore for SqliteCache {
  type Error = crate::Error;

  async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
    let key = key.to_owned();
    let now = encode_instant(Utc::now());

    let row: Option<(Vec<u8>, i64)> = self
      .conn
      .call(move |conn| {
        let row: Option<(Vec<u8>, i64)> = conn
          .query_row(
            "SELECT blob, expires_at FROM cache_entries WHERE key = ?1",
            rusqlite::params![key],
            |r| Ok((r.get(0)?, r.get(1)?)),
          )
          .optional()?;

        if let Some((_, expires_at)) = &row
          && *expires_at <= now
        {
          conn.execute(
            "DELETE FROM cache_entries WHERE key = ?1 AND expires_at <= ?2",
            rusqlite::params![key, now],
          )?;
          return Ok(None);
        }
        Ok(row)
      })
      .await?;

    Ok(row.map(|(blob, _)| blob))
  }

  async fn set(&self, key: &str, blob: Vec<u8>, ttl: Duration) -> Result<()> {
    let key        = key.to_owned();
    let expires_at = encode_expiry(Utc::now(), ttl);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR REPLACE INTO cache_entries (key, blob, expires_at) VALUES (?1, ?2, ?3)",
          rusqlite::params![key, blob, expires_at],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn flush_all(&self) -> Result<()> {
    let removed = self
      .conn
      .call(|conn| Ok(conn.execute("DELETE FROM cache_entries", [])?))
      .await?;
    tracing::debug!(removed, "sqlite cache flushed");
    Ok(())
  }
}
