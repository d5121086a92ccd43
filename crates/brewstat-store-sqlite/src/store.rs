//! [`SqliteStore`]: the SQLite implementation of [`RecordStore`].

use std::path::Path;

use brewstat_core::store::{Collection, Document, RecordStore};

use crate::{
  Result,
  encode::{RawDocument, encode_document},
  schema::RECORDS_SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// Raw check-in and establishment documents backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(RECORDS_SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Append `docs` to `collection`, after any documents already there.
  ///
  /// Used by loaders and fixtures; the report layer itself never writes
  /// records. Returns the number of documents inserted.
  pub async fn insert_documents(
    &self,
    collection: Collection,
    docs:       &[Document],
  ) -> Result<usize> {
    let name   = collection.name();
    let bodies = docs.iter().map(encode_document).collect::<Result<Vec<_>>>()?;

    let inserted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let next: i64 = tx.query_row(
          "SELECT COALESCE(MAX(position) + 1, 0) FROM documents WHERE collection = ?1",
          rusqlite::params![name],
          |r| r.get(0),
        )?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO documents (collection, position, body) VALUES (?1, ?2, ?3)",
          )?;
          for (offset, body) in bodies.iter().enumerate() {
            stmt.execute(rusqlite::params![name, next + offset as i64, body])?;
          }
        }
        tx.commit()?;
        Ok(bodies.len())
      })
      .await?;

    tracing::debug!(collection = name, inserted, "documents loaded");
    Ok(inserted)
  }

  /// Number of documents in `collection`.
  pub async fn count(&self, collection: Collection) -> Result<u64> {
    let name = collection.name();
    let n: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*) FROM documents WHERE collection = ?1",
          rusqlite::params![name],
          |r| r.get(0),
        )?)
      })
      .await?;
    Ok(n.max(0) as u64)
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = crate::Error;

  async fn find_all(&self, collection: Collection) -> Result<Vec<Document>> {
    let name = collection.name();

    let raws: Vec<RawDocument> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT position, body FROM documents WHERE collection = ?1 ORDER BY position",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![name], |row| {
            Ok(RawDocument {
              position: row.get(0)?,
              body:     row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(|raw| raw.into_document(collection))
      .collect()
  }
}
