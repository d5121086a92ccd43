//! Error type for `brewstat-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// A stored document body parsed, but not as a JSON object.
  #[error("{collection} document at position {position} is not a JSON object")]
  NotAnObject {
    collection: &'static str,
    position:   i64,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
