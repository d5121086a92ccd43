//! Error types for `brewstat-core`.

use thiserror::Error;

use crate::codec::CodecError;

/// A boxed error from a storage backend.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Why a raw document could not be read as a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
  #[error("missing field `{0}`")]
  Missing(&'static str),

  #[error("field `{field}` is not a {expected}")]
  WrongType {
    field:    &'static str,
    expected: &'static str,
  },
}

#[derive(Debug, Error)]
pub enum Error {
  /// A document from the record store lacks a required field. The whole
  /// report fails rather than silently skewing its counts.
  #[error("malformed {collection} document at position {index}: {source}")]
  MalformedDocument {
    collection: &'static str,
    index:      usize,
    #[source]
    source:     FieldError,
  },

  #[error("record store error: {0}")]
  RecordStore(#[source] BoxError),

  #[error("cache store error: {0}")]
  CacheStore(#[source] BoxError),

  #[error("cache codec error: {0}")]
  Codec(#[from] CodecError),
}

impl Error {
  /// `true` if the failure came from an unreachable or failing backend rather
  /// than from bad data.
  pub fn is_unavailable(&self) -> bool {
    matches!(self, Self::RecordStore(_) | Self::CacheStore(_))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
