//! Cache wire format.
//!
//! Each cached report is a UTF-8 JSON envelope:
//!
//! ```json
//! {"schema_version": 1, "kind": "styles", "payload": [ ... ]}
//! ```
//!
//! A reader accepts only its own [`CACHE_SCHEMA_VERSION`] and the kind it
//! asked for. Bump the version whenever a view's serialised shape changes;
//! older entries then decode as errors and are recomputed.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::report::ReportKind;

pub const CACHE_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum CodecError {
  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("schema version {found} does not match {expected}")]
  SchemaVersion { found: u32, expected: u32 },

  #[error("entry holds a {found:?} report, expected {expected:?}")]
  KindMismatch {
    found:    String,
    expected: &'static str,
  },
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
  schema_version: u32,
  kind:           &'a str,
  payload:        &'a T,
}

#[derive(Deserialize)]
struct Header {
  schema_version: u32,
  kind:           String,
}

#[derive(Deserialize)]
struct Envelope<T> {
  payload: T,
}

/// Serialise `value` as a `kind` report.
pub fn encode<T: Serialize>(kind: ReportKind, value: &T) -> Result<Vec<u8>, CodecError> {
  Ok(serde_json::to_vec(&EnvelopeRef {
    schema_version: CACHE_SCHEMA_VERSION,
    kind:           kind.as_str(),
    payload:        value,
  })?)
}

/// Deserialise a blob written by [`encode`] for the same `kind`.
pub fn decode<T: DeserializeOwned>(kind: ReportKind, blob: &[u8]) -> Result<T, CodecError> {
  let header: Header = serde_json::from_slice(blob)?;
  if header.schema_version != CACHE_SCHEMA_VERSION {
    return Err(CodecError::SchemaVersion {
      found:    header.schema_version,
      expected: CACHE_SCHEMA_VERSION,
    });
  }
  if header.kind != kind.as_str() {
    return Err(CodecError::KindMismatch {
      found:    header.kind,
      expected: kind.as_str(),
    });
  }
  let envelope: Envelope<T> = serde_json::from_slice(blob)?;
  Ok(envelope.payload)
}
