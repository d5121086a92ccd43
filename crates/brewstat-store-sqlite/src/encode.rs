//! Conversions between domain values and their SQLite column encodings.
//!
//! Document bodies are compact JSON text. Expiry instants are unix epoch
//! milliseconds so they compare numerically in SQL.

use std::time::Duration;

use brewstat_core::{
  cache::expiry,
  store::{Collection, Document},
};
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::{Error, Result};

// ─── Documents ───────────────────────────────────────────────────────────────

pub fn encode_document(doc: &Document) -> Result<String> {
  Ok(serde_json::to_string(doc)?)
}

/// A raw `documents` row.
pub struct RawDocument {
  pub position: i64,
  pub body:     String,
}

impl RawDocument {
  pub fn into_document(self, collection: Collection) -> Result<Document> {
    match serde_json::from_str(&self.body)? {
      Value::Object(map) => Ok(map),
      _ => Err(Error::NotAnObject {
        collection: collection.name(),
        position:   self.position,
      }),
    }
  }
}

// ─── Expiry ──────────────────────────────────────────────────────────────────

pub fn encode_instant(at: DateTime<Utc>) -> i64 { at.timestamp_millis() }

/// The encoded instant `ttl` after `now`.
pub fn encode_expiry(now: DateTime<Utc>, ttl: Duration) -> i64 {
  encode_instant(expiry(now, ttl))
}
