//! The `RecordStore` and `CacheStore` traits.
//!
//! Both are implemented by storage backends (e.g. `brewstat-store-sqlite`, or
//! [`crate::cache::MemoryCache`]). The report layer depends on these
//! abstractions only, and performs no locking of its own: implementations
//! must be safe to share between concurrent callers.

use std::{future::Future, time::Duration};

use serde_json::{Map, Value};

/// An untyped record as read from a collection.
pub type Document = Map<String, Value>;

/// The raw collections readable through a [`RecordStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
  /// One document per check-in.
  Beers,
  /// One document per establishment.
  Breweries,
}

impl Collection {
  pub fn name(self) -> &'static str {
    match self {
      Self::Beers => "beers",
      Self::Breweries => "breweries",
    }
  }
}

// ─── Record store ────────────────────────────────────────────────────────────

/// Read-only access to the raw document collections.
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Return every document in `collection`, in a stable order.
  fn find_all(
    &self,
    collection: Collection,
  ) -> impl Future<Output = Result<Vec<Document>, Self::Error>> + Send + '_;
}

// ─── Cache store ─────────────────────────────────────────────────────────────

/// A key/value store with per-entry expiry.
///
/// Values are opaque blobs; writes always replace the whole value.
pub trait CacheStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch the blob stored under `key`, or `None` if absent or expired.
  fn get<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<Option<Vec<u8>>, Self::Error>> + Send + 'a;

  /// Store `blob` under `key`, valid for `ttl` from now.
  fn set<'a>(
    &'a self,
    key: &'a str,
    blob: Vec<u8>,
    ttl: Duration,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Drop every entry.
  fn flush_all(
    &self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
