//! [`MemoryCache`]: an in-process [`CacheStore`] with per-entry expiry.

use std::{
  collections::HashMap,
  convert::Infallible,
  sync::{Arc, Mutex, PoisonError},
  time::Duration,
};

use chrono::{DateTime, TimeDelta, Utc};

use crate::store::CacheStore;

// ─── Clock ───────────────────────────────────────────────────────────────────

/// Source of the current time for expiry checks.
pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> { Utc::now() }
}

/// `now + ttl`, saturating at the far future for absurd TTLs.
pub fn expiry(now: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
  TimeDelta::from_std(ttl)
    .ok()
    .and_then(|delta| now.checked_add_signed(delta))
    .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

// ─── Cache ───────────────────────────────────────────────────────────────────

struct Entry {
  blob:       Vec<u8>,
  expires_at: DateTime<Utc>,
}

/// A mutex-guarded map of blobs. Cloning is cheap and clones share entries.
#[derive(Clone)]
pub struct MemoryCache<K = SystemClock> {
  entries: Arc<Mutex<HashMap<String, Entry>>>,
  clock:   K,
}

impl MemoryCache {
  pub fn new() -> Self { Self::with_clock(SystemClock) }
}

impl Default for MemoryCache {
  fn default() -> Self { Self::new() }
}

impl<K: Clock> MemoryCache<K> {
  pub fn with_clock(clock: K) -> Self {
    Self { entries: Arc::new(Mutex::new(HashMap::new())), clock }
  }

  /// Number of stored entries, expired or not.
  pub fn len(&self) -> usize { self.lock().len() }

  pub fn is_empty(&self) -> bool { self.len() == 0 }

  /// Whether a live entry exists under `key`.
  pub fn contains(&self, key: &str) -> bool {
    let now = self.clock.now();
    self.lock().get(key).is_some_and(|e| e.expires_at > now)
  }

  fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Entry>> {
    // A panicking writer cannot leave a half-written entry behind; every
    // mutation is a single insert or remove.
    self.entries.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl<K: Clock> CacheStore for MemoryCache<K> {
  type Error = Infallible;

  async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Infallible> {
    let now = self.clock.now();
    let mut entries = self.lock();
    if let Some(e) = entries.get(key) {
      if e.expires_at > now {
        return Ok(Some(e.blob.clone()));
      }
      entries.remove(key);
    }
    Ok(None)
  }

  async fn set(&self, key: &str, blob: Vec<u8>, ttl: Duration) -> Result<(), Infallible> {
    let expires_at = expiry(self.clock.now(), ttl);
    self.lock().insert(key.to_owned(), Entry { blob, expires_at });
    Ok(())
  }

  async fn flush_all(&self) -> Result<(), Infallible> {
    self.lock().clear();
    Ok(())
  }
}
