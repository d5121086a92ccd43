//! [`ReportService`]: cache-aside access to the four report kinds.
//!
//! Each report is looked up in the cache under its own key. On a miss (absent,
//! expired, or unreadable entry) it is recomputed from scratch, fetching any
//! report it depends on through the same cache, and stored with the service's
//! TTL. Dependencies:
//!
//! ```text
//! checkins  <- record store "beers"
//! breweries <- checkins + record store "breweries"
//! countries <- breweries
//! styles    <- checkins
//! ```
//!
//! Concurrent misses on the same key are not coalesced: each caller computes
//! and writes, and the last write wins. The computation is deterministic over
//! the store's contents, so the duplicate work is harmless.

use std::{fmt, future::Future, str::FromStr, time::Duration};

use serde::{Serialize, de::DeserializeOwned};

use crate::{
  Error, Result,
  aggregate::{derive_breweries, derive_countries, derive_styles},
  codec,
  record::{CheckIn, Establishment},
  store::{CacheStore, Collection, Document, RecordStore},
  view::{BreweryView, CountryView, StyleView},
};

/// How long a computed report stays valid unless configured otherwise.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

// ─── Report kinds ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
  CheckIns,
  Breweries,
  Countries,
  Styles,
}

impl ReportKind {
  pub const ALL: [Self; 4] =
    [Self::CheckIns, Self::Breweries, Self::Countries, Self::Styles];

  /// The cache key the report is stored under.
  pub fn cache_key(self) -> &'static str {
    match self {
      Self::CheckIns => "beer_list",
      Self::Breweries => "brewery_list",
      Self::Countries => "country_list",
      Self::Styles => "style_list",
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::CheckIns => "checkins",
      Self::Breweries => "breweries",
      Self::Countries => "countries",
      Self::Styles => "styles",
    }
  }
}

impl fmt::Display for ReportKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown report kind: {0:?}")]
pub struct UnknownReportKind(pub String);

impl FromStr for ReportKind {
  type Err = UnknownReportKind;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|k| k.as_str() == s)
      .ok_or_else(|| UnknownReportKind(s.to_owned()))
  }
}

/// A materialised report of any kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
  CheckIns(Vec<CheckIn>),
  Breweries(Vec<BreweryView>),
  Countries(Vec<CountryView>),
  Styles(Vec<StyleView>),
}

impl Report {
  pub fn kind(&self) -> ReportKind {
    match self {
      Self::CheckIns(_) => ReportKind::CheckIns,
      Self::Breweries(_) => ReportKind::Breweries,
      Self::Countries(_) => ReportKind::Countries,
      Self::Styles(_) => ReportKind::Styles,
    }
  }

  pub fn len(&self) -> usize {
    match self {
      Self::CheckIns(v) => v.len(),
      Self::Breweries(v) => v.len(),
      Self::Countries(v) => v.len(),
      Self::Styles(v) => v.len(),
    }
  }

  pub fn is_empty(&self) -> bool { self.len() == 0 }
}

// ─── Service ─────────────────────────────────────────────────────────────────

/// Serves reports from `cache`, computing them from `records` on a miss.
///
/// Holds no state besides the two handles; share it freely between tasks.
pub struct ReportService<R, C> {
  records: R,
  cache:   C,
  ttl:     Duration,
}

impl<R: RecordStore, C: CacheStore> ReportService<R, C> {
  pub fn new(records: R, cache: C) -> Self {
    Self { records, cache, ttl: DEFAULT_TTL }
  }

  /// Override how long stored reports stay valid.
  pub fn with_ttl(mut self, ttl: Duration) -> Self {
    self.ttl = ttl;
    self
  }

  pub fn ttl(&self) -> Duration { self.ttl }

  pub fn records(&self) -> &R { &self.records }

  pub fn cache(&self) -> &C { &self.cache }

  // ── Reports ─────────────────────────────────────────────────────────────

  /// Every raw check-in.
  pub async fn checkins(&self) -> Result<Vec<CheckIn>> {
    self
      .cached(ReportKind::CheckIns, || self.load_checkins())
      .await
  }

  /// One view per establishment.
  pub async fn breweries(&self) -> Result<Vec<BreweryView>> {
    self
      .cached(ReportKind::Breweries, || self.compute_breweries())
      .await
  }

  /// One view per resolved country.
  pub async fn countries(&self) -> Result<Vec<CountryView>> {
    self
      .cached(ReportKind::Countries, || self.compute_countries())
      .await
  }

  /// One view per beer style.
  pub async fn styles(&self) -> Result<Vec<StyleView>> {
    self
      .cached(ReportKind::Styles, || self.compute_styles())
      .await
  }

  /// Fetch the report named by `kind`.
  pub async fn report(&self, kind: ReportKind) -> Result<Report> {
    Ok(match kind {
      ReportKind::CheckIns => Report::CheckIns(self.checkins().await?),
      ReportKind::Breweries => Report::Breweries(self.breweries().await?),
      ReportKind::Countries => Report::Countries(self.countries().await?),
      ReportKind::Styles => Report::Styles(self.styles().await?),
    })
  }

  /// Drop every cached report; the next request for each recomputes it.
  pub async fn flush_cache(&self) -> Result<()> {
    self
      .cache
      .flush_all()
      .await
      .map_err(|e| Error::CacheStore(Box::new(e)))?;
    tracing::info!("report cache flushed");
    Ok(())
  }

  // ── Computation ─────────────────────────────────────────────────────────

  async fn load_checkins(&self) -> Result<Vec<CheckIn>> {
    let docs = self.find_all(Collection::Beers).await?;
    docs
      .iter()
      .enumerate()
      .map(|(i, doc)| CheckIn::from_document(i, doc))
      .collect()
  }

  async fn compute_breweries(&self) -> Result<Vec<BreweryView>> {
    let checkins = self.checkins().await?;
    let establishments = self.establishments().await?;
    Ok(derive_breweries(&establishments, &checkins))
  }

  async fn compute_countries(&self) -> Result<Vec<CountryView>> {
    let breweries = self.breweries().await?;
    Ok(derive_countries(&breweries))
  }

  async fn compute_styles(&self) -> Result<Vec<StyleView>> {
    let checkins = self.checkins().await?;
    Ok(derive_styles(&checkins))
  }

  // ── Internals ───────────────────────────────────────────────────────────

  async fn establishments(&self) -> Result<Vec<Establishment>> {
    let docs = self.find_all(Collection::Breweries).await?;
    docs
      .iter()
      .enumerate()
      .map(|(i, doc)| Establishment::from_document(i, doc))
      .collect()
  }

  async fn find_all(&self, collection: Collection) -> Result<Vec<Document>> {
    self
      .records
      .find_all(collection)
      .await
      .map_err(|e| Error::RecordStore(Box::new(e)))
  }

  async fn cached<T, F, Fut>(&self, kind: ReportKind, compute: F) -> Result<T>
  where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
  {
    let key = kind.cache_key();
    let hit = self
      .cache
      .get(key)
      .await
      .map_err(|e| Error::CacheStore(Box::new(e)))?;

    if let Some(blob) = hit {
      match codec::decode(kind, &blob) {
        Ok(value) => {
          tracing::debug!(report = %kind, "cache hit");
          return Ok(value);
        }
        Err(e) => {
          tracing::warn!(report = %kind, error = %e, "discarding unreadable cache entry");
        }
      }
    } else {
      tracing::debug!(report = %kind, "cache miss");
    }

    let value = compute().await?;
    let blob = codec::encode(kind, &value)?;
    self
      .cache
      .set(key, blob, self.ttl)
      .await
      .map_err(|e| Error::CacheStore(Box::new(e)))?;
    tracing::debug!(report = %kind, ttl_secs = self.ttl.as_secs(), "report cached");

    Ok(value)
  }
}
