//! Derived views, computed on demand from raw records, never stored except
//! in the cache.
//!
//! Every statistic uses `-1` ([`crate::record::UNRATED`]) when there is no
//! rated check-in to compute it from.

use serde::{Deserialize, Serialize};

/// Per-establishment check-in aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreweryView {
  pub id:                        String,
  pub name:                      String,
  #[serde(rename = "type")]
  pub kind:                      String,
  pub full_location:             String,
  /// Resolved from `full_location`; `"?"` if unrecognised.
  pub country:                   String,
  pub num_checkins:              u64,
  pub num_checkins_with_ratings: u64,
  pub avg_rating:                f64,
}

/// Per-country aggregate over the country's breweries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryView {
  pub name:          String,
  pub num_breweries: u64,
  pub num_checkins:  u64,
  /// Mean over every rated check-in at the country's breweries.
  pub avg_rating:    f64,
}

/// Per-style rating statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleView {
  pub name:          String,
  pub num_checkins:  u64,
  pub avg_rating:    f64,
  pub median_rating: f64,
  pub min_rating:    f64,
  pub max_rating:    f64,
}
