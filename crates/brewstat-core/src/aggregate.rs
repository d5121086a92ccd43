//! The aggregation engine: pure transforms from raw records to derived views.
//!
//! Every transform is total over well-formed input, including empty input.
//! Unrated check-ins count toward `num_checkins` only and never enter an
//! average, median, minimum, or maximum.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::{
  country::resolve_country,
  record::{CheckIn, Establishment, UNRATED},
  view::{BreweryView, CountryView, StyleView},
};

// ─── Rating statistics ───────────────────────────────────────────────────────

/// Summary statistics over a set of real ratings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingStats {
  pub count:  u64,
  pub mean:   f64,
  pub median: f64,
  pub min:    f64,
  pub max:    f64,
}

impl RatingStats {
  /// All statistics set to the unrated sentinel.
  pub const EMPTY: Self = Self {
    count:  0,
    mean:   UNRATED,
    median: UNRATED,
    min:    UNRATED,
    max:    UNRATED,
  };

  /// Compute statistics over `ratings`, which must already exclude the
  /// sentinel. An empty input yields [`RatingStats::EMPTY`].
  pub fn from_ratings(mut ratings: Vec<f64>) -> Self {
    if ratings.is_empty() {
      return Self::EMPTY;
    }
    ratings.sort_by(f64::total_cmp);

    let n = ratings.len();
    let mid = n / 2;
    let median = if n % 2 == 0 {
      (ratings[mid - 1] + ratings[mid]) / 2.0
    } else {
      ratings[mid]
    };

    Self {
      count: n as u64,
      mean: ratings.iter().sum::<f64>() / n as f64,
      median,
      min: ratings[0],
      max: ratings[n - 1],
    }
  }
}

fn rated(checkins: &[&CheckIn]) -> Vec<f64> {
  checkins
    .iter()
    .filter(|c| c.is_rated())
    .map(|c| c.rating)
    .collect()
}

// ─── Breweries ───────────────────────────────────────────────────────────────

/// One [`BreweryView`] per establishment, in input order, whether or not it
/// has any check-ins.
pub fn derive_breweries(
  establishments: &[Establishment],
  checkins: &[CheckIn],
) -> Vec<BreweryView> {
  let mut by_brewery: HashMap<&str, Vec<&CheckIn>> = HashMap::new();
  for checkin in checkins {
    by_brewery
      .entry(checkin.brewery_id.as_str())
      .or_default()
      .push(checkin);
  }

  let views: Vec<BreweryView> = establishments
    .iter()
    .map(|e| {
      let group = by_brewery.get(e.id.as_str()).map(Vec::as_slice).unwrap_or(&[]);
      let stats = RatingStats::from_ratings(rated(group));
      BreweryView {
        id:                        e.id.clone(),
        name:                      e.name.clone(),
        kind:                      e.kind.clone(),
        full_location:             e.full_location.clone(),
        country:                   resolve_country(&e.full_location).to_owned(),
        num_checkins:              group.len() as u64,
        num_checkins_with_ratings: stats.count,
        avg_rating:                stats.mean,
      }
    })
    .collect();

  let attributed: u64 = views.iter().map(|v| v.num_checkins).sum();
  let orphaned = (checkins.len() as u64).saturating_sub(attributed);
  if orphaned > 0 {
    tracing::debug!(orphaned, "check-ins reference no known establishment");
  }

  views
}

// ─── Countries ───────────────────────────────────────────────────────────────

#[derive(Default)]
struct CountryAcc<'a> {
  breweries:    BTreeSet<&'a str>,
  checkins:     u64,
  rated:        u64,
  rating_total: f64,
}

/// One [`CountryView`] per distinct `country`, including the unknown group,
/// sorted by name.
pub fn derive_countries(breweries: &[BreweryView]) -> Vec<CountryView> {
  let mut by_country: BTreeMap<&str, CountryAcc<'_>> = BTreeMap::new();
  for b in breweries {
    let acc = by_country.entry(b.country.as_str()).or_default();
    // Views sharing an id carry the same check-ins; count them once.
    if !acc.breweries.insert(b.id.as_str()) {
      continue;
    }
    acc.checkins += b.num_checkins;
    if b.num_checkins_with_ratings > 0 {
      acc.rated += b.num_checkins_with_ratings;
      acc.rating_total += b.avg_rating * b.num_checkins_with_ratings as f64;
    }
  }

  by_country
    .into_iter()
    .map(|(name, acc)| CountryView {
      name:          name.to_owned(),
      num_breweries: acc.breweries.len() as u64,
      num_checkins:  acc.checkins,
      avg_rating:    if acc.rated == 0 {
        UNRATED
      } else {
        acc.rating_total / acc.rated as f64
      },
    })
    .collect()
}

// ─── Styles ──────────────────────────────────────────────────────────────────

/// One [`StyleView`] per distinct style string, sorted by name.
pub fn derive_styles(checkins: &[CheckIn]) -> Vec<StyleView> {
  let mut by_style: BTreeMap<&str, Vec<&CheckIn>> = BTreeMap::new();
  for checkin in checkins {
    by_style.entry(checkin.style.as_str()).or_default().push(checkin);
  }

  by_style
    .into_iter()
    .map(|(name, group)| {
      let stats = RatingStats::from_ratings(rated(&group));
      StyleView {
        name:          name.to_owned(),
        num_checkins:  group.len() as u64,
        avg_rating:    stats.mean,
        median_rating: stats.median,
        min_rating:    stats.min,
        max_rating:    stats.max,
      }
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::country::UNKNOWN_COUNTRY;

  fn checkin(brewery_id: &str, style: &str, rating: f64) -> CheckIn {
    CheckIn {
      brewery_id: brewery_id.into(),
      style:      style.into(),
      rating,
    }
  }

  fn establishment(id: &str, full_location: &str) -> Establishment {
    Establishment {
      id:            id.into(),
      name:          format!("Brewery {id}"),
      kind:          "Micro Brewery".into(),
      full_location: full_location.into(),
    }
  }

  // ── Rating statistics ───────────────────────────────────────────────────

  #[test]
  fn median_of_even_count_averages_middle_pair() {
    let stats = RatingStats::from_ratings(vec![4.0, 1.0, 3.0, 2.0]);
    assert_eq!(stats.median, 2.5);
    assert_eq!(stats.min, 1.0);
    assert_eq!(stats.max, 4.0);
    assert_eq!(stats.mean, 2.5);
    assert_eq!(stats.count, 4);
  }

  #[test]
  fn median_of_odd_count_is_middle_value() {
    let stats = RatingStats::from_ratings(vec![5.0, 1.0, 3.5]);
    assert_eq!(stats.median, 3.5);
  }

  #[test]
  fn empty_ratings_are_all_sentinel() {
    assert_eq!(RatingStats::from_ratings(vec![]), RatingStats::EMPTY);
  }

  // ── Breweries ───────────────────────────────────────────────────────────

  #[test]
  fn brewery_without_checkins_is_still_reported() {
    let views = derive_breweries(&[establishment("b9", "Oslo, Norway")], &[]);
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].num_checkins, 0);
    assert_eq!(views[0].num_checkins_with_ratings, 0);
    assert_eq!(views[0].avg_rating, UNRATED);
    assert_eq!(views[0].country, "Norway");
  }

  #[test]
  fn unrated_checkins_count_but_do_not_rate() {
    let views = derive_breweries(
      &[establishment("b1", "Portland, OR, United States")],
      &[
        checkin("b1", "IPA", UNRATED),
        checkin("b1", "IPA", UNRATED),
        checkin("b1", "Stout", UNRATED),
      ],
    );
    assert_eq!(views[0].num_checkins, 3);
    assert_eq!(views[0].num_checkins_with_ratings, 0);
    assert_eq!(views[0].avg_rating, UNRATED);
  }

  #[test]
  fn checkin_counts_are_conserved() {
    let establishments = vec![
      establishment("a", "Munich, Germany"),
      establishment("b", "Brussels, Belgium"),
      establishment("c", "Nowhere in particular"),
    ];
    let checkins = vec![
      checkin("a", "Helles", 3.5),
      checkin("a", "Dunkel", UNRATED),
      checkin("b", "Tripel", 4.25),
      checkin("c", "Lager", 2.0),
      checkin("zzz", "Lager", 1.0),
    ];

    let views = derive_breweries(&establishments, &checkins);
    let total: u64 = views.iter().map(|v| v.num_checkins).sum();
    let matching = checkins
      .iter()
      .filter(|c| establishments.iter().any(|e| e.id == c.brewery_id))
      .count() as u64;
    assert_eq!(total, matching);
  }

  #[test]
  fn brewery_average_uses_rated_only() {
    let views = derive_breweries(
      &[establishment("b1", "Denver, CO, United States")],
      &[
        checkin("b1", "IPA", 3.0),
        checkin("b1", "IPA", 4.0),
        checkin("b1", "IPA", UNRATED),
      ],
    );
    assert_eq!(views[0].num_checkins_with_ratings, 2);
    assert_eq!(views[0].avg_rating, 3.5);
  }

  // ── Countries ───────────────────────────────────────────────────────────

  #[test]
  fn countries_group_breweries_including_unknown() {
    let breweries = derive_breweries(
      &[
        establishment("a", "Munich, Germany"),
        establishment("b", "Berlin, Germany"),
        establishment("c", "Atlantis"),
      ],
      &[
        checkin("a", "Helles", 4.0),
        checkin("b", "Weisse", 2.0),
        checkin("b", "Weisse", UNRATED),
        checkin("c", "Lager", UNRATED),
      ],
    );
    let countries = derive_countries(&breweries);
    assert_eq!(countries.len(), 2);

    let germany = countries.iter().find(|c| c.name == "Germany").unwrap();
    assert_eq!(germany.num_breweries, 2);
    assert_eq!(germany.num_checkins, 3);
    assert_eq!(germany.avg_rating, 3.0);

    let unknown = countries.iter().find(|c| c.name == UNKNOWN_COUNTRY).unwrap();
    assert_eq!(unknown.num_breweries, 1);
    assert_eq!(unknown.num_checkins, 1);
    assert_eq!(unknown.avg_rating, UNRATED);
  }

  #[test]
  fn duplicate_establishment_ids_count_checkins_once() {
    let breweries = derive_breweries(
      &[
        establishment("b1", "Oslo, Norway"),
        establishment("b1", "Oslo, Norway"),
      ],
      &[checkin("b1", "Pils", 3.0)],
    );
    assert_eq!(breweries.len(), 2);

    let countries = derive_countries(&breweries);
    assert_eq!(countries.len(), 1);
    assert_eq!(countries[0].num_breweries, 1);
    assert_eq!(countries[0].num_checkins, 1);
    assert_eq!(countries[0].avg_rating, 3.0);
  }

  #[test]
  fn countries_are_sorted_by_name() {
    let breweries = derive_breweries(
      &[
        establishment("a", "Tokyo, Japan"),
        establishment("b", "Lima, Peru"),
        establishment("c", "Oslo, Norway"),
      ],
      &[],
    );
    let names: Vec<_> = derive_countries(&breweries)
      .into_iter()
      .map(|c| c.name)
      .collect();
    assert_eq!(names, ["Japan", "Norway", "Peru"]);
  }

  #[test]
  fn empty_inputs_yield_empty_views() {
    assert!(derive_breweries(&[], &[]).is_empty());
    assert!(derive_countries(&[]).is_empty());
    assert!(derive_styles(&[]).is_empty());
  }

  // ── Styles ──────────────────────────────────────────────────────────────

  #[test]
  fn style_statistics_exclude_sentinel() {
    let styles = derive_styles(&[
      checkin("x", "Porter", 2.0),
      checkin("y", "Porter", UNRATED),
      checkin("x", "Porter", 4.5),
      checkin("z", "Porter", 3.0),
    ]);
    assert_eq!(styles.len(), 1);
    let porter = &styles[0];
    assert_eq!(porter.num_checkins, 4);
    assert_eq!(porter.min_rating, 2.0);
    assert_eq!(porter.max_rating, 4.5);
    assert_eq!(porter.median_rating, 3.0);
    assert!((porter.avg_rating - 9.5 / 3.0).abs() < 1e-12);
  }

  #[test]
  fn fully_unrated_style_is_all_sentinel() {
    let styles = derive_styles(&[
      checkin("x", "Gose", UNRATED),
      checkin("y", "Gose", UNRATED),
    ]);
    let gose = &styles[0];
    assert_eq!(gose.num_checkins, 2);
    assert_eq!(gose.avg_rating, UNRATED);
    assert_eq!(gose.median_rating, UNRATED);
    assert_eq!(gose.min_rating, UNRATED);
    assert_eq!(gose.max_rating, UNRATED);
  }

  #[test]
  fn styles_are_distinct_and_sorted() {
    let names: Vec<_> = derive_styles(&[
      checkin("x", "Stout", 4.0),
      checkin("x", "IPA", 4.0),
      checkin("x", "Stout", 3.0),
    ])
    .into_iter()
    .map(|s| s.name)
    .collect();
    assert_eq!(names, ["IPA", "Stout"]);
  }
}
