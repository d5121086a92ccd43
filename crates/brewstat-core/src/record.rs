//! Raw records: check-ins and establishments as read from the record store.
//!
//! Records are validated field by field at the store boundary. Unknown fields
//! are ignored; a missing or mistyped required field fails the whole read.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
  Error, Result,
  error::FieldError,
  store::{Collection, Document},
};

/// The rating recorded for a check-in that was never rated. Never a valid
/// rating; excluded from every statistic.
pub const UNRATED: f64 = -1.0;

// ─── CheckIn ─────────────────────────────────────────────────────────────────

/// One consumption event, tied to an establishment and a beer style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckIn {
  pub brewery_id: String,
  pub style:      String,
  /// [`UNRATED`] when no rating was given.
  pub rating:     f64,
}

impl CheckIn {
  /// Whether this check-in carries a real rating.
  pub fn is_rated(&self) -> bool { self.rating != UNRATED }

  /// Validate a `beers` document. `index` is the document's position in the
  /// collection and only used for error reporting.
  pub fn from_document(index: usize, doc: &Document) -> Result<Self> {
    let fields = Fields { collection: Collection::Beers, index, doc };
    Ok(Self {
      brewery_id: fields.string("brewery_id")?,
      style:      fields.string("style")?,
      rating:     fields.number("rating")?,
    })
  }
}

// ─── Establishment ───────────────────────────────────────────────────────────

/// A brewery or venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Establishment {
  pub id:            String,
  pub name:          String,
  #[serde(rename = "type")]
  pub kind:          String,
  /// Free text such as `"Portland, OR, United States"`; usually ends with a
  /// country name.
  pub full_location: String,
}

impl Establishment {
  /// Validate a `breweries` document.
  pub fn from_document(index: usize, doc: &Document) -> Result<Self> {
    let fields = Fields { collection: Collection::Breweries, index, doc };
    Ok(Self {
      id:            fields.string("id")?,
      name:          fields.string("name")?,
      kind:          fields.string("type")?,
      full_location: fields.string("full_location")?,
    })
  }
}

// ─── Field access ────────────────────────────────────────────────────────────

struct Fields<'a> {
  collection: Collection,
  index:      usize,
  doc:        &'a Document,
}

impl Fields<'_> {
  fn malformed(&self, source: FieldError) -> Error {
    Error::MalformedDocument {
      collection: self.collection.name(),
      index: self.index,
      source,
    }
  }

  fn get(&self, field: &'static str) -> Result<&Value> {
    self
      .doc
      .get(field)
      .ok_or_else(|| self.malformed(FieldError::Missing(field)))
  }

  fn string(&self, field: &'static str) -> Result<String> {
    match self.get(field)? {
      Value::String(s) => Ok(s.clone()),
      _ => Err(self.malformed(FieldError::WrongType { field, expected: "string" })),
    }
  }

  fn number(&self, field: &'static str) -> Result<f64> {
    self.get(field)?.as_f64().ok_or_else(|| {
      self.malformed(FieldError::WrongType { field, expected: "number" })
    })
  }
}
