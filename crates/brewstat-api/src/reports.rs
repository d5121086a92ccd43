//! Handlers for the report endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/checkins` | Every raw check-in |
//! | `GET`  | `/breweries` | One entry per establishment |
//! | `GET`  | `/countries` | One entry per resolved country, `"?"` for unknown |
//! | `GET`  | `/styles` | One entry per beer style |
//! | `GET`  | `/reports/{kind}` | Any of the above by name; 404 for unknown kinds |
//!
//! Reports are always returned whole; there is no paging or filtering.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use brewstat_core::{
  record::CheckIn,
  report::{Report, ReportKind, ReportService, UnknownReportKind},
  store::{CacheStore, RecordStore},
  view::{BreweryView, CountryView, StyleView},
};

use crate::error::ApiError;

/// `GET /checkins`
pub async fn checkins<R, C>(
  State(service): State<Arc<ReportService<R, C>>>,
) -> Result<Json<Vec<CheckIn>>, ApiError>
where
  R: RecordStore,
  C: CacheStore,
{
  Ok(Json(service.checkins().await?))
}

/// `GET /breweries`
pub async fn breweries<R, C>(
  State(service): State<Arc<ReportService<R, C>>>,
) -> Result<Json<Vec<BreweryView>>, ApiError>
where
  R: RecordStore,
  C: CacheStore,
{
  Ok(Json(service.breweries().await?))
}

/// `GET /countries`
pub async fn countries<R, C>(
  State(service): State<Arc<ReportService<R, C>>>,
) -> Result<Json<Vec<CountryView>>, ApiError>
where
  R: RecordStore,
  C: CacheStore,
{
  Ok(Json(service.countries().await?))
}

/// `GET /styles`
pub async fn styles<R, C>(
  State(service): State<Arc<ReportService<R, C>>>,
) -> Result<Json<Vec<StyleView>>, ApiError>
where
  R: RecordStore,
  C: CacheStore,
{
  Ok(Json(service.styles().await?))
}

/// `GET /reports/{kind}`
pub async fn by_kind<R, C>(
  State(service): State<Arc<ReportService<R, C>>>,
  Path(kind): Path<String>,
) -> Result<Json<Report>, ApiError>
where
  R: RecordStore,
  C: CacheStore,
{
  let kind: ReportKind = kind
    .parse()
    .map_err(|e: UnknownReportKind| ApiError::NotFound(e.to_string()))?;
  Ok(Json(service.report(kind).await?))
}
