//! Handler for `POST /cache/flush`.
//!
//! An administrative reset: every cached report is dropped and recomputed on
//! its next request.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode};
use brewstat_core::{
  report::ReportService,
  store::{CacheStore, RecordStore},
};

use crate::error::ApiError;

/// `POST /cache/flush`, returns 204.
pub async fn flush<R, C>(
  State(service): State<Arc<ReportService<R, C>>>,
) -> Result<StatusCode, ApiError>
where
  R: RecordStore,
  C: CacheStore,
{
  service.flush_cache().await?;
  Ok(StatusCode::NO_CONTENT)
}
