//! JSON API for brewstat reports.
//!
//! Exposes an axum [`Router`] backed by a shared [`ReportService`]. Auth, TLS,
//! and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", brewstat_api::api_router(service.clone()))
//! ```

pub mod cache;
pub mod error;
pub mod reports;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use brewstat_core::{
  report::ReportService,
  store::{CacheStore, RecordStore},
};

pub use error::ApiError;

/// Build the API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<R, C>(service: Arc<ReportService<R, C>>) -> Router<()>
where
  R: RecordStore + 'static,
  C: CacheStore + 'static,
{
  Router::new()
    // Reports
    .route("/checkins", get(reports::checkins::<R, C>))
    .route("/breweries", get(reports::breweries::<R, C>))
    .route("/countries", get(reports::countries::<R, C>))
    .route("/styles", get(reports::styles::<R, C>))
    .route("/reports/{kind}", get(reports::by_kind::<R, C>))
    // Administration
    .route("/cache/flush", post(cache::flush::<R, C>))
    .with_state(service)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use brewstat_core::{
    cache::MemoryCache,
    report::ReportKind,
    store::{Collection, Document},
  };
  use brewstat_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  type Service = ReportService<SqliteStore, MemoryCache>;

  fn doc(value: Value) -> Document {
    match value {
      Value::Object(map) => map,
      other => panic!("not an object: {other}"),
    }
  }

  async fn make_service(beers: Vec<Value>, breweries: Vec<Value>) -> Arc<Service> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let beers: Vec<Document> = beers.into_iter().map(doc).collect();
    let breweries: Vec<Document> = breweries.into_iter().map(doc).collect();
    store.insert_documents(Collection::Beers, &beers).await.unwrap();
    store
      .insert_documents(Collection::Breweries, &breweries)
      .await
      .unwrap();
    Arc::new(ReportService::new(store, MemoryCache::new()))
  }

  async fn portland() -> Arc<Service> {
    make_service(
      vec![
        json!({ "brewery_id": "b1", "style": "IPA", "rating": 4.0 }),
        json!({ "brewery_id": "b1", "style": "IPA", "rating": -1.0 }),
      ],
      vec![json!({
        "id": "b1",
        "name": "Breakside",
        "type": "Micro Brewery",
        "full_location": "Portland, OR, United States",
      })],
    )
    .await
  }

  async fn oneshot_raw(
    service: Arc<Service>,
    method:  &str,
    uri:     &str,
  ) -> (StatusCode, Value) {
    let req = Request::builder()
      .method(method)
      .uri(uri)
      .body(Body::empty())
      .unwrap();
    let resp = api_router(service).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let body = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
  }

  // ── Reports ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn breweries_endpoint_returns_views() {
    let (status, body) = oneshot_raw(portland().await, "GET", "/breweries").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
      body,
      json!([{
        "id": "b1",
        "name": "Breakside",
        "type": "Micro Brewery",
        "full_location": "Portland, OR, United States",
        "country": "United States",
        "num_checkins": 2,
        "num_checkins_with_ratings": 1,
        "avg_rating": 4.0,
      }])
    );
  }

  #[tokio::test]
  async fn styles_endpoint_returns_statistics() {
    let (status, body) = oneshot_raw(portland().await, "GET", "/styles").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "IPA");
    assert_eq!(body[0]["num_checkins"], 2);
    assert_eq!(body[0]["median_rating"], 4.0);
  }

  #[tokio::test]
  async fn countries_endpoint_returns_groups() {
    let (status, body) = oneshot_raw(portland().await, "GET", "/countries").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "United States");
    assert_eq!(body[0]["num_breweries"], 1);
    assert_eq!(body[0]["num_checkins"], 2);
  }

  #[tokio::test]
  async fn checkins_endpoint_returns_raw_records() {
    let (status, body) = oneshot_raw(portland().await, "GET", "/checkins").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[1]["rating"], -1.0);
  }

  #[tokio::test]
  async fn empty_store_returns_empty_lists() {
    let service = make_service(vec![], vec![]).await;
    for kind in ReportKind::ALL {
      let (status, body) =
        oneshot_raw(service.clone(), "GET", &format!("/{kind}")).await;
      assert_eq!(status, StatusCode::OK);
      assert_eq!(body, json!([]));
    }
  }

  #[tokio::test]
  async fn reports_by_kind() {
    let service = portland().await;
    let (status, by_name) = oneshot_raw(service.clone(), "GET", "/reports/styles").await;
    assert_eq!(status, StatusCode::OK);
    let (_, direct) = oneshot_raw(service, "GET", "/styles").await;
    assert_eq!(by_name, direct);
  }

  #[tokio::test]
  async fn unknown_report_kind_returns_404() {
    let (status, body) = oneshot_raw(portland().await, "GET", "/reports/hops").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("hops"));
  }

  #[tokio::test]
  async fn malformed_document_returns_500() {
    let service = make_service(vec![json!({ "style": "IPA", "rating": 3.0 })], vec![]).await;
    let (status, body) = oneshot_raw(service, "GET", "/styles").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("brewery_id"));
  }

  // ── Administration ─────────────────────────────────────────────────────────

  #[tokio::test]
  async fn flush_clears_the_cache() {
    let service = portland().await;
    oneshot_raw(service.clone(), "GET", "/countries").await;
    assert!(!service.cache().is_empty());

    let (status, _) = oneshot_raw(service.clone(), "POST", "/cache/flush").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(service.cache().is_empty());
  }

  #[tokio::test]
  async fn flush_requires_post() {
    let (status, _) = oneshot_raw(portland().await, "GET", "/cache/flush").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
  }
}
