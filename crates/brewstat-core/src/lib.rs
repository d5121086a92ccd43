//! Core types, aggregation, and cached reporting for brewstat.
//!
//! This crate is deliberately free of HTTP and database dependencies. Storage
//! backends implement [`store::RecordStore`] and [`store::CacheStore`]; the
//! [`report::ReportService`] ties them together.

// Store traits spell out `Send` on their futures; implementations use plain
// `async fn`.
#![allow(async_fn_in_trait)]

pub mod aggregate;
pub mod cache;
pub mod codec;
pub mod country;
pub mod error;
pub mod record;
pub mod report;
pub mod store;
pub mod view;

pub use error::{Error, Result};
