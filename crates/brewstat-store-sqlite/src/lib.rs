//! SQLite backends for brewstat.
//!
//! [`SqliteStore`] serves the raw document collections and [`SqliteCache`]
//! holds serialised reports with an expiry. Both wrap [`tokio_rusqlite`] so
//! all database access runs on a dedicated thread without blocking the async
//! runtime.

mod cache;
mod encode;
mod schema;
mod store;

pub mod error;

pub use cache::SqliteCache;
pub use error::{Error, Result};
pub use store::SqliteStore;
