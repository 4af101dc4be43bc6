//! Point Store — persistence contract for map points.
//!
//! Two interchangeable backends live behind [`PointStore`]:
//! - [`json_file::JsonFileStore`] — a single JSON array file, rewritten whole
//!   on every mutation (no locking; concurrent writers can race and the last
//!   write wins).
//! - [`sqlite::SqliteStore`] — an SQLite collection with per-row atomic
//!   operations and auto-maintained timestamps.

pub mod json_file;
pub mod sqlite;

pub use json_file::JsonFileStore;
pub use sqlite::SqliteStore;

use thiserror::Error;

use crate::models::Point;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("missing required field: {0}")]
    Validation(&'static str),

    #[error("point not found")]
    NotFound,

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Storage(e.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Storage(e.to_string())
    }
}

/// Fields for a point being created. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub color: String,
    pub note: String,
}

/// Mutation applied to an existing point.
///
/// `note: None` leaves the stored note untouched; `Some("")` clears it.
#[derive(Debug, Clone)]
pub struct PointUpdate {
    pub color: String,
    pub note: Option<String>,
}

/// Persistence contract for the points collection.
///
/// `list` returns points in insertion/storage order and never fails just
/// because no data exists yet. `update` and `delete` return
/// [`StoreError::NotFound`] for unknown ids.
pub trait PointStore: Send + Sync {
    fn list(&self) -> Result<Vec<Point>, StoreError>;
    fn create(&self, new: NewPoint) -> Result<Point, StoreError>;
    fn update(&self, id: &str, change: PointUpdate) -> Result<Point, StoreError>;
    fn delete(&self, id: &str) -> Result<(), StoreError>;
}
