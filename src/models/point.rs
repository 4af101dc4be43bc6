//! Point — a persisted map location with a color tag and optional note.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A map point as stored and as returned on the wire.
///
/// `id` is an opaque token assigned by the store at creation and immutable
/// thereafter. Timestamps are only populated by the SQLite backend; the JSON
/// file backend leaves them `None` and they are omitted from responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub color: String,
    #[serde(default)]
    pub note: String,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none", default)]
    pub updated_at: Option<DateTime<Utc>>,
}
