//! SQLite point store — one row per point, per-row atomic mutations.
//!
//! The default backend. Ids are database-generated UUIDs and the store
//! maintains `created_at`/`updated_at` timestamps itself, so from the API's
//! perspective it behaves like the file store plus timestamps and without the
//! read-modify-write race.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};
use uuid::Uuid;

use crate::models::Point;

use super::{NewPoint, PointStore, PointUpdate, StoreError};

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database and ensure the points table exists.
    pub fn new(database_url: &str) -> Result<Self, StoreError> {
        if let Some(parent) = Path::new(database_url).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(database_url)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS points (
                id TEXT PRIMARY KEY,
                latitude REAL NOT NULL,
                longitude REAL NOT NULL,
                color TEXT NOT NULL,
                note TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(SqliteStore {
            conn: Mutex::new(conn),
        })
    }

    fn row_to_point(row: &rusqlite::Row) -> rusqlite::Result<Point> {
        let created_at_str: String = row.get(5)?;
        let updated_at_str: String = row.get(6)?;

        Ok(Point {
            id: row.get(0)?,
            latitude: row.get(1)?,
            longitude: row.get(2)?,
            color: row.get(3)?,
            note: row.get(4)?,
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            updated_at: DateTime::parse_from_rfc3339(&updated_at_str)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
        })
    }
}

impl PointStore for SqliteStore {
    fn list(&self) -> Result<Vec<Point>, StoreError> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(
            "SELECT id, latitude, longitude, color, note, created_at, updated_at
             FROM points ORDER BY created_at ASC, id ASC",
        )?;

        let points = stmt
            .query_map([], |row| Self::row_to_point(row))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(points)
    }

    fn create(&self, new: NewPoint) -> Result<Point, StoreError> {
        if new.color.trim().is_empty() {
            return Err(StoreError::Validation("color"));
        }

        let conn = self.conn.lock().unwrap();
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        conn.execute(
            "INSERT INTO points (id, latitude, longitude, color, note, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
            params![
                &id,
                new.latitude,
                new.longitude,
                &new.color,
                &new.note,
                now.to_rfc3339(),
            ],
        )?;

        Ok(Point {
            id,
            latitude: new.latitude,
            longitude: new.longitude,
            color: new.color,
            note: new.note,
            created_at: Some(now),
            updated_at: Some(now),
        })
    }

    fn update(&self, id: &str, change: PointUpdate) -> Result<Point, StoreError> {
        let conn = self.conn.lock().unwrap();
        let now = Utc::now().to_rfc3339();

        // COALESCE keeps the stored note when no replacement was supplied.
        let rows_affected = conn.execute(
            "UPDATE points SET color = ?1, note = COALESCE(?2, note), updated_at = ?3
             WHERE id = ?4",
            params![&change.color, change.note.as_deref(), &now, id],
        )?;

        if rows_affected == 0 {
            return Err(StoreError::NotFound);
        }

        let point = conn.query_row(
            "SELECT id, latitude, longitude, color, note, created_at, updated_at
             FROM points WHERE id = ?1",
            [id],
            |row| Self::row_to_point(row),
        )?;

        Ok(point)
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();

        let rows_affected = conn.execute("DELETE FROM points WHERE id = ?1", [id])?;
        if rows_affected == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
