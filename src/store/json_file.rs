//! JSON-file point store — whole-collection read-modify-write.
//!
//! The entire collection lives as one JSON array at a fixed path. Every
//! mutation reads the file, modifies the array in memory, and writes it back.
//! There is no locking: two concurrent writers can both read the same
//! snapshot and silently overwrite each other's change. Callers accept
//! last-write-wins in this configuration.

use std::path::{Path, PathBuf};

use crate::models::Point;

use super::{NewPoint, PointStore, PointUpdate, StoreError};

pub struct JsonFileStore {
    data_file: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(data_file: P) -> Self {
        JsonFileStore {
            data_file: data_file.as_ref().to_path_buf(),
        }
    }

    /// Read the full collection. A missing or unreadable file reads as empty,
    /// so a fresh deployment lists zero points instead of erroring.
    fn load(&self) -> Vec<Point> {
        match std::fs::read_to_string(&self.data_file) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                log::warn!(
                    "[STORE] Could not parse {}: {} — treating as empty",
                    self.data_file.display(),
                    e
                );
                Vec::new()
            }),
            Err(_) => Vec::new(),
        }
    }

    fn save(&self, points: &[Point]) -> Result<(), StoreError> {
        if let Some(parent) = self.data_file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(points)?;
        std::fs::write(&self.data_file, json)?;
        Ok(())
    }

    /// Millisecond-timestamp id, bumped until unique within the collection.
    fn next_id(points: &[Point]) -> String {
        let mut candidate = chrono::Utc::now().timestamp_millis();
        while points.iter().any(|p| p.id == candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }
}

impl PointStore for JsonFileStore {
    fn list(&self) -> Result<Vec<Point>, StoreError> {
        Ok(self.load())
    }

    fn create(&self, new: NewPoint) -> Result<Point, StoreError> {
        if new.color.trim().is_empty() {
            return Err(StoreError::Validation("color"));
        }

        let mut points = self.load();
        let point = Point {
            id: Self::next_id(&points),
            latitude: new.latitude,
            longitude: new.longitude,
            color: new.color,
            note: new.note,
            created_at: None,
            updated_at: None,
        };
        points.push(point.clone());
        self.save(&points)?;

        Ok(point)
    }

    fn update(&self, id: &str, change: PointUpdate) -> Result<Point, StoreError> {
        let mut points = self.load();
        let point = points
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound)?;

        point.color = change.color;
        if let Some(note) = change.note {
            point.note = note;
        }
        let updated = point.clone();
        self.save(&points)?;

        Ok(updated)
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut points = self.load();
        let before = points.len();
        points.retain(|p| p.id != id);
        if points.len() == before {
            return Err(StoreError::NotFound);
        }
        self.save(&points)?;

        Ok(())
    }
}
