//! Persisted canvases, one per record.
//!
//! DESIGN
//! ======
//! The store is a single JSON file holding an array of `{ recordId, canvas }`
//! entries. Persisting a session upserts its record in place, so the file
//! keeps first-seen order. A missing or empty file is an empty store.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use canvas::doc::decode_polygon_set;
use canvas::figure::Figure;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::HostError;

// =============================================================================
// RECORD CANVAS
// =============================================================================

/// The polygon set stored for one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordCanvas {
    pub record_id: String,
    pub canvas: Vec<Figure>,
}

// =============================================================================
// CANVAS STORE
// =============================================================================

#[derive(Debug, Clone)]
pub struct CanvasStore {
    path: PathBuf,
    records: Vec<RecordCanvas>,
}

impl CanvasStore {
    /// Open the store at `path`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file exists but cannot be read or parsed.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, HostError> {
        let path = path.into();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "store missing; starting empty");
                String::new()
            }
            Err(err) => return Err(HostError::io(path, err)),
        };

        let records = if content.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&content).map_err(|source| HostError::CorruptStore { path: path.clone(), source })?
        };
        Ok(Self { path, records })
    }

    /// Write every record back to disk.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the parent directory or file cannot be written.
    pub fn save(&self) -> Result<(), HostError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| HostError::io(parent, err))?;
        }
        let json = serde_json::to_string_pretty(&self.records)?;
        fs::write(&self.path, json).map_err(|err| HostError::io(&self.path, err))?;
        info!(path = %self.path.display(), records = self.records.len(), "store written");
        Ok(())
    }

    /// Replace the record's canvas, or append it if the record is new.
    ///
    /// Returns `true` when an existing entry was replaced.
    pub fn upsert(&mut self, record_id: &str, canvas: Vec<Figure>) -> bool {
        if let Some(existing) = self.records.iter_mut().find(|r| r.record_id == record_id) {
            existing.canvas = canvas;
            return true;
        }
        self.records.push(RecordCanvas { record_id: record_id.to_owned(), canvas });
        false
    }

    /// Decode a polygon-set JSON array and upsert it for `record_id`.
    ///
    /// Returns the number of figures stored.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `json` is not an array of figures. The store is left
    /// untouched.
    pub fn import(&mut self, record_id: &str, json: &str) -> Result<usize, HostError> {
        let canvas = decode_polygon_set(json)?;
        let count = canvas.len();
        let replaced = self.upsert(record_id, canvas);
        debug!(record_id, figures = count, replaced, "polygon set imported");
        Ok(count)
    }

    #[must_use]
    pub fn get(&self, record_id: &str) -> Option<&[Figure]> {
        self.records
            .iter()
            .find(|r| r.record_id == record_id)
            .map(|r| r.canvas.as_slice())
    }

    #[must_use]
    pub fn records(&self) -> &[RecordCanvas] {
        &self.records
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
