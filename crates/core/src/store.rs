//! JSON-file-backed storage for hotel entries.
//!
//! Entries live in a single pretty-printed JSON array. A missing file reads
//! as an empty list; the parent directory is created on first write.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::entry::{HotelEntry, HotelEntryPatch, NewHotelEntry};
use crate::error::{HotelCdError, Result};

pub struct HotelStore {
    path: PathBuf,
    default_cd_days: u32,
}

impl HotelStore {
    /// Open a store at `path`. `default_cd_days` is stamped onto new entries.
    pub fn new(path: impl Into<PathBuf>, default_cd_days: u32) -> Self {
        Self {
            path: path.into(),
            default_cd_days,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<HotelEntry>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Hotel store not found, starting empty");
            return Ok(Vec::new());
        }
        let data = std::fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&data).map_err(|e| {
            HotelCdError::Serialize(format!("{}: {}", self.path.display(), e))
        })
    }

    fn save(&self, entries: &[HotelEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_string_pretty(entries)
            .map_err(|e| HotelCdError::Serialize(e.to_string()))?;
        std::fs::write(&self.path, data)?;
        Ok(())
    }

    /// All entries in insertion order. Records without a readable
    /// `defaultCD` are given the store's default.
    pub fn list(&self) -> Result<Vec<HotelEntry>> {
        Ok(self
            .load()?
            .into_iter()
            .map(|e| e.with_default_cd(self.default_cd_days))
            .collect())
    }

    pub fn get(&self, id: &str) -> Result<Option<HotelEntry>> {
        Ok(self
            .load()?
            .into_iter()
            .find(|e| e.id == id)
            .map(|e| e.with_default_cd(self.default_cd_days)))
    }

    /// Validate and append a new entry.
    pub fn add(&self, input: &NewHotelEntry) -> Result<HotelEntry> {
        let mut entries = self.load()?;
        let entry = HotelEntry::create(input, &entries, self.default_cd_days)?;
        entries.push(entry.clone());
        self.save(&entries)?;
        info!(id = %entry.id, hotel = %entry.hotel_name, "Added hotel entry");
        Ok(entry)
    }

    /// Apply a partial update to the entry with `id`.
    pub fn update(&self, id: &str, patch: &HotelEntryPatch) -> Result<HotelEntry> {
        let mut entries = self.load()?;
        let idx = entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| HotelCdError::NotFound(id.to_string()))?;

        let mut entry = entries.remove(idx);
        entry.apply_patch(patch, &entries)?;
        entries.insert(idx, entry.clone());
        self.save(&entries)?;
        info!(id = %entry.id, "Updated hotel entry");
        Ok(entry)
    }

    /// Delete the entry with `id`.
    pub fn remove(&self, id: &str) -> Result<HotelEntry> {
        let mut entries = self.load()?;
        let idx = entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| HotelCdError::NotFound(id.to_string()))?;
        let removed = entries.remove(idx);
        self.save(&entries)?;
        info!(id = %removed.id, hotel = %removed.hotel_name, "Removed hotel entry");
        Ok(removed)
    }
}
