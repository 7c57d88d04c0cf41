//! Local image catalog.
//!
//! Maintains a JSON index of pulled images so `vsl images` can answer
//! without walking the store.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use vessel_common::error::{Result, VesselError};
use vessel_common::types::Digest;

/// Entry in the local image catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageEntry {
    /// Image reference in `name:tag` form.
    pub reference: String,
    /// Layer digests in manifest order.
    pub layers: Vec<Digest>,
    /// Total downloaded size in bytes.
    pub size_bytes: u64,
    /// ISO-8601 pull timestamp.
    pub pulled_at: String,
}

impl ImageEntry {
    /// Builds an entry stamped with the current time.
    #[must_use]
    pub fn new(reference: String, layers: Vec<Digest>, size_bytes: u64) -> Self {
        Self {
            reference,
            layers,
            size_bytes,
            pulled_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Image catalog backed by a JSON file.
#[derive(Debug)]
pub struct ImageCatalog {
    catalog_path: PathBuf,
}

impl ImageCatalog {
    /// Opens or creates the catalog inside the given store root.
    ///
    /// # Errors
    ///
    /// Returns an error if the store directory cannot be created.
    pub fn open(store_root: &Path) -> Result<Self> {
        let catalog_path = store_root.join("catalog.json");
        if let Some(parent) = catalog_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| VesselError::io(parent, e))?;
        }
        Ok(Self { catalog_path })
    }

    /// Lists all images in the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file cannot be read or parsed.
    pub fn list(&self) -> Result<Vec<ImageEntry>> {
        if !self.catalog_path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.catalog_path)
            .map_err(|e| VesselError::io(&self.catalog_path, e))?;
        let entries: Vec<ImageEntry> = serde_json::from_str(&content)?;
        Ok(entries)
    }

    /// Registers a pulled image, replacing any entry with the same
    /// reference (re-pulls are destructive).
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be read or written.
    pub fn register(&self, entry: ImageEntry) -> Result<()> {
        let mut entries = self.list()?;
        entries.retain(|e| e.reference != entry.reference);
        entries.push(entry);
        self.write_entries(&entries)
    }

    /// Removes an image by reference.
    ///
    /// # Errors
    ///
    /// Returns [`VesselError::NotFound`] if no entry with the given
    /// reference exists.
    pub fn remove(&self, reference: &str) -> Result<()> {
        let mut entries = self.list()?;
        let before = entries.len();
        entries.retain(|e| e.reference != reference);
        if entries.len() == before {
            return Err(VesselError::NotFound {
                kind: "image",
                id: reference.to_string(),
            });
        }
        self.write_entries(&entries)
    }

    fn write_entries(&self, entries: &[ImageEntry]) -> Result<()> {
        let json = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.catalog_path, json)
            .map_err(|e| VesselError::io(&self.catalog_path, e))?;
        Ok(())
    }
}
