//! On-disk image store.
//!
//! One directory per pulled image under the store root:
//!
//! ```text
//! <data_dir>/images/<name>_<tag>/
//!     layers/      downloaded blob archives, one per digest
//!     contents/    extracted, ready-to-mount root filesystem tree
//! ```
//!
//! The container core reads `contents/` through an [`ImageLayerSource`]
//! and never writes to it.

use std::path::{Path, PathBuf};

use vessel_common::constants::{CONTENTS_DIR, LAYERS_DIR};
use vessel_common::error::{Result, VesselError};

use crate::reference::ImageRef;

/// Manages the local image directory layout.
#[derive(Debug)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    /// Opens or initializes the store at the given root.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| VesselError::io(&root, e))?;
        tracing::debug!(path = %root.display(), "image store opened");
        Ok(Self { root })
    }

    /// Opens the store at the default location under the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the store directory cannot be created.
    pub fn open_default() -> Result<Self> {
        Self::open(vessel_common::constants::default_image_store())
    }

    /// Returns the root storage path.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the directory holding everything for one image.
    #[must_use]
    pub fn image_dir(&self, image: &ImageRef) -> PathBuf {
        self.root.join(image.dir_name())
    }

    /// Returns the directory downloaded layer archives land in.
    #[must_use]
    pub fn layers_dir(&self, image: &ImageRef) -> PathBuf {
        self.image_dir(image).join(LAYERS_DIR)
    }

    /// Returns the directory extracted layer contents land in.
    #[must_use]
    pub fn contents_dir(&self, image: &ImageRef) -> PathBuf {
        self.image_dir(image).join(CONTENTS_DIR)
    }

    /// Whether the image has extracted contents on disk.
    #[must_use]
    pub fn is_pulled(&self, image: &ImageRef) -> bool {
        self.contents_dir(image).is_dir()
    }

    /// Destructively prepares the image directory for a fresh pull.
    ///
    /// Any previous pull of the same reference is removed first, then the
    /// `layers/` and `contents/` directories are created empty.
    ///
    /// # Errors
    ///
    /// Returns an error if removal or creation fails.
    pub fn prepare(&self, image: &ImageRef) -> Result<()> {
        let dir = self.image_dir(image);
        if dir.exists() {
            tracing::info!(image = %image, "removing previous pull");
            std::fs::remove_dir_all(&dir).map_err(|e| VesselError::io(&dir, e))?;
        }
        for sub in [self.layers_dir(image), self.contents_dir(image)] {
            std::fs::create_dir_all(&sub).map_err(|e| VesselError::io(&sub, e))?;
        }
        Ok(())
    }
}

/// Resolved path to an image's extracted layer contents.
///
/// Produced by the pull pipeline and consumed read-only by the container
/// core as the overlay's lower directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLayerSource {
    contents_dir: PathBuf,
}

impl ImageLayerSource {
    /// Resolves the layer source for a pulled image.
    ///
    /// This is the fail-fast gate for `run`: a missing contents directory
    /// fails here, before any namespace or mount operation happens.
    ///
    /// # Errors
    ///
    /// Returns [`VesselError::NotFound`] if the image has not been pulled.
    pub fn resolve(store: &ImageStore, image: &ImageRef) -> Result<Self> {
        let contents_dir = store.contents_dir(image);
        if !contents_dir.is_dir() {
            return Err(VesselError::NotFound {
                kind: "image",
                id: image.to_string(),
            });
        }
        Ok(Self { contents_dir })
    }

    /// Returns the absolute path to the extracted contents directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.contents_dir
    }
}
