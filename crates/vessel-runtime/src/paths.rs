//! Per-container directory layout.
//!
//! Every container owns one directory under the container-data root,
//! named by its deterministic identifier:
//!
//! ```text
//! <data_dir>/containers/<id>/
//!     rootfs/        overlay mount point (the container's /)
//!     cow_rw/        writable upper layer
//!     cow_workdir/   overlay work directory
//! ```
//!
//! `rootfs/oldroot` appears transiently during bootstrap as the pivot
//! target for the previous root.

use std::path::{Path, PathBuf};

use vessel_common::constants::{OLD_ROOT_DIR, ROOTFS_DIR, UPPER_DIR, WORK_DIR};
use vessel_common::error::{Result, VesselError};
use vessel_common::types::ContainerId;

/// The directories backing one container's filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerPaths {
    /// The container's own directory under the container-data root.
    pub base: PathBuf,
    /// Overlay mount point; becomes the container's `/`.
    pub rootfs: PathBuf,
    /// Copy-on-write upper layer; all container writes land here.
    pub upper: PathBuf,
    /// Overlay work directory; driver-internal scratch space.
    pub work: PathBuf,
    /// Pivot target for the old root, inside the mounted rootfs.
    pub old_root: PathBuf,
}

impl ContainerPaths {
    /// Derives the paths for a container under the given data root.
    #[must_use]
    pub fn for_id(container_root: &Path, id: &ContainerId) -> Self {
        let base = container_root.join(id.as_str());
        let rootfs = base.join(ROOTFS_DIR);
        let old_root = rootfs.join(OLD_ROOT_DIR);
        Self {
            upper: base.join(UPPER_DIR),
            work: base.join(WORK_DIR),
            base,
            rootfs,
            old_root,
        }
    }

    /// Derives the paths under the default container-data root.
    #[must_use]
    pub fn new(id: &ContainerId) -> Self {
        Self::for_id(&vessel_common::constants::default_container_dir(), id)
    }

    /// Destructively (re)initializes the container directories.
    ///
    /// Any pre-existing directory tree for this identifier is removed
    /// first: a stale upper or work directory from a previous run would
    /// corrupt overlay semantics (stale whiteouts, orphaned work-dir
    /// metadata). Two simultaneous launches of the same identifier race
    /// here; identifiers are expected to be unique per run.
    ///
    /// # Errors
    ///
    /// Returns an error if removal or creation fails.
    pub fn reset(&self) -> Result<()> {
        if self.base.exists() {
            tracing::debug!(path = %self.base.display(), "wiping stale container directory");
            std::fs::remove_dir_all(&self.base).map_err(|e| VesselError::io(&self.base, e))?;
        }
        for dir in [&self.rootfs, &self.upper, &self.work] {
            std::fs::create_dir_all(dir).map_err(|e| VesselError::io(dir, e))?;
        }
        Ok(())
    }
}
