//! The filesystem composer.
//!
//! Produces a single mounted overlay filesystem at the container root:
//! the image's extracted layer contents as the read-only lower directory,
//! a per-container `cow_rw` upper directory catching every write, and a
//! `cow_workdir` scratch directory for the overlay driver. Writes through
//! the mount never touch the image, so one pulled image can back any
//! number of independently writable containers.

use vessel_common::error::Result;
use vessel_core::filesystem::overlay::OverlayConfig;
use vessel_image::store::ImageLayerSource;

use crate::bootstrap::IsolationBackend;
use crate::paths::ContainerPaths;

/// Builds the overlay configuration combining an image with a
/// container's directories.
#[must_use]
pub fn overlay_config(paths: &ContainerPaths, layers: &ImageLayerSource) -> OverlayConfig {
    OverlayConfig {
        lower_dir: layers.path().to_path_buf(),
        upper_dir: paths.upper.clone(),
        work_dir: paths.work.clone(),
        merged_dir: paths.rootfs.clone(),
    }
}

/// Composes the container's root filesystem.
///
/// The container directories are destructively reset first, because
/// overlay semantics require a pristine upper and work directory; then
/// the overlay is mounted at the rootfs path.
///
/// # Errors
///
/// Returns an error if the directory reset or the overlay mount fails; a
/// missing lower directory surfaces as a mount failure.
pub fn compose(
    paths: &ContainerPaths,
    layers: &ImageLayerSource,
    backend: &dyn IsolationBackend,
) -> Result<()> {
    paths.reset()?;
    backend.mount_overlay(&overlay_config(paths, layers))
}
