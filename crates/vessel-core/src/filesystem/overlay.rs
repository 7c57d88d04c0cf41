//! Overlay mounts for layered container filesystems.
//!
//! Combines a read-only lower directory of extracted image contents with
//! a per-container writable upper layer, so many containers can share one
//! pulled image without ever mutating it.

use std::path::PathBuf;

use vessel_common::error::{Result, VesselError};

/// Configuration for an overlay mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayConfig {
    /// Read-only lower directory (extracted image contents).
    pub lower_dir: PathBuf,
    /// Writable upper layer directory.
    pub upper_dir: PathBuf,
    /// Work directory required by the overlay driver for atomic renames.
    pub work_dir: PathBuf,
    /// Final merged mount point.
    pub merged_dir: PathBuf,
}

impl OverlayConfig {
    /// Builds the `mount(2)` data string for this configuration.
    #[must_use]
    pub fn options(&self) -> String {
        format!(
            "lowerdir={},upperdir={},workdir={}",
            self.lower_dir.display(),
            self.upper_dir.display(),
            self.work_dir.display()
        )
    }
}

/// Mounts an overlay filesystem with the given configuration.
///
/// The upper, work, and merged directories must already exist; the caller
/// owns their (re)initialization. Device nodes are refused through this
/// mount (`MS_NODEV`).
///
/// # Errors
///
/// Returns an error if the mount syscall fails, including when the lower
/// directory does not exist.
#[cfg(target_os = "linux")]
pub fn mount_overlay(config: &OverlayConfig) -> Result<()> {
    use nix::mount::{MsFlags, mount};

    let opts = config.options();
    mount(
        Some("overlay"),
        &config.merged_dir,
        Some("overlay"),
        MsFlags::MS_NODEV,
        Some(opts.as_str()),
    )
    .map_err(|e| VesselError::PermissionDenied {
        message: format!("overlay mount failed: {e}"),
    })?;

    tracing::info!(merged = %config.merged_dir.display(), "overlay mounted");
    Ok(())
}

/// Stub for non-Linux platforms.
///
/// # Errors
///
/// Always returns an error — overlay mounting requires Linux.
#[cfg(not(target_os = "linux"))]
pub fn mount_overlay(_config: &OverlayConfig) -> Result<()> {
    Err(VesselError::Config {
        message: "Linux required for native container operations".into(),
    })
}
