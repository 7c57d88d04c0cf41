//! Root filesystem switching via `pivot_root(2)`.
//!
//! More secure than `chroot` because it actually swaps the root mount
//! rather than just the process's view of `/`: after the pivot and the
//! detach of the old root, no reference to the host filesystem remains
//! reachable from inside the container.

use std::path::Path;

use vessel_common::error::{Result, VesselError};

/// Atomically swaps the process root for `new_root`, parking the previous
/// root at `put_old`.
///
/// `new_root` must be a mount point in the calling process's mount
/// namespace and `put_old` a directory beneath it.
///
/// # Errors
///
/// Returns an error if the mount point cannot be created or
/// `pivot_root(2)` fails.
#[cfg(target_os = "linux")]
pub fn pivot_root(new_root: &Path, put_old: &Path) -> Result<()> {
    std::fs::create_dir_all(put_old).map_err(|e| VesselError::io(put_old, e))?;
    nix::unistd::pivot_root(new_root, put_old).map_err(|e| VesselError::PermissionDenied {
        message: format!("pivot_root to {} failed: {e}", new_root.display()),
    })?;
    tracing::info!(new_root = %new_root.display(), "root filesystem pivoted");
    Ok(())
}

/// Stub for non-Linux platforms.
///
/// # Errors
///
/// Always returns an error — `pivot_root` requires Linux.
#[cfg(not(target_os = "linux"))]
pub fn pivot_root(_new_root: &Path, _put_old: &Path) -> Result<()> {
    Err(VesselError::Config {
        message: "Linux required for native container operations".into(),
    })
}

/// Changes the current working directory, normally to the new `/` right
/// after a pivot.
///
/// # Errors
///
/// Returns an error if `chdir(2)` fails.
#[cfg(target_os = "linux")]
pub fn set_working_dir(path: &Path) -> Result<()> {
    nix::unistd::chdir(path).map_err(|e| VesselError::PermissionDenied {
        message: format!("chdir to {} failed: {e}", path.display()),
    })?;
    Ok(())
}

/// Stub for non-Linux platforms.
///
/// # Errors
///
/// Always returns an error — container root switching requires Linux.
#[cfg(not(target_os = "linux"))]
pub fn set_working_dir(_path: &Path) -> Result<()> {
    Err(VesselError::Config {
        message: "Linux required for native container operations".into(),
    })
}

/// Lazily detaches the parked old root and removes its mount point.
///
/// Uses `MNT_DETACH` so the unmount succeeds even while host-side
/// references are still draining.
///
/// # Errors
///
/// Returns an error if `umount2(2)` or the directory removal fails.
#[cfg(target_os = "linux")]
pub fn detach_old_root(old_root: &Path) -> Result<()> {
    nix::mount::umount2(old_root, nix::mount::MntFlags::MNT_DETACH).map_err(|e| {
        VesselError::PermissionDenied {
            message: format!("detaching old root failed: {e}"),
        }
    })?;
    std::fs::remove_dir(old_root).map_err(|e| VesselError::io(old_root, e))?;
    tracing::debug!(path = %old_root.display(), "old root detached");
    Ok(())
}

/// Stub for non-Linux platforms.
///
/// # Errors
///
/// Always returns an error — unmounting requires Linux.
#[cfg(not(target_os = "linux"))]
pub fn detach_old_root(_old_root: &Path) -> Result<()> {
    Err(VesselError::Config {
        message: "Linux required for native container operations".into(),
    })
}
