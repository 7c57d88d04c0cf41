//! Pseudo-filesystem mounts inside the container root.
//!
//! `/proc`, `/sys`, and a tmpfs-backed `/dev` are mounted at paths under
//! the new root before the pivot, so the container sees them at `/proc`,
//! `/sys`, and `/dev` afterward.

use std::path::Path;

use vessel_common::error::{Result, VesselError};

/// Creates the mount point directory if it does not exist.
#[cfg(target_os = "linux")]
fn ensure_mount_point(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| VesselError::io(path, e))
}

/// Mounts `procfs` at `<root>/proc`.
///
/// # Errors
///
/// Returns an error if the mount point cannot be created or `mount(2)` fails.
#[cfg(target_os = "linux")]
pub fn mount_proc(root: &Path) -> Result<()> {
    use nix::mount::{MsFlags, mount};

    let target = root.join("proc");
    ensure_mount_point(&target)?;
    mount(
        Some("proc"),
        &target,
        Some("proc"),
        MsFlags::MS_NOSUID | MsFlags::MS_NODEV | MsFlags::MS_NOEXEC,
        None::<&str>,
    )
    .map_err(|e| VesselError::PermissionDenied {
        message: format!("proc mount failed: {e}"),
    })?;
    tracing::debug!(target = %target.display(), "procfs mounted");
    Ok(())
}

/// Stub for non-Linux platforms.
///
/// # Errors
///
/// Always returns an error — procfs requires Linux.
#[cfg(not(target_os = "linux"))]
pub fn mount_proc(_root: &Path) -> Result<()> {
    Err(VesselError::Config {
        message: "Linux required for native container operations".into(),
    })
}

/// Mounts `sysfs` at `<root>/sys`.
///
/// # Errors
///
/// Returns an error if the mount point cannot be created or `mount(2)` fails.
#[cfg(target_os = "linux")]
pub fn mount_sysfs(root: &Path) -> Result<()> {
    use nix::mount::{MsFlags, mount};

    let target = root.join("sys");
    ensure_mount_point(&target)?;
    mount(
        Some("sysfs"),
        &target,
        Some("sysfs"),
        MsFlags::MS_NOSUID | MsFlags::MS_NODEV | MsFlags::MS_NOEXEC,
        None::<&str>,
    )
    .map_err(|e| VesselError::PermissionDenied {
        message: format!("sysfs mount failed: {e}"),
    })?;
    tracing::debug!(target = %target.display(), "sysfs mounted");
    Ok(())
}

/// Stub for non-Linux platforms.
///
/// # Errors
///
/// Always returns an error — sysfs requires Linux.
#[cfg(not(target_os = "linux"))]
pub fn mount_sysfs(_root: &Path) -> Result<()> {
    Err(VesselError::Config {
        message: "Linux required for native container operations".into(),
    })
}

/// Mounts a tmpfs at `<root>/dev` to hold the container's device nodes.
///
/// Mounted `nosuid` with strict atime and a 0755 root, matching the
/// restrictive defaults containers conventionally use for `/dev`.
///
/// # Errors
///
/// Returns an error if the mount point cannot be created or `mount(2)` fails.
#[cfg(target_os = "linux")]
pub fn mount_dev_tmpfs(root: &Path) -> Result<()> {
    use nix::mount::{MsFlags, mount};

    let target = root.join("dev");
    ensure_mount_point(&target)?;
    mount(
        Some("tmpfs"),
        &target,
        Some("tmpfs"),
        MsFlags::MS_NOSUID | MsFlags::MS_STRICTATIME,
        Some("mode=755"),
    )
    .map_err(|e| VesselError::PermissionDenied {
        message: format!("dev tmpfs mount failed: {e}"),
    })?;
    tracing::debug!(target = %target.display(), "dev tmpfs mounted");
    Ok(())
}

/// Stub for non-Linux platforms.
///
/// # Errors
///
/// Always returns an error — tmpfs mounting requires Linux.
#[cfg(not(target_os = "linux"))]
pub fn mount_dev_tmpfs(_root: &Path) -> Result<()> {
    Err(VesselError::Config {
        message: "Linux required for native container operations".into(),
    })
}
