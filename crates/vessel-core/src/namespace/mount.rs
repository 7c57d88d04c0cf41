//! Mount namespace isolation.
//!
//! Gives the container its own mount table, enabling private filesystem
//! views. Entering the namespace is not enough on hosts with shared mount
//! propagation (systemd's default): the tree must also be re-marked
//! private, or every mount made inside the container propagates back.

use vessel_common::error::{Result, VesselError};

/// Re-marks the entire mount tree as recursively private.
///
/// Must run before any mount is made in the new namespace, so nothing
/// leaks back into the host's propagation group.
///
/// # Errors
///
/// Returns an error if the `mount(2)` remount fails.
#[cfg(target_os = "linux")]
pub fn make_mounts_private() -> Result<()> {
    use nix::mount::{MsFlags, mount};

    mount(
        None::<&str>,
        "/",
        None::<&str>,
        MsFlags::MS_REC | MsFlags::MS_PRIVATE,
        None::<&str>,
    )
    .map_err(|e| VesselError::PermissionDenied {
        message: format!("marking mount tree private failed: {e}"),
    })?;
    tracing::debug!("mount tree re-marked private");
    Ok(())
}

/// Stub for non-Linux platforms.
///
/// # Errors
///
/// Always returns an error — mount propagation control requires Linux.
#[cfg(not(target_os = "linux"))]
pub fn make_mounts_private() -> Result<()> {
    Err(VesselError::Config {
        message: "Linux required for native container operations".into(),
    })
}
