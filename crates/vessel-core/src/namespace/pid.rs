//! PID namespace isolation.
//!
//! Provides the container with its own process ID space, where PID 1
//! is the container's init process.

use vessel_common::error::{Result, VesselError};

/// Unshares the PID namespace for the calling process's future children.
///
/// After a successful call, the next process the caller spawns sees
/// itself as PID 1 inside the new namespace. The caller's own PID is
/// unaffected.
///
/// # Errors
///
/// Returns an error if the `unshare(CLONE_NEWPID)` syscall fails.
#[cfg(target_os = "linux")]
pub fn unshare_pid_namespace() -> Result<()> {
    use nix::sched::{CloneFlags, unshare};

    unshare(CloneFlags::CLONE_NEWPID).map_err(|e| VesselError::PermissionDenied {
        message: format!("PID namespace creation failed: {e}"),
    })?;
    tracing::debug!("PID namespace created");
    Ok(())
}

/// Stub for non-Linux platforms.
///
/// # Errors
///
/// Always returns an error — PID namespaces require Linux.
#[cfg(not(target_os = "linux"))]
pub fn unshare_pid_namespace() -> Result<()> {
    Err(VesselError::Config {
        message: "Linux required for native container operations".into(),
    })
}
