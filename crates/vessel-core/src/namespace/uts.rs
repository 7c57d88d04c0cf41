//! UTS namespace operations.
//!
//! Inside a fresh UTS namespace the hostname is namespace-local, so a
//! container can carry its own identity without touching the host's.

use vessel_common::error::{Result, VesselError};

/// Sets the hostname of the calling process's UTS namespace.
///
/// Must only be called after the process has entered a new UTS namespace;
/// otherwise it renames the host.
///
/// # Errors
///
/// Returns an error if `sethostname(2)` fails.
#[cfg(target_os = "linux")]
pub fn set_hostname(hostname: &str) -> Result<()> {
    nix::unistd::sethostname(hostname).map_err(|e| VesselError::PermissionDenied {
        message: format!("sethostname({hostname}) failed: {e}"),
    })?;
    tracing::debug!(hostname, "container hostname set");
    Ok(())
}

/// Stub for non-Linux platforms.
///
/// # Errors
///
/// Always returns an error — UTS namespaces require Linux.
#[cfg(not(target_os = "linux"))]
pub fn set_hostname(_hostname: &str) -> Result<()> {
    Err(VesselError::Config {
        message: "Linux required for native container operations".into(),
    })
}
