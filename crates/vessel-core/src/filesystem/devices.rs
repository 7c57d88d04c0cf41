//! Container device-node population.
//!
//! The overlay root starts with an empty `/dev`; these are the three
//! character devices most programs assume exist.

use std::path::Path;

use vessel_common::error::{Result, VesselError};

/// A character device node to create inside the container's `/dev`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceNode {
    /// Node name relative to `/dev`.
    pub name: &'static str,
    /// Device major number.
    pub major: u64,
    /// Device minor number.
    pub minor: u64,
}

/// The minimum device set created for every container.
pub const CONTAINER_DEVICES: [DeviceNode; 3] = [
    DeviceNode {
        name: "null",
        major: 1,
        minor: 3,
    },
    DeviceNode {
        name: "tty",
        major: 5,
        minor: 0,
    },
    DeviceNode {
        name: "random",
        major: 1,
        minor: 8,
    },
];

/// Access mode applied to every container device node.
pub const DEVICE_MODE: libc::mode_t = 0o666;

/// Creates the [`CONTAINER_DEVICES`] character nodes under `dev_dir`.
///
/// `dev_dir` is expected to be a freshly mounted tmpfs, so no node can
/// already exist.
///
/// # Errors
///
/// Returns an error if any `mknod(2)` call fails.
#[cfg(target_os = "linux")]
pub fn create_device_nodes(dev_dir: &Path) -> Result<()> {
    use nix::sys::stat::{Mode, SFlag, makedev, mknod};

    for dev in CONTAINER_DEVICES {
        let path = dev_dir.join(dev.name);
        mknod(
            &path,
            SFlag::S_IFCHR,
            Mode::from_bits_truncate(DEVICE_MODE),
            makedev(dev.major, dev.minor),
        )
        .map_err(|e| VesselError::PermissionDenied {
            message: format!("mknod {} failed: {e}", path.display()),
        })?;
        tracing::debug!(node = dev.name, dev.major, dev.minor, "device node created");
    }
    Ok(())
}

/// Stub for non-Linux platforms.
///
/// # Errors
///
/// Always returns an error — device nodes require Linux.
#[cfg(not(target_os = "linux"))]
pub fn create_device_nodes(_dev_dir: &Path) -> Result<()> {
    Err(VesselError::Config {
        message: "Linux required for native container operations".into(),
    })
}
