//! The isolation bootstrapper.
//!
//! Runs as the re-executed child inside fresh UTS/PID/mount namespaces
//! and transforms the process's view of the filesystem until only the
//! container's composed root is visible, then replaces the process image
//! with the user command.
//!
//! The steps are strictly ordered; reordering breaks isolation or
//! crashes the mount. Every privileged operation goes through
//! [`IsolationBackend`], so tests drive the sequence with a recording
//! fake instead of real namespaces.

use std::path::Path;

use vessel_common::error::{Result, VesselError};
use vessel_core::filesystem::overlay::OverlayConfig;
use vessel_image::store::ImageLayerSource;

use crate::paths::ContainerPaths;
use crate::spec::ContainerSpec;

/// Capability interface over the privileged operations the bootstrapper
/// needs.
///
/// The production implementation is [`LinuxIsolation`]; tests inject a
/// fake to verify sequencing without requiring root.
pub trait IsolationBackend {
    /// Sets the namespace-local hostname.
    ///
    /// # Errors
    ///
    /// Returns an error if the hostname cannot be set.
    fn set_hostname(&self, hostname: &str) -> Result<()>;

    /// Re-marks the mount tree recursively private.
    ///
    /// # Errors
    ///
    /// Returns an error if the propagation change fails.
    fn make_mounts_private(&self) -> Result<()>;

    /// Mounts the overlay root filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if the overlay mount fails.
    fn mount_overlay(&self, config: &OverlayConfig) -> Result<()>;

    /// Mounts procfs at `<root>/proc`.
    ///
    /// # Errors
    ///
    /// Returns an error if the mount fails.
    fn mount_proc(&self, root: &Path) -> Result<()>;

    /// Mounts sysfs at `<root>/sys`.
    ///
    /// # Errors
    ///
    /// Returns an error if the mount fails.
    fn mount_sysfs(&self, root: &Path) -> Result<()>;

    /// Mounts a tmpfs at `<root>/dev`.
    ///
    /// # Errors
    ///
    /// Returns an error if the mount fails.
    fn mount_dev(&self, root: &Path) -> Result<()>;

    /// Creates the minimum character-device set under `dev_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if any node cannot be created.
    fn create_device_nodes(&self, dev_dir: &Path) -> Result<()>;

    /// Pivots the process root to `new_root`, parking the old root at
    /// `put_old`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pivot fails.
    fn pivot_root(&self, new_root: &Path, put_old: &Path) -> Result<()>;

    /// Changes the working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if `chdir` fails.
    fn set_working_dir(&self, path: &Path) -> Result<()>;

    /// Detach-unmounts the parked old root.
    ///
    /// # Errors
    ///
    /// Returns an error if the unmount fails.
    fn detach_old_root(&self, old_root: &Path) -> Result<()>;

    /// Replaces the process image with `command`.
    ///
    /// On success this never returns; an `Ok` return only happens in
    /// test fakes.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be executed.
    fn exec(&self, command: &[String]) -> Result<()>;
}

/// Production backend delegating to the `vessel-core` primitives.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinuxIsolation;

impl IsolationBackend for LinuxIsolation {
    fn set_hostname(&self, hostname: &str) -> Result<()> {
        vessel_core::namespace::uts::set_hostname(hostname)
    }

    fn make_mounts_private(&self) -> Result<()> {
        vessel_core::namespace::mount::make_mounts_private()
    }

    fn mount_overlay(&self, config: &OverlayConfig) -> Result<()> {
        vessel_core::filesystem::overlay::mount_overlay(config)
    }

    fn mount_proc(&self, root: &Path) -> Result<()> {
        vessel_core::filesystem::mount::mount_proc(root)
    }

    fn mount_sysfs(&self, root: &Path) -> Result<()> {
        vessel_core::filesystem::mount::mount_sysfs(root)
    }

    fn mount_dev(&self, root: &Path) -> Result<()> {
        vessel_core::filesystem::mount::mount_dev_tmpfs(root)
    }

    fn create_device_nodes(&self, dev_dir: &Path) -> Result<()> {
        vessel_core::filesystem::devices::create_device_nodes(dev_dir)
    }

    fn pivot_root(&self, new_root: &Path, put_old: &Path) -> Result<()> {
        vessel_core::filesystem::pivot_root::pivot_root(new_root, put_old)
    }

    fn set_working_dir(&self, path: &Path) -> Result<()> {
        vessel_core::filesystem::pivot_root::set_working_dir(path)
    }

    fn detach_old_root(&self, old_root: &Path) -> Result<()> {
        vessel_core::filesystem::pivot_root::detach_old_root(old_root)
    }

    #[cfg(unix)]
    fn exec(&self, command: &[String]) -> Result<()> {
        use std::os::unix::process::CommandExt;

        let (program, args) = command.split_first().ok_or_else(|| VesselError::Config {
            message: "container command is empty".into(),
        })?;
        tracing::info!(program, "handing off to container command");
        let err = std::process::Command::new(program).args(args).exec();
        Err(VesselError::io(program, err))
    }

    #[cfg(not(unix))]
    fn exec(&self, _command: &[String]) -> Result<()> {
        Err(VesselError::Config {
            message: "Linux required for native container operations".into(),
        })
    }
}

/// Runs the full bootstrap sequence and execs the container command.
///
/// Must be called from inside the fresh namespaces the launcher
/// requested. With the production backend a successful bootstrap never
/// returns: the process image is replaced by the container command. Any
/// failure before the final exec aborts the container-creation attempt;
/// mounts already made are not unwound, the process exits, and the OS
/// reclaims the namespace.
///
/// # Errors
///
/// Returns the failing step's error, or the exec error if the command
/// itself cannot be started.
pub fn run(
    spec: &ContainerSpec,
    paths: &ContainerPaths,
    layers: &ImageLayerSource,
    backend: &dyn IsolationBackend,
) -> Result<()> {
    let id = spec.container_id();
    tracing::info!(id = %id, "bootstrapping container");

    // 1. Namespace-local identity.
    backend.set_hostname(id.as_str())?;

    // 2. Detach from the host's mount propagation group before anything
    //    is mounted, or every mount below leaks back to the host.
    backend.make_mounts_private()?;

    // 3. Compose the overlay root.
    crate::composer::compose(paths, layers, backend)?;

    // 4–6. Pseudo-filesystems and the device set, at paths under the new
    // root so they appear at /proc, /sys, /dev after the pivot.
    backend.mount_proc(&paths.rootfs)?;
    backend.mount_sysfs(&paths.rootfs)?;
    backend.mount_dev(&paths.rootfs)?;
    backend.create_device_nodes(&paths.rootfs.join("dev"))?;

    // 7–9. Swap the root and drop the last reference to the host tree.
    backend.pivot_root(&paths.rootfs, &paths.old_root)?;
    backend.set_working_dir(Path::new("/"))?;
    backend.detach_old_root(&Path::new("/").join(vessel_common::constants::OLD_ROOT_DIR))?;

    // 10. The container process is now the user command.
    backend.exec(spec.command())
}
