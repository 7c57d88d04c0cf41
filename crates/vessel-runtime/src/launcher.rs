//! The container launcher.
//!
//! Host-side phase of the two-phase launch protocol: validate that the
//! image has been pulled, request the container namespaces, re-invoke
//! this binary with the `child` directive, and block until the container
//! exits. The child re-parses the same arguments inside the new
//! namespaces, so no state crosses the re-exec boundary beyond argv.

use vessel_common::error::{Result, VesselError};
use vessel_core::cgroup::{NoopLimiter, ResourceLimiter};
use vessel_core::namespace::NamespaceSet;
use vessel_image::store::ImageStore;

use crate::spec::ContainerSpec;

/// The argv directive marking the bootstrapper phase.
pub const CHILD_DIRECTIVE: &str = "child";

/// Launches containers as isolated children of the current process.
pub struct Launcher {
    namespaces: NamespaceSet,
    limiter: Box<dyn ResourceLimiter>,
}

impl Launcher {
    /// Creates a launcher requesting the default namespace set, with
    /// resource limiting disabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            namespaces: NamespaceSet::default(),
            limiter: Box::new(NoopLimiter),
        }
    }

    /// Replaces the resource limiter applied to launched containers.
    #[must_use]
    pub fn with_limiter(mut self, limiter: Box<dyn ResourceLimiter>) -> Self {
        self.limiter = limiter;
        self
    }

    /// Launches the container and blocks until it terminates.
    ///
    /// Resolves the image's layer contents first, so a never-pulled image
    /// fails before any namespace exists. The child inherits the parent's
    /// standard streams; its exit code is returned (a signal death maps
    /// to the conventional `128 + signo`).
    ///
    /// Namespace creation failures are not transient, so there is no
    /// retry: the first error aborts the launch.
    ///
    /// # Errors
    ///
    /// Returns an error if the image is missing, a namespace cannot be
    /// created, or the child cannot be spawned or awaited.
    #[cfg(target_os = "linux")]
    pub fn launch(&self, spec: &ContainerSpec, store: &ImageStore) -> Result<i32> {
        use std::os::unix::process::{CommandExt, ExitStatusExt};

        // Fail fast: no namespace is created for an image that was never
        // pulled.
        let _ = vessel_image::store::ImageLayerSource::resolve(store, spec.image())?;

        let id = spec.container_id();
        tracing::info!(id = %id, command = ?spec.command(), "launching container");

        // CLONE_NEWPID applies to the caller's future children; the other
        // two flags move the calling process and run in the forked child.
        if !self.namespaces.launcher_flags().is_empty() {
            vessel_core::namespace::pid::unshare_pid_namespace()?;
        }

        let mut command = std::process::Command::new("/proc/self/exe");
        let _ = command
            .arg(CHILD_DIRECTIVE)
            .arg(spec.image().to_string())
            .args(spec.command());

        let child_flags = self.namespaces.child_flags();
        if !child_flags.is_empty() {
            // SAFETY: the closure runs between fork and exec and only
            // issues the unshare syscall.
            unsafe {
                let _ = command.pre_exec(move || {
                    nix::sched::unshare(child_flags).map_err(std::io::Error::from)
                });
            }
        }

        let mut child = command.spawn().map_err(|e| VesselError::PermissionDenied {
            message: format!("spawning container child failed: {e}"),
        })?;

        self.limiter.apply(id.as_str(), spec.limits(), child.id())?;

        let status = child.wait().map_err(|e| VesselError::PermissionDenied {
            message: format!("waiting for container child failed: {e}"),
        })?;

        let code = status
            .code()
            .or_else(|| status.signal().map(|s| 128 + s))
            .unwrap_or(1);
        tracing::info!(id = %id, code, "container exited");
        Ok(code)
    }

    /// Stub for non-Linux platforms.
    ///
    /// # Errors
    ///
    /// Always returns an error — container launch requires Linux.
    #[cfg(not(target_os = "linux"))]
    pub fn launch(&self, _spec: &ContainerSpec, _store: &ImageStore) -> Result<i32> {
        Err(VesselError::Config {
            message: "Linux required for native container operations".into(),
        })
    }
}

impl Default for Launcher {
    fn default() -> Self {
        Self::new()
    }
}
