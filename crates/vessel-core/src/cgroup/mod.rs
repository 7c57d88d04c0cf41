//! Cgroups v2 resource limiting behind a pluggable capability.
//!
//! Resource limits are advisory in this runtime: the default
//! [`NoopLimiter`] does nothing, and [`CgroupLimiter`] is an opt-in
//! implementation writing to the unified hierarchy at `/sys/fs/cgroup`.

pub mod cpu;
pub mod memory;

use std::path::PathBuf;

use vessel_common::error::{Result, VesselError};
use vessel_common::types::ResourceLimits;

/// Capability interface for applying resource limits to a container
/// process.
pub trait ResourceLimiter {
    /// Applies `limits` to the process `pid` of container `container_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the limits cannot be applied.
    fn apply(&self, container_id: &str, limits: &ResourceLimits, pid: u32) -> Result<()>;
}

/// Default limiter: accepts any limits and enforces none.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLimiter;

impl ResourceLimiter for NoopLimiter {
    fn apply(&self, container_id: &str, limits: &ResourceLimits, _pid: u32) -> Result<()> {
        if limits.cpu_fraction.is_some() || limits.memory_bytes.is_some() {
            tracing::debug!(container_id, "resource limits noted but not enforced");
        }
        Ok(())
    }
}

/// Limiter backed by a per-container cgroup under
/// `/sys/fs/cgroup/vessel/<id>`.
#[derive(Debug, Clone)]
pub struct CgroupLimiter {
    root: PathBuf,
}

impl CgroupLimiter {
    /// Creates a limiter rooted at the unified hierarchy mount point.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: PathBuf::from(vessel_common::constants::CGROUP_V2_PATH)
                .join(vessel_common::constants::APP_NAME),
        }
    }

    fn cgroup_path(&self, container_id: &str) -> PathBuf {
        self.root.join(container_id)
    }
}

impl Default for CgroupLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_os = "linux")]
impl ResourceLimiter for CgroupLimiter {
    fn apply(&self, container_id: &str, limits: &ResourceLimits, pid: u32) -> Result<()> {
        let path = self.cgroup_path(container_id);
        std::fs::create_dir_all(&path).map_err(|e| VesselError::io(&path, e))?;

        if let Some(fraction) = limits.cpu_fraction {
            cpu::set_cpu_fraction(&path, fraction)?;
        }
        if let Some(bytes) = limits.memory_bytes {
            memory::set_memory_max(&path, bytes)?;
        }

        let procs_path = path.join("cgroup.procs");
        std::fs::write(&procs_path, pid.to_string())
            .map_err(|e| VesselError::io(&procs_path, e))?;
        tracing::info!(container_id, pid, "cgroup limits applied");
        Ok(())
    }
}

#[cfg(not(target_os = "linux"))]
impl ResourceLimiter for CgroupLimiter {
    fn apply(&self, _container_id: &str, _limits: &ResourceLimits, _pid: u32) -> Result<()> {
        Err(VesselError::Config {
            message: "Linux required for native container operations".into(),
        })
    }
}
