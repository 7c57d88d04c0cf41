//! CPU bandwidth control via cgroups v2.
//!
//! Manages the `cpu.max` control file.

use std::path::Path;

use vessel_common::error::{Result, VesselError};

/// Scheduling period used for `cpu.max`, in microseconds.
const CPU_PERIOD_US: u64 = 100_000;

/// Limits a cgroup to a fraction of one CPU.
///
/// Writes `quota_us period_us` to `cpu.max`, where the quota is
/// `fraction * period`. The fraction must lie in (0.0, 1.0].
///
/// # Errors
///
/// Returns an error if the fraction is out of range or writing to
/// `cpu.max` fails.
#[cfg(target_os = "linux")]
pub fn set_cpu_fraction(cgroup_path: &Path, fraction: f64) -> Result<()> {
    if !(fraction > 0.0 && fraction <= 1.0) {
        return Err(VesselError::Config {
            message: format!("cpu fraction out of range (0, 1]: {fraction}"),
        });
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let quota_us = (fraction * CPU_PERIOD_US as f64) as u64;
    let file = cgroup_path.join("cpu.max");
    std::fs::write(&file, format!("{quota_us} {CPU_PERIOD_US}"))
        .map_err(|e| VesselError::io(&file, e))?;
    tracing::debug!(quota_us, period_us = CPU_PERIOD_US, "CPU quota set");
    Ok(())
}

/// Stub for non-Linux platforms.
///
/// # Errors
///
/// Always returns an error — cgroup CPU control requires Linux.
#[cfg(not(target_os = "linux"))]
pub fn set_cpu_fraction(_cgroup_path: &Path, _fraction: f64) -> Result<()> {
    Err(VesselError::Config {
        message: "Linux required for native container operations".into(),
    })
}
