//! Global configuration model for the Vessel runtime.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the Vessel runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VesselConfig {
    /// Base directory for Vessel state and data.
    pub data_dir: PathBuf,
    /// Registry v2 endpoint images are pulled from.
    pub registry_url: String,
    /// Token service endpoint for anonymous pull auth.
    pub auth_url: String,
    /// Default resource limits applied to all containers.
    pub default_limits: crate::types::ResourceLimits,
}

impl Default for VesselConfig {
    fn default() -> Self {
        Self {
            data_dir: crate::constants::data_dir().clone(),
            registry_url: crate::constants::REGISTRY_URL.to_string(),
            auth_url: crate::constants::AUTH_URL.to_string(),
            default_limits: crate::types::ResourceLimits::default(),
        }
    }
}
