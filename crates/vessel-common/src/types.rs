//! Domain primitive types used across the Vessel workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a container instance.
///
/// Derived deterministically from the image reference as `<name>_<tag>`,
/// so the same image and tag always map to the same on-disk directories.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerId(String);

impl ContainerId {
    /// Creates a container ID from a raw string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derives the container ID for an image name and tag.
    #[must_use]
    pub fn from_image(name: &str, tag: &str) -> Self {
        Self(format!("{name}_{tag}"))
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// SHA-256 content digest in the registry's `sha256:<hex>` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Digest(String);

impl Digest {
    /// Parses a digest string of the form `sha256:<64 hex chars>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the algorithm prefix is missing or the hex
    /// payload has the wrong length or alphabet.
    pub fn parse(value: impl Into<String>) -> crate::error::Result<Self> {
        let value = value.into();
        let hex = value.strip_prefix("sha256:").ok_or_else(|| {
            crate::error::VesselError::Config {
                message: format!("unsupported digest algorithm: {value}"),
            }
        })?;
        if hex.len() != crate::constants::SHA256_HEX_LENGTH
            || !hex.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(crate::error::VesselError::Config {
                message: format!("invalid SHA-256 digest: {value}"),
            });
        }
        Ok(Self(value))
    }

    /// Builds a digest from a raw hex payload, adding the `sha256:` prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not a valid 64-character hex string.
    pub fn from_hex(hex: impl AsRef<str>) -> crate::error::Result<Self> {
        Self::parse(format!("sha256:{}", hex.as_ref()))
    }

    /// Returns the full `sha256:<hex>` string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the hex payload without the algorithm prefix.
    #[must_use]
    pub fn hex(&self) -> &str {
        self.0.trim_start_matches("sha256:")
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Advisory resource hints for a container.
///
/// Attached to a launch spec but not enforced by the default runtime
/// path; see the `ResourceLimiter` capability in `vessel-core`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceLimits {
    /// Fraction of one CPU the container may use (0.0, 1.0].
    pub cpu_fraction: Option<f64>,
    /// Memory limit in bytes.
    pub memory_bytes: Option<u64>,
}
