//! Container launch specification.

use vessel_common::types::{ContainerId, ResourceLimits};
use vessel_image::reference::ImageRef;

/// Everything needed to launch one container.
///
/// Immutable once constructed; built from the parsed CLI arguments at
/// launch time and discarded at process exit.
#[derive(Debug, Clone)]
pub struct ContainerSpec {
    image: ImageRef,
    command: Vec<String>,
    limits: ResourceLimits,
}

impl ContainerSpec {
    /// Creates a spec for running `command` inside `image`.
    #[must_use]
    pub fn new(image: ImageRef, command: Vec<String>) -> Self {
        Self {
            image,
            command,
            limits: ResourceLimits::default(),
        }
    }

    /// Attaches advisory resource limits.
    #[must_use]
    pub fn with_limits(mut self, limits: ResourceLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Returns the image this container runs on.
    #[must_use]
    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    /// Returns the command executed inside the container.
    #[must_use]
    pub fn command(&self) -> &[String] {
        &self.command
    }

    /// Returns the advisory resource limits.
    #[must_use]
    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }

    /// Derives the deterministic container identifier, `<name>_<tag>`.
    ///
    /// The identifier doubles as the container hostname and names its
    /// directories, so the same image and tag always reuse the same
    /// on-disk location.
    #[must_use]
    pub fn container_id(&self) -> ContainerId {
        ContainerId::from_image(self.image.name(), self.image.tag())
    }
}
