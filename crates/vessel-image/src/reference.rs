//! Image reference parsing.
//!
//! References take the form `name[:tag]`; a missing tag means `latest`.
//! Only official-library images are addressable, so the name carries no
//! registry host or repository path.

use std::fmt;

use vessel_common::constants::DEFAULT_TAG;
use vessel_common::error::{Result, VesselError};

/// A parsed `name:tag` image reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef {
    name: String,
    tag: String,
}

impl ImageRef {
    /// Parses a reference of the form `name` or `name:tag`.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or either part contains a
    /// path separator.
    pub fn parse(reference: &str) -> Result<Self> {
        let (name, tag) = match reference.split_once(':') {
            Some((name, tag)) if !tag.is_empty() => (name, tag),
            Some((name, _)) => (name, DEFAULT_TAG),
            None => (reference, DEFAULT_TAG),
        };
        if name.is_empty() || name.contains('/') || tag.contains('/') || tag.contains(':') {
            return Err(VesselError::Config {
                message: format!("invalid image reference: {reference}"),
            });
        }
        Ok(Self {
            name: name.to_string(),
            tag: tag.to_string(),
        })
    }

    /// Returns the image name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the image tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the directory name this image occupies in the store.
    #[must_use]
    pub fn dir_name(&self) -> String {
        format!("{}_{}", self.name, self.tag)
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_name_and_tag() {
        let image = ImageRef::parse("alpine:3.19").expect("parse failed");
        assert_eq!(image.name(), "alpine");
        assert_eq!(image.tag(), "3.19");
    }

    #[test]
    fn parse_defaults_missing_tag_to_latest() {
        let image = ImageRef::parse("busybox").expect("parse failed");
        assert_eq!(image.tag(), "latest");
    }

    #[test]
    fn parse_defaults_empty_tag_to_latest() {
        let image = ImageRef::parse("busybox:").expect("parse failed");
        assert_eq!(image.tag(), "latest");
    }

    #[test]
    fn parse_rejects_empty_name() {
        assert!(ImageRef::parse("").is_err());
        assert!(ImageRef::parse(":latest").is_err());
    }

    #[test]
    fn parse_rejects_path_separators() {
        assert!(ImageRef::parse("library/alpine").is_err());
    }

    #[test]
    fn parse_rejects_double_colon() {
        assert!(ImageRef::parse("alpine:3:19").is_err());
    }

    #[test]
    fn dir_name_joins_name_and_tag_with_underscore() {
        let image = ImageRef::parse("redis:7").expect("parse failed");
        assert_eq!(image.dir_name(), "redis_7");
    }

    #[test]
    fn display_uses_colon_form() {
        let image = ImageRef::parse("redis:7").expect("parse failed");
        assert_eq!(image.to_string(), "redis:7");
    }
}
