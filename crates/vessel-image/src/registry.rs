//! Docker Hub registry client.
//!
//! Anonymous pull flow: fetch a bearer token from the token service,
//! resolve the tag's manifest, then download each referenced layer blob.
//! See <https://docs.docker.com/registry/spec/auth/jwt/>.

use std::path::Path;

use serde::Deserialize;
use vessel_common::error::{Result, VesselError};
use vessel_common::types::Digest;

use crate::reference::ImageRef;

/// Service name presented to the token endpoint.
const REGISTRY_SERVICE: &str = "registry.docker.io";

/// Response from the token service.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// A single layer reference in a v2 schema-1 manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct FsLayer {
    /// Content digest of the layer blob.
    #[serde(rename = "blobSum")]
    pub blob_sum: String,
}

/// An image manifest (v2 schema 1), reduced to the fields the pull
/// pipeline consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    /// Repository name, as echoed by the registry.
    #[serde(default)]
    pub name: String,
    /// Tag this manifest was resolved for.
    #[serde(default)]
    pub tag: String,
    /// Layer blob references, in manifest order.
    #[serde(rename = "fsLayers", default)]
    pub fs_layers: Vec<FsLayer>,
}

impl Manifest {
    /// Returns the parsed layer digests in manifest order.
    ///
    /// # Errors
    ///
    /// Returns an error if any `blobSum` is not a valid SHA-256 digest.
    pub fn layer_digests(&self) -> Result<Vec<Digest>> {
        self.fs_layers
            .iter()
            .map(|l| Digest::parse(&l.blob_sum))
            .collect()
    }
}

/// Blocking HTTP client for a v2 registry.
#[derive(Debug)]
pub struct RegistryClient {
    http: reqwest::blocking::Client,
    registry_url: String,
    auth_url: String,
}

impl RegistryClient {
    /// Creates a client against the configured endpoints.
    #[must_use]
    pub fn new(registry_url: impl Into<String>, auth_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            registry_url: registry_url.into(),
            auth_url: auth_url.into(),
        }
    }

    /// Fetches an anonymous pull token for an official-library image.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response carries no
    /// token.
    pub fn fetch_token(&self, image: &ImageRef) -> Result<String> {
        let url = format!(
            "{}?service={REGISTRY_SERVICE}&scope=repository:library/{}:pull",
            self.auth_url,
            image.name()
        );
        let response: TokenResponse = self
            .http
            .get(&url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| VesselError::Registry {
                message: format!("token request failed: {e}"),
            })?
            .json()
            .map_err(|e| VesselError::Registry {
                message: format!("token response unreadable: {e}"),
            })?;
        tracing::debug!(image = %image, "pull token acquired");
        Ok(response.token)
    }

    /// Fetches the manifest for an image tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the registry refuses the
    /// tag, or the body is not a manifest.
    pub fn fetch_manifest(&self, image: &ImageRef, token: &str) -> Result<Manifest> {
        tracing::info!(image = %image, "fetching manifest");
        let url = format!(
            "{}/library/{}/manifests/{}",
            self.registry_url,
            image.name(),
            image.tag()
        );
        let manifest: Manifest = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| VesselError::Registry {
                message: format!("manifest request for {image} failed: {e}"),
            })?
            .json()
            .map_err(|e| VesselError::Registry {
                message: format!("manifest for {image} unreadable: {e}"),
            })?;
        if manifest.fs_layers.is_empty() {
            return Err(VesselError::Registry {
                message: format!("manifest for {image} lists no layers"),
            });
        }
        Ok(manifest)
    }

    /// Downloads a layer blob to `dest`, returning its size in bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the file cannot be
    /// written.
    pub fn download_blob(
        &self,
        image: &ImageRef,
        digest: &Digest,
        token: &str,
        dest: &Path,
    ) -> Result<u64> {
        let url = format!(
            "{}/library/{}/blobs/{}",
            self.registry_url,
            image.name(),
            digest
        );
        let mut response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| VesselError::Registry {
                message: format!("blob request for {digest} failed: {e}"),
            })?;

        let mut file = std::fs::File::create(dest).map_err(|e| VesselError::io(dest, e))?;
        let written = response
            .copy_to(&mut file)
            .map_err(|e| VesselError::Registry {
                message: format!("blob download for {digest} failed: {e}"),
            })?;
        tracing::debug!(digest = %digest, bytes = written, "layer blob downloaded");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_layer_digests_parse_in_order() {
        let json = r#"{
            "name": "library/alpine",
            "tag": "latest",
            "fsLayers": [
                {"blobSum": "sha256:aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"},
                {"blobSum": "sha256:bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"}
            ]
        }"#;
        let manifest: Manifest = serde_json::from_str(json).expect("parse failed");
        let digests = manifest.layer_digests().expect("digests failed");
        assert_eq!(digests.len(), 2);
        assert!(digests[0].hex().starts_with('a'));
        assert!(digests[1].hex().starts_with('b'));
    }

    #[test]
    fn manifest_rejects_malformed_blob_sum() {
        let json = r#"{"fsLayers": [{"blobSum": "md5:nope"}]}"#;
        let manifest: Manifest = serde_json::from_str(json).expect("parse failed");
        assert!(manifest.layer_digests().is_err());
    }

    #[test]
    fn manifest_tolerates_missing_optional_fields() {
        let manifest: Manifest = serde_json::from_str("{}").expect("parse failed");
        assert!(manifest.fs_layers.is_empty());
        assert!(manifest.name.is_empty());
    }
}
