//! The pull pipeline.
//!
//! Orchestrates token auth, manifest resolution, blob download, digest
//! verification, and extraction into the store. Must complete before
//! `run` can use the image; a failed pull leaves no catalog entry.

use vessel_common::error::Result;
use vessel_common::types::Digest;

use crate::catalog::{ImageCatalog, ImageEntry};
use crate::reference::ImageRef;
use crate::registry::RegistryClient;
use crate::store::ImageStore;

/// Summary of a completed pull.
#[derive(Debug, Clone)]
pub struct PulledImage {
    /// The pulled reference.
    pub image: ImageRef,
    /// Layer digests in manifest order.
    pub layers: Vec<Digest>,
    /// Total downloaded bytes across all layers.
    pub size_bytes: u64,
}

/// Pulls an image into the store and registers it in the catalog.
///
/// The image directory is destructively reset first, so a re-pull always
/// yields a clean contents tree. Each blob is digest-verified before
/// extraction.
///
/// # Errors
///
/// Returns an error on any registry, verification, or filesystem failure;
/// the partially written image directory is left for the next pull's
/// reset to clean up.
pub fn pull_image(
    store: &ImageStore,
    client: &RegistryClient,
    image: &ImageRef,
) -> Result<PulledImage> {
    tracing::info!(image = %image, "pulling image");
    store.prepare(image)?;

    let token = client.fetch_token(image)?;
    let manifest = client.fetch_manifest(image, &token)?;
    let layers = manifest.layer_digests()?;

    let layers_dir = store.layers_dir(image);
    let contents_dir = store.contents_dir(image);
    let mut size_bytes = 0u64;

    for digest in &layers {
        let archive = layers_dir.join(format!("{}.tar.gz", digest.hex()));
        size_bytes += client.download_blob(image, digest, &token, &archive)?;
        crate::hash::verify_digest(&archive, digest)?;
        let _ = crate::layer::extract_layer(&archive, &contents_dir)?;
    }

    let catalog = ImageCatalog::open(store.root())?;
    catalog.register(ImageEntry::new(
        image.to_string(),
        layers.clone(),
        size_bytes,
    ))?;

    tracing::info!(image = %image, layers = layers.len(), size_bytes, "image pulled");
    Ok(PulledImage {
        image: image.clone(),
        layers,
        size_bytes,
    })
}
