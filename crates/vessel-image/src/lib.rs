//! # vessel-image
//!
//! Image pulling for the Vessel runtime.
//!
//! Handles:
//! - **References**: `name[:tag]` parsing with a `latest` default.
//! - **Registry**: anonymous Docker Hub token auth, manifest resolution,
//!   and layer blob download over blocking HTTP.
//! - **Layers**: gzip-tar extraction into a per-image contents directory.
//! - **Store**: the on-disk image layout and layer-source resolution.
//! - **Catalog**: a local JSON index of pulled images.
//! - **Hashing**: SHA-256 digest verification of downloaded blobs.
//!
//! The container core consumes exactly one artifact from this crate: a
//! [`store::ImageLayerSource`] pointing at the fully extracted, ready-to-
//! mount contents directory for an image.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod catalog;
pub mod hash;
pub mod layer;
pub mod pull;
pub mod reference;
pub mod registry;
pub mod store;
