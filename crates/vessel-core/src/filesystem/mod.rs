//! Filesystem management for container isolation.
//!
//! Provides the overlay mount combining image layers with a writable
//! upper directory, pseudo-filesystem mounts (`/proc`, `/sys`, `/dev`),
//! the minimum device-node set, and `pivot_root` root switching.

pub mod devices;
pub mod mount;
pub mod overlay;
pub mod pivot_root;
