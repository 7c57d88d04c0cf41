//! Container launch core for the Vessel runtime.
//!
//! Two phases cooperate across a re-exec boundary:
//!
//! - The [`launcher`] runs on the host: it resolves the image's layer
//!   contents (failing fast if the image was never pulled), requests the
//!   three container namespaces, and re-invokes the current binary with a
//!   `child` directive.
//! - The [`bootstrap`] module runs as that re-executed child inside the
//!   fresh namespaces: it sets the hostname, privatizes the mount tree,
//!   composes the overlay root, populates `/proc`, `/sys`, and `/dev`,
//!   pivots the root, and execs the user command.
//!
//! All privileged operations go through the [`bootstrap::IsolationBackend`]
//! capability trait, so the whole sequence is unit-testable without
//! namespaces or root.

#![allow(unsafe_code)]
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod bootstrap;
pub mod composer;
pub mod launcher;
pub mod paths;
pub mod spec;
