//! # vessel-core
//!
//! Low-level Linux isolation primitives for the Vessel runtime.
//!
//! This crate provides safe abstractions over:
//! - **Namespaces**: UTS, PID, and mount isolation via `unshare(2)`.
//! - **Filesystem**: overlay mounts, pseudo-filesystems, device nodes,
//!   and `pivot_root(2)` root switching.
//! - **Cgroups v2**: optional CPU and memory limiting behind the
//!   [`cgroup::ResourceLimiter`] capability.
//!
//! Every privileged operation has a `#[cfg(target_os = "linux")]`
//! implementation and a non-Linux stub that fails with a configuration
//! error, so higher layers compile and unit-test everywhere.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod cgroup;
pub mod filesystem;
pub mod namespace;
