//! Linux namespace management for container isolation.
//!
//! A container child gets exactly three new namespaces: UTS (hostname),
//! PID (process IDs), and mount (filesystem view). The kernel splits how
//! these are acquired: `CLONE_NEWPID` affects *future children* of the
//! caller and is therefore unshared on the launcher side before spawning,
//! while `CLONE_NEWNS` and `CLONE_NEWUTS` move the calling process and
//! must run in the forked child before it execs.

pub mod mount;
pub mod pid;
pub mod uts;

/// The set of isolation domains requested for a container child.
///
/// A value object consumed once at child-process creation; it holds no
/// runtime handle to the namespaces it describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamespaceSet {
    /// Isolate hostname and domain name (UTS).
    pub uts: bool,
    /// Isolate the process-ID space.
    pub pid: bool,
    /// Isolate the mount table.
    pub mount: bool,
}

impl Default for NamespaceSet {
    fn default() -> Self {
        Self {
            uts: true,
            pid: true,
            mount: true,
        }
    }
}

#[cfg(target_os = "linux")]
impl NamespaceSet {
    /// Flags to unshare in the launcher before spawning the child.
    ///
    /// `CLONE_NEWPID` does not move the caller; it places the caller's
    /// subsequent children into the new namespace, making the container
    /// process PID 1.
    #[must_use]
    pub fn launcher_flags(&self) -> nix::sched::CloneFlags {
        let mut flags = nix::sched::CloneFlags::empty();
        if self.pid {
            flags |= nix::sched::CloneFlags::CLONE_NEWPID;
        }
        flags
    }

    /// Flags to unshare in the forked child before exec.
    ///
    /// `CLONE_NEWNS` and `CLONE_NEWUTS` apply to the calling process
    /// immediately and survive the exec.
    #[must_use]
    pub fn child_flags(&self) -> nix::sched::CloneFlags {
        let mut flags = nix::sched::CloneFlags::empty();
        if self.mount {
            flags |= nix::sched::CloneFlags::CLONE_NEWNS;
        }
        if self.uts {
            flags |= nix::sched::CloneFlags::CLONE_NEWUTS;
        }
        flags
    }
}
