//! System-wide constants and default paths.

use std::path::PathBuf;
use std::sync::OnceLock;

/// Default base directory for Vessel data on Linux with root access.
pub const SYSTEM_DATA_DIR: &str = "/var/lib/vessel";

/// Returns the data directory, preferring `$HOME/.vessel` for non-root
/// or non-Linux environments, falling back to `/var/lib/vessel`.
fn resolve_data_dir() -> PathBuf {
    if let Ok(home) = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE")) {
        let user_dir = PathBuf::from(home).join(".vessel");
        if std::fs::create_dir_all(&user_dir).is_ok() {
            return user_dir;
        }
    }
    PathBuf::from(SYSTEM_DATA_DIR)
}

static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Returns the resolved data directory for this session.
pub fn data_dir() -> &'static PathBuf {
    DATA_DIR.get_or_init(resolve_data_dir)
}

/// Returns the default image store path.
pub fn default_image_store() -> PathBuf {
    data_dir().join("images")
}

/// Returns the default per-container directory root.
pub fn default_container_dir() -> PathBuf {
    data_dir().join("containers")
}

/// Directory name of the overlay mount point inside a container directory.
pub const ROOTFS_DIR: &str = "rootfs";

/// Directory name of the copy-on-write upper layer.
pub const UPPER_DIR: &str = "cow_rw";

/// Directory name of the overlay work directory.
pub const WORK_DIR: &str = "cow_workdir";

/// Mount-point name the old root is pivoted onto, relative to the new root.
pub const OLD_ROOT_DIR: &str = "oldroot";

/// Directory name for downloaded layer archives inside an image directory.
pub const LAYERS_DIR: &str = "layers";

/// Directory name for extracted layer contents inside an image directory.
pub const CONTENTS_DIR: &str = "contents";

/// Docker Hub token service endpoint.
pub const AUTH_URL: &str = "https://auth.docker.io/token";

/// Docker Hub registry v2 endpoint.
pub const REGISTRY_URL: &str = "https://registry-1.docker.io/v2";

/// Tag assumed when an image reference carries none.
pub const DEFAULT_TAG: &str = "latest";

/// Cgroups v2 unified hierarchy mount point.
pub const CGROUP_V2_PATH: &str = "/sys/fs/cgroup";

/// SHA-256 digest length in hex characters.
pub const SHA256_HEX_LENGTH: usize = 64;

/// Application name used in CLI output and catalog files.
pub const APP_NAME: &str = "vessel";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "vsl";
