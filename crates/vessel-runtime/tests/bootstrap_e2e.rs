//! End-to-end bootstrap sequencing tests.
//!
//! Drives the full bootstrap through a recording [`IsolationBackend`]
//! fake, verifying the mandatory step order, failure propagation, and
//! copy-on-write layout without requiring namespaces or root.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use vessel_common::error::{Result, VesselError};
use vessel_common::types::ContainerId;
use vessel_core::filesystem::overlay::OverlayConfig;
use vessel_image::reference::ImageRef;
use vessel_image::store::{ImageLayerSource, ImageStore};
use vessel_runtime::bootstrap::{self, IsolationBackend};
use vessel_runtime::paths::ContainerPaths;
use vessel_runtime::spec::ContainerSpec;

/// One recorded backend operation.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Op {
    SetHostname(String),
    MakeMountsPrivate,
    MountOverlay {
        lower: PathBuf,
        upper: PathBuf,
        work: PathBuf,
        merged: PathBuf,
    },
    MountProc(PathBuf),
    MountSysfs(PathBuf),
    MountDev(PathBuf),
    CreateDeviceNodes(PathBuf),
    PivotRoot {
        new_root: PathBuf,
        put_old: PathBuf,
    },
    SetWorkingDir(PathBuf),
    DetachOldRoot(PathBuf),
    Exec(Vec<String>),
}

impl Op {
    fn name(&self) -> &'static str {
        match self {
            Self::SetHostname(_) => "set_hostname",
            Self::MakeMountsPrivate => "make_mounts_private",
            Self::MountOverlay { .. } => "mount_overlay",
            Self::MountProc(_) => "mount_proc",
            Self::MountSysfs(_) => "mount_sysfs",
            Self::MountDev(_) => "mount_dev",
            Self::CreateDeviceNodes(_) => "create_device_nodes",
            Self::PivotRoot { .. } => "pivot_root",
            Self::SetWorkingDir(_) => "set_working_dir",
            Self::DetachOldRoot(_) => "detach_old_root",
            Self::Exec(_) => "exec",
        }
    }
}

/// Backend fake that records every operation and can fail on demand.
#[derive(Debug, Default)]
struct RecordingBackend {
    ops: RefCell<Vec<Op>>,
    fail_on: Option<&'static str>,
}

impl RecordingBackend {
    fn failing_on(op: &'static str) -> Self {
        Self {
            ops: RefCell::new(Vec::new()),
            fail_on: Some(op),
        }
    }

    fn record(&self, op: Op) -> Result<()> {
        let fail = self.fail_on == Some(op.name());
        self.ops.borrow_mut().push(op);
        if fail {
            return Err(VesselError::PermissionDenied {
                message: "injected failure".into(),
            });
        }
        Ok(())
    }

    fn op_names(&self) -> Vec<&'static str> {
        self.ops.borrow().iter().map(Op::name).collect()
    }
}

impl IsolationBackend for RecordingBackend {
    fn set_hostname(&self, hostname: &str) -> Result<()> {
        self.record(Op::SetHostname(hostname.into()))
    }

    fn make_mounts_private(&self) -> Result<()> {
        self.record(Op::MakeMountsPrivate)
    }

    fn mount_overlay(&self, config: &OverlayConfig) -> Result<()> {
        self.record(Op::MountOverlay {
            lower: config.lower_dir.clone(),
            upper: config.upper_dir.clone(),
            work: config.work_dir.clone(),
            merged: config.merged_dir.clone(),
        })
    }

    fn mount_proc(&self, root: &Path) -> Result<()> {
        self.record(Op::MountProc(root.into()))
    }

    fn mount_sysfs(&self, root: &Path) -> Result<()> {
        self.record(Op::MountSysfs(root.into()))
    }

    fn mount_dev(&self, root: &Path) -> Result<()> {
        self.record(Op::MountDev(root.into()))
    }

    fn create_device_nodes(&self, dev_dir: &Path) -> Result<()> {
        self.record(Op::CreateDeviceNodes(dev_dir.into()))
    }

    fn pivot_root(&self, new_root: &Path, put_old: &Path) -> Result<()> {
        self.record(Op::PivotRoot {
            new_root: new_root.into(),
            put_old: put_old.into(),
        })
    }

    fn set_working_dir(&self, path: &Path) -> Result<()> {
        self.record(Op::SetWorkingDir(path.into()))
    }

    fn detach_old_root(&self, old_root: &Path) -> Result<()> {
        self.record(Op::DetachOldRoot(old_root.into()))
    }

    fn exec(&self, command: &[String]) -> Result<()> {
        self.record(Op::Exec(command.to_vec()))
    }
}

/// A pulled image plus container paths, all inside one tempdir.
struct Fixture {
    _dir: tempfile::TempDir,
    store: ImageStore,
    image: ImageRef,
    layers: ImageLayerSource,
    paths: ContainerPaths,
    spec: ContainerSpec,
}

fn fixture(command: &[&str]) -> Fixture {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ImageStore::open(dir.path().join("images")).expect("store open failed");
    let image = ImageRef::parse("alpine:latest").expect("parse failed");
    store.prepare(&image).expect("prepare failed");
    std::fs::write(store.contents_dir(&image).join("hello.txt"), b"hi").expect("seed failed");

    let layers = ImageLayerSource::resolve(&store, &image).expect("resolve failed");
    let paths = ContainerPaths::for_id(
        &dir.path().join("containers"),
        &ContainerId::from_image("alpine", "latest"),
    );
    let spec = ContainerSpec::new(
        image.clone(),
        command.iter().map(ToString::to_string).collect(),
    );
    Fixture {
        _dir: dir,
        store,
        image,
        layers,
        paths,
        spec,
    }
}

#[test]
fn bootstrap_runs_every_step_in_the_mandatory_order() {
    let fx = fixture(&["cat", "/hello.txt"]);
    let backend = RecordingBackend::default();

    bootstrap::run(&fx.spec, &fx.paths, &fx.layers, &backend).expect("bootstrap failed");

    assert_eq!(
        backend.op_names(),
        [
            "set_hostname",
            "make_mounts_private",
            "mount_overlay",
            "mount_proc",
            "mount_sysfs",
            "mount_dev",
            "create_device_nodes",
            "pivot_root",
            "set_working_dir",
            "detach_old_root",
            "exec",
        ]
    );
}

#[test]
fn mount_private_always_precedes_the_overlay_mount() {
    let fx = fixture(&["/bin/sh"]);
    let backend = RecordingBackend::default();

    bootstrap::run(&fx.spec, &fx.paths, &fx.layers, &backend).expect("bootstrap failed");

    let names = backend.op_names();
    let private = names
        .iter()
        .position(|n| *n == "make_mounts_private")
        .expect("private missing");
    let overlay = names
        .iter()
        .position(|n| *n == "mount_overlay")
        .expect("overlay missing");
    assert!(private < overlay);
}

#[test]
fn hostname_is_the_deterministic_container_id() {
    let fx = fixture(&["/bin/sh"]);
    let backend = RecordingBackend::default();

    bootstrap::run(&fx.spec, &fx.paths, &fx.layers, &backend).expect("bootstrap failed");

    assert_eq!(
        backend.ops.borrow()[0],
        Op::SetHostname("alpine_latest".into())
    );
}

#[test]
fn overlay_combines_image_contents_with_container_dirs() {
    let fx = fixture(&["/bin/sh"]);
    let backend = RecordingBackend::default();

    bootstrap::run(&fx.spec, &fx.paths, &fx.layers, &backend).expect("bootstrap failed");

    let ops = backend.ops.borrow();
    let overlay = ops
        .iter()
        .find(|op| matches!(op, Op::MountOverlay { .. }))
        .expect("overlay missing");
    assert_eq!(
        *overlay,
        Op::MountOverlay {
            lower: fx.store.contents_dir(&fx.image),
            upper: fx.paths.upper.clone(),
            work: fx.paths.work.clone(),
            merged: fx.paths.rootfs.clone(),
        }
    );
}

#[test]
fn pseudo_filesystems_target_paths_under_the_new_root() {
    let fx = fixture(&["/bin/sh"]);
    let backend = RecordingBackend::default();

    bootstrap::run(&fx.spec, &fx.paths, &fx.layers, &backend).expect("bootstrap failed");

    let ops = backend.ops.borrow();
    assert!(ops.contains(&Op::MountProc(fx.paths.rootfs.clone())));
    assert!(ops.contains(&Op::MountSysfs(fx.paths.rootfs.clone())));
    assert!(ops.contains(&Op::MountDev(fx.paths.rootfs.clone())));
    assert!(ops.contains(&Op::CreateDeviceNodes(fx.paths.rootfs.join("dev"))));
}

#[test]
fn pivot_parks_the_old_root_inside_the_new_root() {
    let fx = fixture(&["/bin/sh"]);
    let backend = RecordingBackend::default();

    bootstrap::run(&fx.spec, &fx.paths, &fx.layers, &backend).expect("bootstrap failed");

    let ops = backend.ops.borrow();
    assert!(ops.contains(&Op::PivotRoot {
        new_root: fx.paths.rootfs.clone(),
        put_old: fx.paths.rootfs.join("oldroot"),
    }));
    // After the pivot the old root is addressed relative to the new /.
    assert!(ops.contains(&Op::DetachOldRoot(PathBuf::from("/oldroot"))));
    assert!(ops.contains(&Op::SetWorkingDir(PathBuf::from("/"))));
}

#[test]
fn exec_receives_the_user_command_verbatim_and_runs_last() {
    let fx = fixture(&["cat", "/hello.txt"]);
    let backend = RecordingBackend::default();

    bootstrap::run(&fx.spec, &fx.paths, &fx.layers, &backend).expect("bootstrap failed");

    let ops = backend.ops.borrow();
    assert_eq!(
        *ops.last().expect("no ops"),
        Op::Exec(vec!["cat".into(), "/hello.txt".into()])
    );
}

#[test]
fn a_failing_step_aborts_with_no_later_operations() {
    let fx = fixture(&["/bin/sh"]);
    let backend = RecordingBackend::failing_on("mount_overlay");

    let err = bootstrap::run(&fx.spec, &fx.paths, &fx.layers, &backend)
        .expect_err("bootstrap should fail");
    assert!(matches!(err, VesselError::PermissionDenied { .. }));

    let names = backend.op_names();
    assert_eq!(
        names,
        ["set_hostname", "make_mounts_private", "mount_overlay"]
    );
    assert!(!names.contains(&"exec"));
}

#[test]
fn a_failing_hostname_aborts_before_any_mount() {
    let fx = fixture(&["/bin/sh"]);
    let backend = RecordingBackend::failing_on("set_hostname");

    let _ = bootstrap::run(&fx.spec, &fx.paths, &fx.layers, &backend)
        .expect_err("bootstrap should fail");
    assert_eq!(backend.op_names(), ["set_hostname"]);
}

#[test]
fn composition_wipes_residue_from_a_previous_session() {
    let fx = fixture(&["/bin/sh"]);

    fx.paths.reset().expect("reset failed");
    std::fs::write(fx.paths.upper.join("newfile"), b"x").expect("seed residue failed");

    let backend = RecordingBackend::default();
    bootstrap::run(&fx.spec, &fx.paths, &fx.layers, &backend).expect("bootstrap failed");

    assert!(!fx.paths.upper.join("newfile").exists());
    assert!(fx.paths.upper.is_dir());
    assert!(fx.paths.work.is_dir());
}

#[test]
fn image_contents_survive_a_container_session_untouched() {
    let fx = fixture(&["/bin/sh"]);
    let backend = RecordingBackend::default();

    bootstrap::run(&fx.spec, &fx.paths, &fx.layers, &backend).expect("bootstrap failed");

    // Container-side writes land in the upper directory, never the image.
    std::fs::write(fx.paths.upper.join("newfile"), b"x").expect("write failed");

    let lower = fx.store.contents_dir(&fx.image);
    let hello = std::fs::read_to_string(lower.join("hello.txt")).expect("read failed");
    assert_eq!(hello, "hi");
    assert!(!lower.join("newfile").exists());
}
