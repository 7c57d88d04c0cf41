//! `vsl child` — Bootstrapper phase of the two-phase launch protocol.
//!
//! Never invoked by users: the launcher re-executes this binary with the
//! `child` directive and the original `run` arguments, so this handler
//! re-parses the same spec inside the freshly created namespaces and
//! hands it to the bootstrapper. On success the process image is
//! replaced by the container command and this function never returns.

use clap::Args;
use vessel_image::reference::ImageRef;
use vessel_image::store::{ImageLayerSource, ImageStore};
use vessel_runtime::bootstrap::{self, LinuxIsolation};
use vessel_runtime::paths::ContainerPaths;
use vessel_runtime::spec::ContainerSpec;

/// Arguments for the hidden `child` directive; mirrors `run`.
#[derive(Args, Debug)]
pub struct ChildArgs {
    /// Image reference, `name:tag`.
    pub image: String,

    /// Command to execute inside the container.
    #[arg(required = true, trailing_var_arg = true)]
    pub command: Vec<String>,
}

/// Executes the bootstrapper phase.
///
/// # Errors
///
/// Returns an error if any isolation step fails or the container
/// command cannot be executed.
pub fn execute(args: ChildArgs) -> anyhow::Result<()> {
    let image = ImageRef::parse(&args.image)?;
    let spec = ContainerSpec::new(image, args.command);

    tracing::debug!(id = %spec.container_id(), "bootstrapper phase started");

    let store = ImageStore::open_default()?;
    let layers = ImageLayerSource::resolve(&store, spec.image())?;
    let paths = ContainerPaths::new(&spec.container_id());

    bootstrap::run(&spec, &paths, &layers, &LinuxIsolation)?;
    Ok(())
}
