//! `vsl run` — Launch a command inside an isolated container.

use clap::Args;
use vessel_common::config::VesselConfig;
use vessel_core::cgroup::CgroupLimiter;
use vessel_image::reference::ImageRef;
use vessel_image::store::ImageStore;
use vessel_runtime::launcher::Launcher;
use vessel_runtime::spec::ContainerSpec;

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Image reference, `name` or `name:tag` (tag defaults to latest).
    pub image: String,

    /// Fraction of one CPU the container may use, e.g. 0.5.
    #[arg(long)]
    pub cpu: Option<f64>,

    /// Memory limit in bytes.
    #[arg(long)]
    pub memory: Option<u64>,

    /// Enforce the cpu/memory hints via cgroups v2 instead of only
    /// recording them.
    #[arg(long)]
    pub enforce_limits: bool,

    /// Command to execute inside the container.
    #[arg(required = true, trailing_var_arg = true)]
    pub command: Vec<String>,
}

/// Executes the `run` command.
///
/// Blocks until the container exits, then exits this process with the
/// container's own exit code.
///
/// # Errors
///
/// Returns an error if the reference is invalid, the image has not been
/// pulled, or launching fails.
pub fn execute(args: RunArgs) -> anyhow::Result<()> {
    let image = ImageRef::parse(&args.image)?;

    let config = VesselConfig::default();
    let mut limits = config.default_limits;
    if args.cpu.is_some() {
        limits.cpu_fraction = args.cpu;
    }
    if args.memory.is_some() {
        limits.memory_bytes = args.memory;
    }
    let spec = ContainerSpec::new(image, args.command).with_limits(limits);

    let store = ImageStore::open_default()?;
    let mut launcher = Launcher::new();
    if args.enforce_limits {
        launcher = launcher.with_limiter(Box::new(CgroupLimiter::new()));
    }

    let code = launcher.launch(&spec, &store)?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
