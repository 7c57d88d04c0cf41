//! `vsl pull` — Download and extract an image from the registry.

use clap::Args;
use vessel_common::config::VesselConfig;
use vessel_image::pull::pull_image;
use vessel_image::reference::ImageRef;
use vessel_image::registry::RegistryClient;
use vessel_image::store::ImageStore;

const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// Arguments for the `pull` command.
#[derive(Args, Debug)]
pub struct PullArgs {
    /// Image reference, `name` or `name:tag` (tag defaults to latest).
    pub image: String,
}

/// Executes the `pull` command.
///
/// # Errors
///
/// Returns an error if the reference is invalid or the pull fails.
pub fn execute(args: PullArgs) -> anyhow::Result<()> {
    let image = ImageRef::parse(&args.image)?;
    eprintln!("Pulling {BOLD}{image}{RESET} ...");

    let config = VesselConfig::default();
    let store = ImageStore::open_default()?;
    let client = RegistryClient::new(config.registry_url, config.auth_url);
    let pulled = pull_image(&store, &client, &image)?;

    eprintln!(
        "{GREEN}image {} has been pulled{RESET} ({} layer(s), {})",
        pulled.image,
        pulled.layers.len(),
        crate::output::format_bytes(pulled.size_bytes)
    );
    Ok(())
}
