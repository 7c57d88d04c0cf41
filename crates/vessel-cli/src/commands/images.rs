//! `vsl images` — List pulled images from the local catalog.

use clap::Args;
use vessel_image::catalog::ImageCatalog;
use vessel_image::store::ImageStore;

/// Arguments for the `images` command.
#[derive(Args, Debug)]
pub struct ImagesArgs {
    /// Remove an image's catalog entry by reference instead of listing.
    #[arg(long)]
    pub remove: Option<String>,
}

/// Executes the `images` command.
///
/// # Errors
///
/// Returns an error if catalog operations fail.
pub fn execute(args: ImagesArgs) -> anyhow::Result<()> {
    let store = ImageStore::open_default()?;
    let catalog = ImageCatalog::open(store.root())?;

    if let Some(reference) = args.remove {
        catalog.remove(&reference)?;
        eprintln!("removed {reference}");
        return Ok(());
    }

    println!("REFERENCE\tLAYERS\tSIZE\tPULLED");
    for entry in catalog.list()? {
        println!(
            "{}\t{}\t{}\t{}",
            entry.reference,
            entry.layers.len(),
            crate::output::format_bytes(entry.size_bytes),
            entry.pulled_at
        );
    }
    Ok(())
}
