//! CLI command definitions and dispatch.

pub mod child;
pub mod images;
pub mod pull;
pub mod run;

use clap::{Parser, Subcommand};

/// Vessel — minimal daemon-less container runtime.
#[derive(Parser, Debug)]
#[command(name = "vsl", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pull an image's layers from the registry and extract them.
    Pull(pull::PullArgs),
    /// Run a command inside an isolated container.
    Run(run::RunArgs),
    /// Bootstrapper phase of `run`; re-invoked inside the new namespaces.
    #[command(hide = true)]
    Child(child::ChildArgs),
    /// List pulled images.
    Images(images::ImagesArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Pull(args) => pull::execute(args),
        Command::Run(args) => run::execute(args),
        Command::Child(args) => child::execute(args),
        Command::Images(args) => images::execute(args),
    }
}
