//! # vsl — Vessel CLI
//!
//! Minimal daemon-less container runtime: pull an image from the
//! registry, then run a command inside an isolated copy-on-write view
//! of it.

mod commands;
mod output;

use clap::Parser;

use crate::commands::Cli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    commands::execute(cli)
}
