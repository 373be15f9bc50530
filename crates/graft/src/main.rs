//! graft - Entry Point
//!
//! Binary entry point for the graft inspection CLI. Lives in the `graft`
//! facade crate next to the library it re-exports.

// Force-link graft-providers to ensure linkme format registrations are included
extern crate graft_providers;

use clap::Parser;
use graft::cli::{Cli, describe_formats, execute};
use graft_infrastructure::{ConfigLoader, init_app, init_logging};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if !cli.command.needs_context() {
        println!("{}", describe_formats());
        return Ok(());
    }

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load()?;
    init_logging(config.logging.clone())?;

    let context = init_app(config)?;
    println!("{}", execute(&cli.command, &context)?);
    Ok(())
}
