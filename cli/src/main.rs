//! `skill-harvester` entry point.
//!
//! See the library docs for usage. Logging goes to stderr and follows
//! `RUST_LOG`; the candidate report goes to stdout.

use std::io;

use anyhow::Result;
use clap::Parser;
use harvester_cli::{Args, run};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let mut stdout = io::stdout().lock();
    run(&args, &mut stdout)?;
    Ok(())
}
