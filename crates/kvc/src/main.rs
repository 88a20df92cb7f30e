//! KVC - Entry Point
//!
//! Binary entry point for the `kvc` command line tool. Lives in the `kvc`
//! facade crate next to the library it drives.

use clap::Parser;
use kvc::cli::{Cli, run};

/// Parse arguments and run one cache command
///
/// Any failure, including a provider that cannot be constructed, exits
/// with a non-zero status.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run(Cli::parse()).await
}
