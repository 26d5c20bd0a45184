#![forbid(unsafe_code)]

//! Quern CLI
//!
//! Command-line interface for the Quern markdown CMS backend.

use anyhow::Result;
use clap::Parser;

use quern_cli::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    quern_cli::init_logging(args.verbose, args.quiet);
    quern_cli::handlers::run(args)?;
    Ok(())
}
