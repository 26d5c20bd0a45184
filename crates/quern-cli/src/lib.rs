//! # quern-cli
//!
//! Command-line front end for the Quern markdown CMS backend.
//!
//! The `quern` binary loads a `quern.toml` project config (content folder
//! plus content-type schemas), builds the backend, and exposes the query
//! surface as subcommands: `build`, `render`, `get`, `list`, `count`,
//! `sections`, `sitemap`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;

pub use error::{Error, Result};

use tracing_subscriber::EnvFilter;

/// Initialise logging.
///
/// Uses `RUST_LOG` when set, otherwise defaults based on verbosity flags.
pub fn init_logging(verbose: bool, quiet: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if quiet {
        EnvFilter::new("warn")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Ignore error if a subscriber is already set (e.g. in tests).
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
