//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Quern - markdown CMS backend
#[derive(Parser, Debug)]
#[command(name = "quern")]
#[command(about = "Quern markdown CMS backend", long_about = None)]
pub struct Args {
    /// Configuration file path (default: quern.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only warnings and errors
    #[arg(short, long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// The quern subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the content folder and report statistics
    Build,
    /// Compile a single markdown file to HTML on stdout
    Render {
        /// Markdown file to compile
        file: PathBuf,
    },
    /// Fetch one entity as JSON
    Get {
        /// Logical entity path, `/`-separated
        path: String,
        /// Property expressions to project (repeatable)
        #[arg(long)]
        select: Vec<String>,
    },
    /// List entities as JSON
    List {
        /// Restrict to documents at or below this path
        #[arg(long)]
        from: Option<String>,
        /// Equality filters, `property=value` (repeatable)
        #[arg(short, long)]
        filter: Vec<String>,
        /// Sort keys, `property` or `property:desc` (repeatable)
        #[arg(short, long)]
        sort: Vec<String>,
        /// Property expressions to project (repeatable)
        #[arg(long)]
        select: Vec<String>,
        /// Zero-indexed page
        #[arg(long, default_value_t = 0)]
        page: usize,
        /// Page size
        #[arg(long, default_value_t = 20)]
        per_page: usize,
    },
    /// Count values of a property
    Count {
        /// Property to count
        property: String,
        /// Restrict to documents at or below this path
        #[arg(long)]
        from: Option<String>,
    },
    /// Print the section tree as JSON
    Sections {
        /// Root to list sections under
        #[arg(long)]
        from: Option<String>,
        /// Levels of children below the listed sections
        #[arg(long, default_value_t = 1)]
        depth: usize,
    },
    /// Print sitemap items as JSON
    Sitemap,
}
