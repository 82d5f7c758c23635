//! OSD CLI - OneStep docs site tooling.
//!
//! Provides commands for:
//! - `articles`: Flatten the configured sidebar into article records
//! - `tags`: Summarize sidebar tags or list the articles carrying one
//! - `params`: Decode the query parameters of a URL
//! - `site`: Print the resolved site metadata

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ArticlesArgs, ParamsArgs, SiteArgs, TagsArgs};
use error::CliError;
use output::Output;

/// OSD - OneStep docs site tooling.
#[derive(Parser)]
#[command(name = "osd", version, about)]
struct Cli {
    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the sidebar as flat article records.
    Articles(ArticlesArgs),
    /// Print the sidebar tag index.
    Tags(TagsArgs),
    /// Decode the query parameters of a URL.
    Params(ParamsArgs),
    /// Print the resolved site metadata.
    Site(SiteArgs),
}

impl Commands {
    fn execute(self) -> Result<(), CliError> {
        match self {
            Self::Articles(args) => args.execute(),
            Self::Tags(args) => args.execute(),
            Self::Params(args) => args.execute(),
            Self::Site(args) => args.execute(),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG (ERROR when unset)
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.command.execute() {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
