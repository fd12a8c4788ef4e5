//! Folio CLI - localized book site.
//!
//! Provides commands for:
//! - `serve`: Start the HTTP API server
//! - `chapters`: List chapters of one or all locales in reading order
//! - `slugs`: Print every chapter slug across locales

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ChaptersArgs, ServeArgs, SlugsArgs};
use error::CliError;
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Folio - localized book site.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server.
    Serve(ServeArgs),
    /// List chapters in reading order.
    Chapters(ChaptersArgs),
    /// Print every chapter slug across configured locales.
    Slugs(SlugsArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli.command) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Serve(args) => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(args.execute(VERSION))
        }
        Commands::Chapters(args) => args.execute(),
        Commands::Slugs(args) => args.execute(),
    }
}
