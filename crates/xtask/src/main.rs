//! Development tasks for the character builder
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod dirs;

use anyhow::Result;
use clap::Parser;
use commands::{CheckCatalog, Edit, Explain};

/// Development tasks for the character builder
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for the character builder", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Print every derived number of a character with its breakdown
    Explain(Explain),

    /// Validate the catalog files of a data directory
    CheckCatalog(CheckCatalog),

    /// Apply feat and toggle edits to a character file
    Edit(Edit),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for BUILDER_DATA_DIR and RUST_LOG)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Explain(cmd) => cmd.execute(),
        Command::CheckCatalog(cmd) => cmd.execute(),
        Command::Edit(cmd) => cmd.execute(),
    }
}
