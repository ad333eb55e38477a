//! dockergen — render ComfyUI Dockerfiles from image definitions.
//!
//! # Usage
//!
//! ```text
//! dockergen generate [-c CONFIG] [-d DEFS] [-t TEMPLATE] [-o OUT] [--dry-run] [--keep-going] [--reject-collisions]
//! dockergen diff     [-c CONFIG] [-d DEFS] [-t TEMPLATE] [-o OUT] [--reject-collisions]
//! dockergen list     [-c CONFIG] [-d DEFS] [-o OUT] [--json]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{diff::DiffArgs, generate::GenerateArgs, list::ListArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "dockergen",
    version,
    about = "Generate Dockerfiles from a list of image definitions",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render and write one Dockerfile per image definition.
    Generate(GenerateArgs),

    /// Show unified diff of what generate would write.
    Diff(DiffArgs),

    /// List each definition and the Dockerfile path it maps to.
    List(ListArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Generate(args) => args.run(),
        Commands::Diff(args) => args.run(),
        Commands::List(args) => args.run(),
    }
}

/// Logs go to stderr so stdout only carries command output.
/// Verbosity comes from `RUST_LOG` (default `warn`).
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
