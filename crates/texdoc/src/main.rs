//! texdoc CLI - LaTeX API documentation generator.
//!
//! Provides commands for:
//! - `render`: Render a JSON documentation model to a LaTeX file

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::RenderArgs;
use output::Output;

/// texdoc - LaTeX API documentation generator.
#[derive(Parser)]
#[command(name = "texdoc", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a documentation model to LaTeX.
    Render(RenderArgs),
}

fn main() {
    let cli = Cli::parse();

    let verbose = matches!(&cli.command, Commands::Render(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
    };

    if let Err(err) = result {
        Output::new(false).error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
