//! navtree CLI - Navigation tree renderer.
//!
//! Provides commands for:
//! - `render`: Render the tree HTML opened at a page
//! - `locate`: Show where a page sits in the tree
//! - `tree`: Print the tree model as an outline

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{LocateArgs, RenderArgs, TreeArgs};
use output::Output;

/// navtree - Navigation tree renderer.
#[derive(Parser)]
#[command(name = "navtree", version, about)]
struct Cli {
    /// Enable verbose output (show lookup and degraded entry logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the tree HTML opened at a page.
    Render(RenderArgs),
    /// Show the index path and breadcrumbs of a page.
    Locate(LocateArgs),
    /// Print the tree model as an indented outline.
    Tree(TreeArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Locate(args) => args.execute(),
        Commands::Tree(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
