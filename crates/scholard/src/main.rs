//! Command line interface for the scholar journal typesetter.
//!
//! This crate provides the `scholar` binary for keeping a library of analysed research
//! papers and exporting them as PDFs. It supports operations like:
//! - Importing paper records from JSON
//! - Listing, searching and removing saved papers
//! - Exporting a single paper's analysis
//! - Building a journal of many papers with a linked table of contents
//!
//! # Usage
//!
//! ```bash
//! # Import search results saved as JSON
//! scholar add results.json
//!
//! # Search the library
//! scholar search "diffusion"
//!
//! # Export one paper, then a journal of everything
//! scholar export 2401.00001 --out exports
//! scholar journal --out exports
//! ```
//!
//! Destructive operations ask for confirmation unless `--accept-defaults` is passed. The
//! `-v` flag raises logging verbosity; logs go to stderr.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::path::PathBuf;

use clap::{builder::ArgAction, Args, Parser, Subcommand};
use console::style;
use scholar::{
  error::ScholarError,
  export::{export_journal, export_paper},
  library::{load_records, Library},
  prelude::*,
};
use tracing::{debug, trace, warn};
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod error;
pub mod interaction;

use crate::{commands::*, error::*, interaction::*};

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "Build PDF journals from analysed research papers")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Path to the library file. If not specified, uses the default platform-specific data
  /// directory.
  #[arg(long, short, global = true)]
  path: Option<PathBuf>,

  /// TOML file overriding page size, margins and line spacing
  #[arg(long, global = true)]
  layout: Option<PathBuf>,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Commands,

  /// Skip all prompts and accept defaults (mostly for testing)
  #[arg(long, hide = true, global = true)]
  accept_defaults: bool,
}

/// Configures the logging system based on the verbosity level
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .with_target(true)
    .init();
}

/// Opens the library and layout configuration, then runs the requested command.
async fn run(cli: Cli) -> Result<()> {
  let path = cli.path.clone().unwrap_or_else(Library::default_path);
  trace!("Using library at: {}", path.display());
  let mut library = Library::open(&path).await?;

  let config = match &cli.layout {
    Some(layout) => LayoutConfig::from_path(layout)?,
    None => LayoutConfig::default(),
  };
  debug!("Layout configuration: {config:?}");

  let interaction = Terminal::new(cli.accept_defaults);
  match cli.command {
    Commands::Add(args) => add(&interaction, &mut library, args).await,
    Commands::List => list(&interaction, &library),
    Commands::Search(args) => search(&interaction, &library, args),
    Commands::Remove(args) => remove(&interaction, &mut library, args).await,
    Commands::Export(args) => export(&interaction, &library, config, args).await,
    Commands::Journal(args) => journal(&interaction, &library, config, args).await,
  }
}

/// Entry point for the scholar CLI application
///
/// Parses arguments, sets up logging and runs the command. Failures are reported on stderr
/// and end the process with a non-zero exit code.
#[tokio::main]
async fn main() {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  if let Err(e) = run(cli).await {
    eprintln!("{} {e}", style(ERROR_PREFIX).red());
    std::process::exit(1);
  }
}
