//! Command line harvester for the legal literature published on juridikbok.se.
//!
//! This crate wraps the `juridik` library in a CLI that:
//! - Crawls the site listing and every detail page
//! - Downloads the PDFs under stable archival filenames
//! - Enriches records with subject terms and classification from LIBRIS
//! - Keeps everything in a single `catalog.json`
//!
//! # Usage
//!
//! ```bash
//! # Write a default configuration
//! juridik init
//!
//! # Crawl, download and enrich in one run
//! juridik harvest
//!
//! # Crawl and enrich the first 20 books without downloading PDFs
//! juridik harvest --crawl-only --max-books 20
//!
//! # Re-run a single stage against an existing catalog
//! juridik download
//! juridik enrich
//!
//! # Print citations and filenames
//! juridik show --limit 5
//!
//! # Remove the catalog
//! juridik clean
//! ```
//!
//! Destructive operations ask for confirmation. Logging detail is raised with `-v`,
//! `-vv` and so on, or set directly through `RUST_LOG`.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::path::PathBuf;

use chrono::Utc;
use clap::{builder::ArgAction, Args, Parser, Subcommand};
use console::style;
use juridik::{
  catalog::Catalog,
  harvester::{EnrichmentSummary, Harvester},
  pdf::DownloadSummary,
  prelude::*,
  record::BibliographicRecord,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod error;
pub mod interaction;

use crate::{commands::*, error::*, interaction::*};

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "Harvest juridikbok.se into a cited and enriched local archive")]
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

  /// Path to the configuration file. If not specified, uses the platform configuration
  /// directory.
  #[arg(long, short, global = true)]
  config: Option<PathBuf>,

  /// Directory for the catalog and the downloaded PDFs, overriding the configuration.
  #[arg(long, short, global = true)]
  output_dir: Option<PathBuf>,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Commands,

  /// Skip all prompts and accept defaults (mostly for testing)
  #[arg(long, hide = true, global = true)]
  accept_defaults: bool,
}

impl Cli {
  /// The configuration file in effect.
  fn config_path(&self) -> PathBuf { self.config.clone().unwrap_or_else(Config::default_path) }

  /// Reads the configuration file, if any, and applies `--output-dir`.
  fn load_config(&self) -> Result<Config> {
    let config = Config::load_or_default(self.config_path())?;
    Ok(match &self.output_dir {
      Some(output_dir) => config.with_output_dir(output_dir.clone()),
      None => config,
    })
  }
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
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .with_target(true)
    .init();
}

/// Entry point for the `juridik` CLI application
///
/// Parses arguments, sets up logging and runs the requested command. A failing command
/// is reported on stderr and ends the process with a non-zero exit code.
#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  let interaction = Terminal::new(cli.accept_defaults);
  let result = match cli.command.clone() {
    Commands::Init => init(&cli, &interaction),
    Commands::Harvest(options) => harvest(&cli, &interaction, options).await,
    Commands::Enrich => enrich(&cli, &interaction).await,
    Commands::Download => download(&cli, &interaction).await,
    Commands::Show(options) => show(&cli, &interaction, options),
    Commands::Clean => clean(&cli, &interaction),
  };

  if let Err(error) = result {
    interaction.reply(ResponseContent::Error(&error))?;
    std::process::exit(1);
  }
  Ok(())
}
