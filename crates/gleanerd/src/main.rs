//! Command line interface for the gleaner paper harvesting pipeline.
//!
//! This crate provides the `gleaner` binary on top of the `gleaner`
//! library. It supports two modes, both of which end in a download pass
//! over every table file present:
//!
//! ```bash
//! # Harvest metadata tables for the configured range, then download PDFs
//! gleaner harvest
//!
//! # Restrict the harvest to abstracts mentioning a term
//! gleaner harvest --keyword "log-concavity"
//!
//! # Skip harvesting and only run the download pass
//! gleaner download
//! ```
//!
//! Configuration (year range, category, directories) comes from a TOML
//! file in the platform configuration directory, overridable with
//! `--config`. Verbosity is raised with repeated `-v` flags.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::path::PathBuf;

use clap::{builder::ArgAction, Parser, Subcommand};
use console::style;
use gleaner::{config::Config, listing::OaiListing, lookup::ArxivLookup, pipeline::Pipeline};
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod error;

use crate::{commands::*, error::*};

/// Prefix for information messages
static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for error messages
static ERROR_PREFIX: &str = "✗ ";

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "Harvest arXiv metadata tables and download the papers")]
pub struct Cli {
  /// Verbose mode (-v, -vv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Path to the configuration file. If not specified, uses the default
  /// platform-specific configuration directory, falling back to built-in
  /// defaults when no file exists there.
  #[arg(long, short, global = true)]
  config: Option<PathBuf>,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Commands,
}

/// Configures the logging system based on the verbosity level
///
/// The verbosity levels are:
/// - 0: info (default)
/// - 1: debug
/// - 2+: trace
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "info",
    1 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

/// Resolves the run configuration from the CLI arguments.
///
/// An explicit `--config` path must parse; the default location is used
/// only when a file actually exists there, and built-in defaults cover the
/// rest.
fn load_config(cli: &Cli) -> Result<Config> {
  match &cli.config {
    Some(path) => Ok(Config::from_path(path)?),
    None => {
      let path = Config::default_path()?;
      if path.exists() {
        Ok(Config::from_path(path)?)
      } else {
        Ok(Config::default())
      }
    },
  }
}

/// Entry point for the gleaner CLI application
///
/// Parses arguments, sets up logging, loads configuration, and executes
/// the requested command. Both commands finish by printing the download
/// report for the run.
#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  let config = match load_config(&cli) {
    Ok(config) => config,
    Err(error) => {
      eprintln!("{} Failed to load configuration: {error}", style(ERROR_PREFIX).red());
      return Err(error);
    },
  };

  match cli.command {
    Commands::Harvest { keyword } => harvest(config, keyword).await,
    Commands::Download => download(config).await,
  }
}
