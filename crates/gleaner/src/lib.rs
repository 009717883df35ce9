//! Bibliographic harvesting and document retrieval for arXiv mathematics papers.
//!
//! `gleaner` collects paper metadata over configurable date ranges and
//! categories, persists it as CSV tables, and then downloads the PDF for
//! every identifier those tables contain:
//!
//! - Metadata listing via arXiv's OAI-PMH interface, one query window at a
//!   time, with resumption-token pagination handled internally
//! - Normalization of raw entries into a fixed eight-column record shape
//! - A CSV table store whose identifier column always round-trips as text
//! - Per-identifier PDF lookup and retrieval that tolerates bad rows,
//!   missing papers, and failed fetches without aborting the batch
//!
//! # Getting Started
//!
//! ```no_run
//! use gleaner::{config::Config, listing::OaiListing, lookup::ArxivLookup, pipeline::Pipeline};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   // Year range, category, and directories come from configuration
//!   let config = Config::default();
//!
//!   // Harvest one table per calendar year, then download every PDF
//!   let pipeline = Pipeline::new(config, OaiListing::new(), ArxivLookup::new());
//!   let report = pipeline.run().await?;
//!   println!("{report}");
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`identifier`]: validation of legacy numeric arXiv identifiers
//! - [`record`]: the canonical record schema and the raw-entry normalizer
//! - [`listing`]: the paginated metadata-listing seam and its OAI-PMH client
//! - [`lookup`]: the per-identifier lookup seam and its Atom-feed client
//! - [`harvest`]: query windows and the harvester that drives a listing
//! - [`table`]: the CSV table store
//! - [`download`]: per-identifier PDF retrieval and the run report
//! - [`pipeline`]: the orchestrator tying harvest and download together
//! - [`config`]: the configuration value object and subject taxonomy
//!
//! # Design Philosophy
//!
//! The pipeline is strictly sequential and failure-tolerant at the row
//! level: a malformed identifier, a missing paper, or a failed fetch is
//! logged and skipped, never fatal. Collaborators sit behind small async
//! traits so the whole flow is testable without the network.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  collections::HashMap,
  fmt::Display,
  path::{Path, PathBuf},
};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, trace, warn};

pub mod config;
pub mod download;
pub mod error;
pub mod harvest;
pub mod identifier;
pub mod listing;
pub mod lookup;
pub mod pipeline;
pub mod record;
pub mod table;

use crate::error::*;

/// Common traits and types for ergonomic imports.
///
/// # Usage
///
/// ```no_run
/// use gleaner::{lookup::ArxivLookup, prelude::*};
///
/// async fn example() -> Result<(), GleanerError> {
///   let descriptor = ArxivLookup::new().find_by_id("0704.0014").await?;
///   println!("{}", descriptor.pdf_url);
///   Ok(())
/// }
/// ```
pub mod prelude {
  pub use crate::{error::GleanerError, listing::Listing, lookup::Lookup};
}
