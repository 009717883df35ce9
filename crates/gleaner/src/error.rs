//! Error types for the gleaner library.
//!
//! This module provides a single error type covering every failure mode in
//! the pipeline: network and API errors, table-file parsing, identifier
//! validation, and configuration loading.
//!
//! # Examples
//!
//! ```
//! use gleaner::{error::GleanerError, identifier};
//!
//! match identifier::validate("abc.123") {
//!   Err(GleanerError::InvalidIdentifier) => println!("Invalid identifier format"),
//!   Err(e) => println!("Other error: {}", e),
//!   Ok(id) => println!("Valid: {id}"),
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Error type alias used for the [`gleaner`](crate) crate.
pub type Result<T> = core::result::Result<T, GleanerError>;

/// Errors that can occur while harvesting metadata or downloading papers.
///
/// Most variants wrap an underlying error transparently; the remainder carry
/// enough context (the offending path or message) to allow a manual rerun.
#[derive(Error, Debug)]
pub enum GleanerError {
  /// The provided paper identifier doesn't match the expected format.
  ///
  /// Only legacy numeric identifiers (e.g. `0704.0014`) are accepted:
  /// digits and dots, with at least four characters before the first dot.
  #[error("Invalid identifier format")]
  InvalidIdentifier,

  /// The requested paper couldn't be found.
  ///
  /// The identifier was syntactically valid but the lookup service returned
  /// zero matches for it.
  #[error("Paper not found")]
  NotFound,

  /// A network request failed.
  ///
  /// This can occur when the network is unavailable, the server is
  /// unreachable, or TLS errors occur.
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// An API returned an error response.
  ///
  /// This occurs when a listing or lookup request returns a non-success
  /// status, a protocol-level error, or a response that cannot be parsed.
  /// The string parameter contains the detail for debugging.
  #[error("API error: {0}")]
  ApiError(String),

  /// A table file could not be parsed into identifiers.
  ///
  /// Raised when a discovered table file has no header row, no identifier
  /// column, or rows the CSV parser rejects. Processing of other table
  /// files continues.
  #[error("Malformed table file `{}`: {reason}", .path.display())]
  MalformedTable {
    /// Path of the table file that failed to parse.
    path:   PathBuf,
    /// Human-readable description of what was wrong with it.
    reason: String,
  },

  /// A CSV serialization or deserialization operation failed.
  #[error(transparent)]
  Csv(#[from] csv::Error),

  /// A file system operation failed.
  #[error(transparent)]
  Path(#[from] std::io::Error),

  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  #[error("{0}")]
  Config(String),
}
