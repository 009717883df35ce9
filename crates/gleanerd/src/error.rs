//! Error types for the gleaner CLI.

use thiserror::Error;

/// Error type alias used for the CLI crate.
pub type Result<T> = core::result::Result<T, GleanerdError>;

/// Errors that can occur while running CLI commands.
#[derive(Error, Debug)]
pub enum GleanerdError {
  /// An error bubbled up from the gleaner library.
  #[error(transparent)]
  Gleaner(#[from] gleaner::error::GleanerError),

  /// A file system operation failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),
}
