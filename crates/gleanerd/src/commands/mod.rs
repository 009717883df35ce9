//! The CLI commands, one module per subcommand.

use super::*;

pub mod download;
pub mod harvest;

pub use download::download;
pub use harvest::harvest;

/// Available commands for the CLI
#[derive(Subcommand, Clone)]
pub enum Commands {
  /// Harvest metadata tables for the configured date range and category,
  /// then download the PDF for every identifier collected
  Harvest {
    /// Restrict the harvest to papers whose abstract mentions this term,
    /// searched over one wide window spanning the configured range
    #[arg(long)]
    keyword: Option<String>,
  },

  /// Skip harvesting and download PDFs for every table file already
  /// present in the table directory
  Download,
}
