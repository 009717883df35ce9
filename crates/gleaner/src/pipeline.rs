//! The orchestrator composing harvest, table store, and download.
//!
//! A pipeline run has two phases. The harvest phase (optional) walks the
//! configured year range one calendar-year window at a time, writes one
//! table file per window, and logs-and-continues when a window fails. The
//! download phase (always) discovers every table file in the table
//! directory, reads identifiers out of each — skipping files that cannot
//! be parsed without disturbing the rest — and downloads papers strictly
//! sequentially, returning the accumulated [`DownloadReport`].
//!
//! # Examples
//!
//! ```no_run
//! use gleaner::{config::Config, listing::OaiListing, lookup::ArxivLookup, pipeline::Pipeline};
//!
//! # async fn example() -> Result<(), gleaner::error::GleanerError> {
//! let pipeline = Pipeline::new(Config::default(), OaiListing::new(), ArxivLookup::new());
//!
//! // Harvest-then-download over the configured range
//! let report = pipeline.run().await?;
//!
//! // Or only re-run the download pass over existing tables
//! let report = pipeline.run_download_only().await?;
//! # Ok(())
//! # }
//! ```

use super::*;
use crate::{
  config::Config,
  download::{DownloadReport, Downloader},
  harvest::{HarvestMode, Harvester, QueryWindow},
  listing::Listing,
  lookup::Lookup,
  table,
};

/// Composes the harvester, table store, and downloader over one
/// configuration.
pub struct Pipeline<L, K> {
  /// Range, category, and directory configuration for this run.
  config:     Config,
  /// Harvester over the listing collaborator.
  harvester:  Harvester<L>,
  /// Downloader over the lookup collaborator.
  downloader: Downloader<K>,
}

impl<L: Listing, K: Lookup> Pipeline<L, K> {
  /// Builds a pipeline from a configuration and its two collaborators.
  pub fn new(config: Config, listing: L, lookup: K) -> Self {
    Self { config, harvester: Harvester::new(listing), downloader: Downloader::new(lookup) }
  }

  /// Harvests one table per calendar year in the configured range, then
  /// runs the download pass.
  ///
  /// A failed window is logged with its bounds and the remaining windows
  /// continue; the download pass always runs afterwards.
  pub async fn run(&self) -> Result<DownloadReport> {
    std::fs::create_dir_all(&self.config.table_dir)?;

    let mode = HarvestMode::Category(self.config.category.clone());
    for year in self.config.start_year..self.config.end_year {
      let window = QueryWindow::calendar_year(year)?;
      self.harvest_window(&mode, &window).await;
    }

    self.download_pass().await
  }

  /// Harvests a single wide window restricted to abstracts mentioning
  /// `term`, then runs the download pass.
  pub async fn run_keyword(&self, term: &str) -> Result<DownloadReport> {
    std::fs::create_dir_all(&self.config.table_dir)?;

    let window = QueryWindow::spanning_years(self.config.start_year, self.config.end_year)?;
    let mode =
      HarvestMode::Keyword { category: self.config.category.clone(), term: term.to_owned() };
    self.harvest_window(&mode, &window).await;

    self.download_pass().await
  }

  /// Skips harvesting and only runs the download pass over every table
  /// file already present.
  pub async fn run_download_only(&self) -> Result<DownloadReport> { self.download_pass().await }

  /// Harvests one window and writes its table, logging any failure.
  async fn harvest_window(&self, mode: &HarvestMode, window: &QueryWindow) {
    match self.harvester.harvest(mode, window).await {
      Ok(records) => {
        let path = self.table_path(mode, window);
        match table::write_records(&records, &path) {
          Ok(()) => info!("Wrote {} records to {}", records.len(), path.display()),
          Err(e) => error!("Failed to write table {}: {e}", path.display()),
        }
      },
      Err(e) => error!("Harvest failed for {mode} over {window}, continuing: {e}"),
    }
  }

  /// Downloads every identifier readable from every discovered table.
  async fn download_pass(&self) -> Result<DownloadReport> {
    std::fs::create_dir_all(&self.config.table_dir)?;

    let mut report = DownloadReport::default();
    for path in table::discover_tables(&self.config.table_dir)? {
      let identifiers = match table::read_identifiers(&path) {
        Ok(identifiers) => identifiers,
        Err(e) => {
          // One unreadable table must not disturb the others
          error!("Skipping table: {e}");
          continue;
        },
      };

      info!("Downloading {} identifiers from {}", identifiers.len(), path.display());
      for identifier in &identifiers {
        let outcome = self.downloader.download_one(identifier, &self.config.output_dir).await?;
        report.record(identifier, &outcome);
      }
    }

    info!("Download pass finished: {report}");
    Ok(report)
  }

  /// File name for one window's table, encoding the mode and bounds.
  fn table_path(&self, mode: &HarvestMode, window: &QueryWindow) -> PathBuf {
    let label = match mode {
      HarvestMode::Category(category) => file_label(category),
      HarvestMode::Keyword { term, .. } => file_label(term),
    };
    let name = format!(
      "arxiv_{label}_{}-{}.{}",
      window.start.format("%Y"),
      window.end.format("%Y"),
      table::TABLE_EXTENSION
    );
    self.config.table_dir.join(name)
  }
}

/// Reduces free text to a file-name-safe label.
fn file_label(text: &str) -> String {
  text.chars().map(|c| if c.is_ascii_alphanumeric() { c } else { '_' }).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn labels_are_file_name_safe() {
    assert_eq!(file_label("math"), "math");
    assert_eq!(file_label("number theory"), "number_theory");
    assert_eq!(file_label("log-concavity"), "log_concavity");
  }
}
