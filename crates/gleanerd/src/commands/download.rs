//! The download-only command.

use super::*;

/// Runs the download pass over every table file already present, without
/// harvesting anything new.
pub async fn download(config: Config) -> Result<()> {
  let pipeline = Pipeline::new(config, OaiListing::new(), ArxivLookup::new());
  let report = pipeline.run_download_only().await?;

  println!("{} Download complete — {report}", style(SUCCESS_PREFIX).green());
  if !report.failures.is_empty() {
    println!(
      "{} Identifiers without a file: {}",
      style(INFO_PREFIX).blue(),
      report.failures.join(", ")
    );
  }
  Ok(())
}
