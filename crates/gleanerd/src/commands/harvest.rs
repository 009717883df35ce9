//! The harvest-then-download command.

use super::*;

/// Runs the full pipeline: harvest tables for the configured range, then
/// download every paper those tables name.
///
/// With a keyword, the harvest collapses to a single wide window filtered
/// on abstract text; when the keyword names a known branch of mathematics,
/// its neighboring branches are suggested as further harvests.
pub async fn harvest(config: Config, keyword: Option<String>) -> Result<()> {
  if let Some(term) = keyword.as_deref() {
    if config.taxonomy.is_branch(term) {
      let related = config.taxonomy.connected(term);
      if !related.is_empty() {
        println!(
          "{} Branch `{}` is connected to: {}",
          style(INFO_PREFIX).blue(),
          term,
          related.join(", ")
        );
      }
    }
  }

  let pipeline = Pipeline::new(config, OaiListing::new(), ArxivLookup::new());
  let report = match keyword {
    Some(term) => pipeline.run_keyword(&term).await?,
    None => pipeline.run().await?,
  };

  println!("{} Harvest complete — {report}", style(SUCCESS_PREFIX).green());
  if !report.failures.is_empty() {
    println!(
      "{} Identifiers without a file: {}",
      style(INFO_PREFIX).blue(),
      report.failures.join(", ")
    );
  }
  Ok(())
}
