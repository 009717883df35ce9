//! Per-identifier PDF retrieval.
//!
//! The downloader takes identifiers exactly as they came out of a table
//! file — including garbage — and turns each into one observable
//! [`DownloadOutcome`]: validated, resolved through the lookup
//! collaborator, fetched with a single GET, and written to the output
//! directory. Nothing here is batch-fatal: a bad identifier, a missing
//! paper, or a failed fetch is logged and reported, and the caller moves on
//! to the next row. Re-downloading an identifier overwrites the existing
//! file unconditionally, so reruns are idempotent in content without being
//! a no-op.
//!
//! There are no retries, no backoff, and no partial-file cleanup on a short
//! write; the platform file API is treated as atomic-enough for batch,
//! human-supervised runs.

use super::*;
use crate::{identifier, lookup::Lookup};

/// What became of a single identifier during the download pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
  /// The identifier failed validation; no network call was made.
  SkippedInvalid,
  /// The lookup collaborator found zero matches.
  NotFound,
  /// The lookup or the fetch itself failed; carries the reason.
  FetchFailed(String),
  /// The PDF was written to the contained path.
  Saved(PathBuf),
}

/// In-memory tally of a download pass.
///
/// Counts one outcome per identifier attempted and keeps the identifiers
/// that produced no file, so a failed batch can be rerun by hand.
#[derive(Debug, Default)]
pub struct DownloadReport {
  /// Files written
  pub saved:           usize,
  /// Identifiers rejected by validation
  pub skipped_invalid: usize,
  /// Identifiers the lookup service had no match for
  pub not_found:       usize,
  /// Identifiers whose lookup or fetch failed
  pub fetch_failed:    usize,
  /// Every identifier that did not produce a file
  pub failures:        Vec<String>,
}

impl DownloadReport {
  /// Tallies one identifier's outcome.
  pub fn record(&mut self, identifier: &str, outcome: &DownloadOutcome) {
    match outcome {
      DownloadOutcome::Saved(_) => self.saved += 1,
      DownloadOutcome::SkippedInvalid => {
        self.skipped_invalid += 1;
        self.failures.push(identifier.to_owned());
      },
      DownloadOutcome::NotFound => {
        self.not_found += 1;
        self.failures.push(identifier.to_owned());
      },
      DownloadOutcome::FetchFailed(_) => {
        self.fetch_failed += 1;
        self.failures.push(identifier.to_owned());
      },
    }
  }

  /// Total number of identifiers attempted.
  pub fn attempted(&self) -> usize {
    self.saved + self.skipped_invalid + self.not_found + self.fetch_failed
  }
}

impl Display for DownloadReport {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{} attempted: {} saved, {} invalid, {} not found, {} failed",
      self.attempted(),
      self.saved,
      self.skipped_invalid,
      self.not_found,
      self.fetch_failed
    )
  }
}

/// Generates the file name a paper is stored under.
///
/// Colons are replaced with underscores to keep the name filesystem-safe.
pub fn target_filename(identifier: &str) -> String {
  format!("{}.pdf", identifier.replace(':', "_"))
}

/// Retrieves papers one identifier at a time.
///
/// Holds the lookup collaborator and a reused HTTP client; the output
/// directory is created on every call, which is idempotent and cheap.
pub struct Downloader<K> {
  /// Resolves identifiers to PDF URLs.
  lookup: K,
  /// Internal web client used for the PDF fetch itself.
  client: reqwest::Client,
}

impl<K: Lookup> Downloader<K> {
  /// Creates a downloader over the given lookup collaborator.
  pub fn new(lookup: K) -> Self { Self { lookup, client: reqwest::Client::new() } }

  /// Downloads one paper into `output_dir`, reporting the outcome.
  ///
  /// Only file system failures are returned as errors; every
  /// network-related condition is folded into the outcome so the batch
  /// can continue.
  pub async fn download_one(
    &self,
    raw_identifier: &str,
    output_dir: &Path,
  ) -> Result<DownloadOutcome> {
    std::fs::create_dir_all(output_dir)?;

    let identifier = match identifier::validate(raw_identifier) {
      Ok(identifier) => identifier,
      Err(_) => {
        warn!("Invalid identifier format: {raw_identifier:?}");
        return Ok(DownloadOutcome::SkippedInvalid);
      },
    };

    let descriptor = match self.lookup.find_by_id(&identifier).await {
      Ok(descriptor) => descriptor,
      Err(GleanerError::NotFound) => {
        warn!("No results found for identifier: {identifier}");
        return Ok(DownloadOutcome::NotFound);
      },
      Err(error) => {
        warn!("Lookup failed for {identifier}: {error}");
        return Ok(DownloadOutcome::FetchFailed(error.to_string()));
      },
    };

    debug!("Resolved {identifier} to {} ({})", descriptor.pdf_url, descriptor.title);

    let response = match self.client.get(&descriptor.pdf_url).send().await {
      Ok(response) => response,
      Err(error) => {
        warn!("Fetch failed for {identifier}: {error}");
        return Ok(DownloadOutcome::FetchFailed(error.to_string()));
      },
    };

    // Anything but a plain 200 counts as a failed fetch
    if response.status() != reqwest::StatusCode::OK {
      warn!("Failed to download {identifier}: status {}", response.status());
      return Ok(DownloadOutcome::FetchFailed(format!("status {}", response.status())));
    }

    let bytes = match response.bytes().await {
      Ok(bytes) => bytes,
      Err(error) => {
        warn!("Failed to read body for {identifier}: {error}");
        return Ok(DownloadOutcome::FetchFailed(error.to_string()));
      },
    };

    let path = output_dir.join(target_filename(&identifier));
    debug!("Writing PDF to path: {path:?}");
    std::fs::write(&path, &bytes)?;
    info!("Downloaded: {}", path.display());
    Ok(DownloadOutcome::Saved(path))
  }
}
