//! Query windows and the metadata harvester.
//!
//! A harvest runs over a half-open date interval — the current policy
//! chunks a requested year range into one [`QueryWindow`] per calendar
//! year, but any `[start, end)` interval works. Two modes exist: a broad
//! subject category over a narrow window, or a keyword restricted to
//! abstract text over a typically wide window. Enumeration is delegated to
//! a [`Listing`] collaborator; every raw entry it returns is normalized
//! into a [`PaperRecord`] before the harvester hands the set back.

use super::*;
use crate::{
  listing::{FieldFilters, Listing},
  record::PaperRecord,
};

/// A half-open date interval bounding a single listing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindow {
  /// First day of the window (inclusive)
  pub start: NaiveDate,
  /// First day past the window (exclusive)
  pub end:   NaiveDate,
}

impl QueryWindow {
  /// Creates a window from explicit bounds.
  pub fn new(start: NaiveDate, end: NaiveDate) -> Self { Self { start, end } }

  /// The window covering exactly one calendar year.
  pub fn calendar_year(year: i32) -> Result<Self> { Self::spanning_years(year, year + 1) }

  /// The window covering `[start_year, end_year)` whole calendar years.
  ///
  /// # Errors
  ///
  /// Returns [`GleanerError::Config`] when a year is out of the supported
  /// range or the interval is empty.
  pub fn spanning_years(start_year: i32, end_year: i32) -> Result<Self> {
    let start = NaiveDate::from_ymd_opt(start_year, 1, 1)
      .ok_or_else(|| GleanerError::Config(format!("Year {start_year} is out of range")))?;
    let end = NaiveDate::from_ymd_opt(end_year, 1, 1)
      .ok_or_else(|| GleanerError::Config(format!("Year {end_year} is out of range")))?;
    if start >= end {
      return Err(GleanerError::Config(format!("Window start {start} must precede end {end}")));
    }
    Ok(Self { start, end })
  }
}

impl Display for QueryWindow {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "[{}, {})", self.start, self.end)
  }
}

/// How a harvest query is shaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarvestMode {
  /// Look up a wide range of papers in one subject category within a
  /// narrow window of time.
  Category(String),
  /// Look up a narrow scope of papers — those whose abstract mentions
  /// `term` — in a fixed broad category, within a wide window of time.
  Keyword {
    /// The broad category the keyword search runs against
    category: String,
    /// Term the abstract must contain
    term:     String,
  },
}

impl Display for HarvestMode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      HarvestMode::Category(category) => write!(f, "category `{category}`"),
      HarvestMode::Keyword { category, term } =>
        write!(f, "keyword `{term}` in category `{category}`"),
    }
  }
}

/// Drives a listing collaborator across query windows and normalizes the
/// output into canonical records.
///
/// The result of a harvest is a finite record set, fully materialized
/// before it is handed to the table store; the collaborator's pagination is
/// opaque here. There is no retry logic: a listing failure propagates as a
/// fatal error for that window, and the orchestrator decides whether
/// remaining windows continue.
pub struct Harvester<L> {
  /// The metadata-listing collaborator enumeration is delegated to.
  listing: L,
}

impl<L: Listing> Harvester<L> {
  /// Creates a harvester over the given listing collaborator.
  pub fn new(listing: L) -> Self { Self { listing } }

  /// Harvests every record in `window`, shaped by `mode`.
  pub async fn harvest(&self, mode: &HarvestMode, window: &QueryWindow) -> Result<Vec<PaperRecord>> {
    let raw = match mode {
      HarvestMode::Category(category) => self.listing.scrape(category, window, None).await?,
      HarvestMode::Keyword { category, term } => {
        let filters = FieldFilters::from([("abstract".to_owned(), vec![term.clone()])]);
        self.listing.scrape(category, window, Some(&filters)).await?
      },
    };

    debug!("Harvested {} entries for {mode} over {window}", raw.len());

    Ok(raw.iter().map(PaperRecord::from_raw).collect())
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use serde_json::json;

  use super::*;
  use crate::record::RawEntry;

  /// Listing stub that records every call and replays fixed entries.
  struct FixedListing {
    entries: Vec<RawEntry>,
    calls:   Mutex<Vec<(String, QueryWindow, Option<FieldFilters>)>>,
  }

  impl FixedListing {
    fn with_entries(entries: Vec<RawEntry>) -> Self { Self { entries, calls: Mutex::new(Vec::new()) } }
  }

  #[async_trait]
  impl Listing for FixedListing {
    async fn scrape(
      &self,
      category: &str,
      window: &QueryWindow,
      filters: Option<&FieldFilters>,
    ) -> Result<Vec<RawEntry>> {
      self.calls.lock().unwrap().push((category.to_owned(), *window, filters.cloned()));
      Ok(self.entries.clone())
    }
  }

  fn entry(id: &str) -> RawEntry {
    let mut raw = RawEntry::new();
    raw.insert("id".into(), json!(id));
    raw.insert("title".into(), json!("A title"));
    raw
  }

  #[test]
  fn calendar_year_windows_are_half_open() {
    let window = QueryWindow::calendar_year(2007).unwrap();
    assert_eq!(window.start, NaiveDate::from_ymd_opt(2007, 1, 1).unwrap());
    assert_eq!(window.end, NaiveDate::from_ymd_opt(2008, 1, 1).unwrap());
    assert_eq!(window.to_string(), "[2007-01-01, 2008-01-01)");
  }

  #[test]
  fn empty_or_reversed_year_spans_are_rejected() {
    assert!(QueryWindow::spanning_years(2008, 2008).is_err());
    assert!(QueryWindow::spanning_years(2009, 2007).is_err());
  }

  #[tokio::test]
  async fn category_mode_passes_no_filters() {
    let listing = FixedListing::with_entries(vec![entry("0704.0014")]);
    let window = QueryWindow::calendar_year(2007).unwrap();

    let harvester = Harvester::new(listing);
    let mode = HarvestMode::Category("math".into());
    let records = harvester.harvest(&mode, &window).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "0704.0014");
    assert_eq!(records[0].title, "A title");

    let calls = harvester.listing.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "math");
    assert_eq!(calls[0].1, window);
    assert!(calls[0].2.is_none());
  }

  #[tokio::test]
  async fn keyword_mode_filters_on_abstract_text() {
    let listing = FixedListing::with_entries(Vec::new());
    let window = QueryWindow::spanning_years(2007, 2010).unwrap();

    let harvester = Harvester::new(listing);
    let mode = HarvestMode::Keyword { category: "math".into(), term: "log-concavity".into() };
    let records = harvester.harvest(&mode, &window).await.unwrap();
    assert!(records.is_empty());

    let calls = harvester.listing.calls.lock().unwrap();
    let filters = calls[0].2.as_ref().unwrap();
    assert_eq!(filters["abstract"], vec!["log-concavity".to_owned()]);
  }

  #[tokio::test]
  async fn every_entry_is_normalized() {
    let mut numeric = RawEntry::new();
    numeric.insert("id".into(), json!(7040014));

    let listing = FixedListing::with_entries(vec![numeric]);
    let harvester = Harvester::new(listing);
    let window = QueryWindow::calendar_year(2007).unwrap();

    let records =
      harvester.harvest(&HarvestMode::Category("math".into()), &window).await.unwrap();
    assert_eq!(records[0].id, "7040014");
    assert_eq!(records[0].abstract_text, "");
  }
}
