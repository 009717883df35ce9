//! The paginated metadata-listing seam and its OAI-PMH client.
//!
//! Harvesting delegates enumeration to a [`Listing`] collaborator: given a
//! subject category, a query window, and optional field filters, it returns
//! every raw metadata entry the window contains. The shipped implementation,
//! [`OaiListing`], speaks arXiv's OAI-PMH interface (`verb=ListRecords`,
//! `metadataPrefix=arXiv`), following resumption tokens until the listing
//! is exhausted. Pagination is entirely opaque to callers: the result is a
//! fully materialized entry set.
//!
//! # Examples
//!
//! ```no_run
//! use gleaner::{harvest::QueryWindow, listing::OaiListing, prelude::*};
//!
//! # async fn example() -> Result<(), GleanerError> {
//! let listing = OaiListing::new();
//! let window = QueryWindow::calendar_year(2007)?;
//! let entries = listing.scrape("math", &window, None).await?;
//! println!("{} entries", entries.len());
//! # Ok(())
//! # }
//! ```

use quick_xml::de::from_str;
use serde_json::Value;

use super::*;
use crate::{
  harvest::QueryWindow,
  record::{value_text, RawEntry},
};

/// Optional restrictions applied to listed entries.
///
/// Maps a field name (e.g. `"abstract"`) to keywords; an entry passes a
/// field's filter when that field contains any of its keywords
/// (case-insensitive), and must pass every filtered field.
pub type FieldFilters = HashMap<String, Vec<String>>;

/// A metadata-listing collaborator.
///
/// Implementations enumerate every paper in a category within a query
/// window and return the raw entries; how the underlying service paginates
/// is an implementation detail. A failure is fatal for that window only —
/// the orchestrator decides whether remaining windows proceed.
#[async_trait]
pub trait Listing: Send + Sync {
  /// Lists every raw metadata entry for `category` within `window`,
  /// restricted by `filters` when given.
  async fn scrape(
    &self,
    category: &str,
    window: &QueryWindow,
    filters: Option<&FieldFilters>,
  ) -> Result<Vec<RawEntry>>;
}

/// Listing client for arXiv's OAI-PMH interface.
///
/// Issues `ListRecords` requests with the `arXiv` metadata format over the
/// window's date bounds, follows resumption tokens, skips deleted records,
/// and treats the `noRecordsMatch` protocol error as an empty result set
/// rather than a failure.
pub struct OaiListing {
  /// Base URL of the OAI-PMH endpoint.
  base_url: String,
  /// Internal web client reused across page requests.
  client:   reqwest::Client,
}

impl OaiListing {
  /// The production OAI-PMH endpoint.
  pub const DEFAULT_BASE_URL: &'static str = "https://export.arxiv.org/oai2";

  /// Creates a client against the production endpoint.
  pub fn new() -> Self { Self::with_base_url(Self::DEFAULT_BASE_URL) }

  /// Creates a client against an alternate endpoint, primarily for tests.
  pub fn with_base_url(base_url: impl Into<String>) -> Self {
    Self { base_url: base_url.into(), client: reqwest::Client::new() }
  }
}

impl Default for OaiListing {
  fn default() -> Self { Self::new() }
}

#[async_trait]
impl Listing for OaiListing {
  async fn scrape(
    &self,
    category: &str,
    window: &QueryWindow,
    filters: Option<&FieldFilters>,
  ) -> Result<Vec<RawEntry>> {
    let mut entries = Vec::new();
    let mut token: Option<String> = None;

    loop {
      let url = match &token {
        None => format!(
          "{}?verb=ListRecords&metadataPrefix=arXiv&set={}&from={}&until={}",
          self.base_url, category, window.start, window.end
        ),
        Some(token) => format!("{}?verb=ListRecords&resumptionToken={}", self.base_url, token),
      };

      debug!("Listing from {url}");

      let response = self.client.get(&url).send().await?;
      if !response.status().is_success() {
        return Err(GleanerError::ApiError(format!(
          "Listing request returned status {}",
          response.status()
        )));
      }

      let body = response.text().await?;
      trace!("Listing response: {body}");

      let (page, next) = parse_page(&body)?;
      entries.extend(page);

      token = next;
      if token.is_none() {
        break;
      }
    }

    debug!("Listed {} entries for {window}", entries.len());

    match filters {
      Some(filters) =>
        Ok(entries.into_iter().filter(|entry| matches_filters(entry, filters)).collect()),
      None => Ok(entries),
    }
  }
}

/// Internal representation of one OAI-PMH response page.
#[derive(Debug, Deserialize)]
struct OaiResponse {
  /// Protocol-level error, mutually exclusive with `ListRecords`
  error:        Option<OaiError>,
  /// Record list and pagination state
  #[serde(rename = "ListRecords")]
  list_records: Option<ListRecordsBlock>,
}

/// Protocol error element (`<error code="..">`).
#[derive(Debug, Deserialize)]
struct OaiError {
  /// Machine-readable error code, e.g. `noRecordsMatch`
  #[serde(rename = "@code")]
  code:    String,
  /// Free-form detail text
  #[serde(rename = "$text")]
  message: Option<String>,
}

/// The `<ListRecords>` payload of a response page.
#[derive(Debug, Deserialize)]
struct ListRecordsBlock {
  /// Records on this page
  #[serde(rename = "record", default)]
  records:          Vec<OaiRecord>,
  /// Token for the next page; absent or empty on the final page
  #[serde(rename = "resumptionToken")]
  resumption_token: Option<ResumptionToken>,
}

/// Pagination token element; carries attributes we ignore.
#[derive(Debug, Deserialize)]
struct ResumptionToken {
  /// The token text itself
  #[serde(rename = "$text")]
  token: Option<String>,
}

/// One `<record>` element. Deleted records carry no metadata.
#[derive(Debug, Deserialize)]
struct OaiRecord {
  /// Metadata payload, absent for deleted records
  metadata: Option<OaiMetadata>,
}

/// The `<metadata>` wrapper around the arXiv format block.
#[derive(Debug, Deserialize)]
struct OaiMetadata {
  /// arXiv-format metadata fields
  #[serde(rename = "arXiv")]
  arxiv: ArxivMetadata,
}

/// Fields of the arXiv OAI metadata format we project into raw entries.
#[derive(Debug, Deserialize)]
struct ArxivMetadata {
  /// Paper identifier
  id:            Option<String>,
  /// Submission date
  created:       Option<String>,
  /// Latest revision date
  updated:       Option<String>,
  /// Paper title
  title:         Option<String>,
  /// Space-separated category list
  categories:    Option<String>,
  /// DOI reference
  doi:           Option<String>,
  /// Abstract text
  #[serde(rename = "abstract")]
  abstract_text: Option<String>,
  /// Author list
  authors:       Option<AuthorList>,
}

/// The `<authors>` wrapper element.
#[derive(Debug, Deserialize)]
struct AuthorList {
  /// Individual author entries
  #[serde(rename = "author", default)]
  authors: Vec<OaiAuthor>,
}

/// One `<author>` element.
#[derive(Debug, Deserialize)]
struct OaiAuthor {
  /// Family name
  keyname:   Option<String>,
  /// Given names
  forenames: Option<String>,
}

impl OaiAuthor {
  /// Joins forenames and keyname into a display name.
  fn full_name(self) -> String {
    match (self.forenames, self.keyname) {
      (Some(forenames), Some(keyname)) => format!("{forenames} {keyname}"),
      (Some(forenames), None) => forenames,
      (None, Some(keyname)) => keyname,
      (None, None) => String::new(),
    }
  }
}

impl ArxivMetadata {
  /// Flattens the parsed metadata block into a raw entry.
  fn into_raw(self) -> RawEntry {
    let mut entry = RawEntry::new();
    let fields = [
      ("id", self.id),
      ("created", self.created),
      ("updated", self.updated),
      ("title", self.title),
      ("categories", self.categories),
      ("doi", self.doi),
      ("abstract", self.abstract_text),
    ];
    for (name, value) in fields {
      if let Some(value) = value {
        entry.insert(name.to_owned(), Value::String(value));
      }
    }
    if let Some(authors) = self.authors {
      let names =
        authors.authors.into_iter().map(|author| Value::String(author.full_name())).collect();
      entry.insert("authors".to_owned(), Value::Array(names));
    }
    entry
  }
}

/// Parses one response page into its entries and the next resumption token.
///
/// The `noRecordsMatch` protocol error maps to an empty page; any other
/// protocol error is an API failure.
fn parse_page(body: &str) -> Result<(Vec<RawEntry>, Option<String>)> {
  let page: OaiResponse = from_str(body)
    .map_err(|e| GleanerError::ApiError(format!("Failed to parse listing response: {e}")))?;

  if let Some(error) = page.error {
    if error.code == "noRecordsMatch" {
      return Ok((Vec::new(), None));
    }
    return Err(GleanerError::ApiError(format!(
      "Listing service error {}: {}",
      error.code,
      error.message.unwrap_or_default()
    )));
  }

  let Some(list) = page.list_records else {
    return Ok((Vec::new(), None));
  };

  let entries = list
    .records
    .into_iter()
    .filter_map(|record| record.metadata)
    .map(|metadata| metadata.arxiv.into_raw())
    .collect();

  let token = list.resumption_token.and_then(|t| t.token).filter(|t| !t.is_empty());
  Ok((entries, token))
}

/// Tests an entry against every field filter.
fn matches_filters(entry: &RawEntry, filters: &FieldFilters) -> bool {
  filters.iter().all(|(field, keywords)| {
    let Some(value) = entry.get(field) else {
      return false;
    };
    let text = value_text(value).to_lowercase();
    keywords.iter().any(|keyword| text.contains(&keyword.to_lowercase()))
  })
}
