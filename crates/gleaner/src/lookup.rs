//! The per-identifier lookup seam and its arXiv Atom-feed client.
//!
//! The downloader resolves each identifier to a fetchable document through
//! a [`Lookup`] collaborator. The shipped implementation, [`ArxivLookup`],
//! queries arXiv's Atom API with a single-element `id_list` and derives the
//! PDF URL from the entry's abstract-page URL.
//!
//! # Examples
//!
//! ```no_run
//! use gleaner::{lookup::ArxivLookup, prelude::*};
//!
//! # async fn example() -> Result<(), GleanerError> {
//! let lookup = ArxivLookup::new();
//! let descriptor = lookup.find_by_id("0704.0014").await?;
//! println!("PDF at: {}", descriptor.pdf_url);
//! # Ok(())
//! # }
//! ```

use quick_xml::de::from_str;

use super::*;

/// A resolved paper, ready to fetch.
#[derive(Debug, Clone)]
pub struct PaperDescriptor {
  /// The identifier the descriptor was resolved from
  pub id:      String,
  /// The paper's title
  pub title:   String,
  /// URL of the PDF document
  pub pdf_url: String,
}

/// A single-identifier lookup collaborator.
///
/// Zero matches are signalled with [`GleanerError::NotFound`]; any other
/// failure (transport, non-success status, unparseable response) surfaces
/// as the corresponding error variant. Callers treat all of these as
/// per-identifier conditions, never batch-fatal.
#[async_trait]
pub trait Lookup: Send + Sync {
  /// Resolves `id` to a [`PaperDescriptor`] carrying a PDF URL.
  async fn find_by_id(&self, id: &str) -> Result<PaperDescriptor>;
}

/// Internal representation of the arXiv API's Atom feed response.
#[derive(Debug, Deserialize)]
struct Feed {
  /// A feed may contain zero entries when nothing matched the id list
  #[serde(rename = "entry", default)]
  entries: Vec<Entry>,
}

/// Internal representation of a paper entry from arXiv's API response.
#[derive(Debug, Deserialize)]
struct Entry {
  /// Paper title (may contain LaTeX markup)
  title:     String,
  /// arXiv URL (e.g., "http://arxiv.org/abs/0704.0014v1")
  #[serde(rename = "id")]
  arxiv_url: String,
}

/// Lookup client for arXiv's Atom query API.
pub struct ArxivLookup {
  /// Base URL of the query endpoint.
  base_url: String,
  /// Internal web client used to connect to the API.
  client:   reqwest::Client,
}

impl ArxivLookup {
  /// The production query endpoint.
  pub const DEFAULT_BASE_URL: &'static str = "https://export.arxiv.org/api/query";

  /// Creates a client against the production endpoint.
  pub fn new() -> Self { Self::with_base_url(Self::DEFAULT_BASE_URL) }

  /// Creates a client against an alternate endpoint, primarily for tests.
  pub fn with_base_url(base_url: impl Into<String>) -> Self {
    Self { base_url: base_url.into(), client: reqwest::Client::new() }
  }
}

impl Default for ArxivLookup {
  fn default() -> Self { Self::new() }
}

#[async_trait]
impl Lookup for ArxivLookup {
  async fn find_by_id(&self, id: &str) -> Result<PaperDescriptor> {
    let url = format!("{}?id_list={}&max_results=1", self.base_url, id);

    debug!("Looking up paper via: {url}");

    let response = self.client.get(&url).send().await?;
    if !response.status().is_success() {
      return Err(GleanerError::ApiError(format!(
        "Lookup request returned status {}",
        response.status()
      )));
    }

    let body = response.text().await?;
    trace!("Lookup response: {body}");

    let feed: Feed = from_str(&body)
      .map_err(|e| GleanerError::ApiError(format!("Failed to parse lookup response: {e}")))?;

    let entry = feed.entries.into_iter().next().ok_or(GleanerError::NotFound)?;

    // The PDF URL just swaps /abs/ for /pdf/ and appends the extension
    let pdf_url = entry.arxiv_url.replace("/abs/", "/pdf/") + ".pdf";

    Ok(PaperDescriptor { id: id.to_owned(), title: entry.title, pdf_url })
  }
}

#[cfg(test)]
mod tests {
  use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
  };

  use super::*;

  const FOUND: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>ArXiv Query: id_list=0704.0014</title>
  <entry>
    <id>http://arxiv.org/abs/0704.0014v1</id>
    <title>A determinant of Stirling cycle numbers</title>
    <summary>We show that a determinant of Stirling cycle numbers counts automata.</summary>
    <published>2007-03-31T19:29:13Z</published>
  </entry>
</feed>"#;

  const EMPTY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>ArXiv Query: id_list=9999.9999</title>
</feed>"#;

  #[tokio::test]
  async fn resolves_a_descriptor_with_a_pdf_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/api/query"))
      .and(query_param("id_list", "0704.0014"))
      .respond_with(ResponseTemplate::new(200).set_body_string(FOUND))
      .mount(&server)
      .await;

    let lookup = ArxivLookup::with_base_url(format!("{}/api/query", server.uri()));
    let descriptor = lookup.find_by_id("0704.0014").await.unwrap();

    assert_eq!(descriptor.id, "0704.0014");
    assert_eq!(descriptor.title, "A determinant of Stirling cycle numbers");
    assert_eq!(descriptor.pdf_url, "http://arxiv.org/pdf/0704.0014v1.pdf");
  }

  #[tokio::test]
  async fn empty_feed_means_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/api/query"))
      .respond_with(ResponseTemplate::new(200).set_body_string(EMPTY))
      .mount(&server)
      .await;

    let lookup = ArxivLookup::with_base_url(format!("{}/api/query", server.uri()));
    let result = lookup.find_by_id("9999.9999").await;

    assert!(matches!(result, Err(GleanerError::NotFound)));
  }

  #[tokio::test]
  async fn non_success_status_is_an_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/api/query"))
      .respond_with(ResponseTemplate::new(500))
      .mount(&server)
      .await;

    let lookup = ArxivLookup::with_base_url(format!("{}/api/query", server.uri()));
    let result = lookup.find_by_id("0704.0014").await;

    assert!(matches!(result, Err(GleanerError::ApiError(_))));
  }
}
