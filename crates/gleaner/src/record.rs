//! The canonical paper record and the raw-entry normalizer.
//!
//! Listing collaborators hand back loosely structured entries; this module
//! projects them onto the fixed eight-column schema used by the table
//! store. The one invariant that matters is that the `id` field is always
//! carried as text: older identifiers contain dots and leading zeros that a
//! numeric representation would corrupt, so every value is forced through a
//! string conversion before any tabular serialization happens.

use serde_json::Value;

use super::*;

/// Fixed column order for table files.
pub const COLUMNS: [&str; 8] =
  ["id", "title", "categories", "abstract", "doi", "created", "updated", "authors"];

/// A raw metadata entry as produced by a listing collaborator.
///
/// Field names map to JSON values; the fields of interest are `id`,
/// `title`, `categories`, `abstract`, `doi`, `created`, `updated`, and
/// `authors` (the last of which may be an array of name strings). Entries
/// are transient and consumed immediately by [`PaperRecord::from_raw`].
pub type RawEntry = HashMap<String, Value>;

/// The canonical eight-field metadata shape used for persistence.
///
/// Every field is a string; absent fields normalize to the empty string.
/// Instances are immutable once created and live only until they are
/// written to a table file.
///
/// # Examples
///
/// ```
/// use gleaner::record::{PaperRecord, RawEntry};
///
/// let mut raw = RawEntry::new();
/// raw.insert("id".into(), "0704.0014".into());
/// raw.insert("title".into(), "A combinatorial proof".into());
///
/// let record = PaperRecord::from_raw(&raw);
/// assert_eq!(record.id, "0704.0014");
/// assert_eq!(record.doi, "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
  /// Paper identifier, always textual
  pub id:            String,
  /// The paper's full title
  pub title:         String,
  /// Space-separated subject categories
  pub categories:    String,
  /// Full abstract text
  #[serde(rename = "abstract")]
  pub abstract_text: String,
  /// DOI reference, if any
  pub doi:           String,
  /// Date the paper was first submitted
  pub created:       String,
  /// Date of the latest revision, if any
  pub updated:       String,
  /// Comma-separated author names
  pub authors:       String,
}

impl PaperRecord {
  /// Normalizes a raw entry into the canonical record shape.
  ///
  /// Projects the entry onto the fixed column order; any column absent in
  /// the raw entry becomes an empty value. The `id` field — like every
  /// other field — is forced to a string representation here, before any
  /// serialization, so a numeric-looking identifier can never be coerced
  /// downstream.
  pub fn from_raw(raw: &RawEntry) -> Self {
    let field = |name: &str| raw.get(name).map(value_text).unwrap_or_default();
    Self {
      id:            field("id"),
      title:         field("title"),
      categories:    field("categories"),
      abstract_text: field("abstract"),
      doi:           field("doi"),
      created:       field("created"),
      updated:       field("updated"),
      authors:       field("authors"),
    }
  }
}

/// Total conversion of a raw JSON value to field text.
///
/// Strings pass through unquoted, arrays are joined with `", "`, null maps
/// to the empty string, and anything else uses its JSON rendering.
pub(crate) fn value_text(value: &Value) -> String {
  match value {
    Value::Null => String::new(),
    Value::String(text) => text.clone(),
    Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(", "),
    other => other.to_string(),
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn absent_columns_become_empty_values() {
    let mut raw = RawEntry::new();
    raw.insert("id".into(), json!("0704.0014"));

    let record = PaperRecord::from_raw(&raw);
    assert_eq!(record.id, "0704.0014");
    assert_eq!(record.title, "");
    assert_eq!(record.abstract_text, "");
    assert_eq!(record.authors, "");
  }

  #[test]
  fn numeric_identifier_is_forced_to_text() {
    let mut raw = RawEntry::new();
    raw.insert("id".into(), json!(7040014));

    assert_eq!(PaperRecord::from_raw(&raw).id, "7040014");
  }

  #[test]
  fn author_arrays_are_joined() {
    let mut raw = RawEntry::new();
    raw.insert("authors".into(), json!(["David Callan", "Emeric Deutsch"]));

    assert_eq!(PaperRecord::from_raw(&raw).authors, "David Callan, Emeric Deutsch");
  }

  #[test]
  fn column_order_matches_the_record_fields() {
    assert_eq!(COLUMNS[0], "id");
    assert_eq!(COLUMNS.len(), 8);
  }
}
