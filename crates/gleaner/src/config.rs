//! Run configuration and the mathematics subject taxonomy.
//!
//! Everything a pipeline run needs — year range, subject category, where
//! tables and papers land — is carried by an explicit [`Config`] value
//! loaded from a TOML file, with sensible defaults for every field so a
//! partial file (or no file at all) works. The taxonomy of mathematics
//! branches and their connections ships as immutable lookup tables on the
//! configuration rather than process-wide bindings.

use std::collections::BTreeMap;

use super::*;

/// Configuration for a pipeline run.
///
/// # Examples
///
/// A minimal configuration file:
///
/// ```toml
/// start_year = 2007
/// end_year   = 2009
/// category   = "math"
/// table_dir  = "."
/// output_dir = "papers"
/// ```
///
/// Loading it, falling back to defaults when absent:
///
/// ```no_run
/// use gleaner::config::Config;
///
/// # fn example() -> Result<(), gleaner::error::GleanerError> {
/// let path = Config::default_path()?;
/// let config = if path.exists() { Config::from_path(path)? } else { Config::default() };
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// First year of the harvest range (inclusive)
  pub start_year: i32,
  /// Last year of the harvest range (exclusive)
  pub end_year:   i32,
  /// Subject category queried in category mode and anchoring keyword mode
  pub category:   String,
  /// Directory table files are written to and discovered in
  pub table_dir:  PathBuf,
  /// Directory downloaded PDFs are written to
  pub output_dir: PathBuf,
  /// Immutable subject taxonomy tables
  pub taxonomy:   Taxonomy,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      start_year: 2007,
      end_year:   2008,
      category:   "math".to_owned(),
      table_dir:  PathBuf::from("."),
      output_dir: PathBuf::from("papers"),
      taxonomy:   Taxonomy::default(),
    }
  }
}

impl Config {
  /// Loads and validates a configuration from a TOML file.
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
    let content = std::fs::read_to_string(path)?;
    let config: Self = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
  }

  /// The platform-specific default configuration file location.
  pub fn default_path() -> Result<PathBuf> {
    dirs::config_dir()
      .map(|dir| dir.join("gleaner").join("config.toml"))
      .ok_or_else(|| GleanerError::Config("Unable to determine a configuration directory".into()))
  }

  /// Checks the invariants a run depends on.
  ///
  /// # Errors
  ///
  /// Returns [`GleanerError::Config`] when the year range is empty or
  /// reversed, or the category is blank.
  pub fn validate(&self) -> Result<()> {
    if self.start_year >= self.end_year {
      return Err(GleanerError::Config(format!(
        "start_year {} must be less than end_year {}",
        self.start_year, self.end_year
      )));
    }
    if self.category.trim().is_empty() {
      return Err(GleanerError::Config("category must not be empty".into()));
    }
    Ok(())
  }
}

/// Immutable lookup tables describing the mathematics subject landscape.
///
/// Branches name the subfields worth harvesting by keyword; the connection
/// tables relate each branch to neighboring branches and to the sciences
/// it feeds. The tables are plain data — nothing in the pipeline mutates
/// them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Taxonomy {
  /// Subfields of mathematics recognized as keyword-harvest targets
  pub branches:            Vec<String>,
  /// Branch → neighboring branches
  pub connections:         BTreeMap<String, Vec<String>>,
  /// Branch → sciences the branch feeds
  pub science_connections: BTreeMap<String, Vec<String>>,
}

impl Default for Taxonomy {
  fn default() -> Self {
    let branches = [
      "algebra",
      "analysis",
      "combinatorics",
      "geometry",
      "logic",
      "number theory",
      "probability",
      "topology",
    ];
    let connections = [
      ("algebra", vec!["geometry", "number theory"]),
      ("analysis", vec!["geometry", "probability"]),
      ("combinatorics", vec!["number theory", "probability"]),
      ("logic", vec!["combinatorics"]),
      ("topology", vec!["analysis", "geometry"]),
    ];
    let science_connections = [
      ("analysis", vec!["physics"]),
      ("combinatorics", vec!["computer science"]),
      ("logic", vec!["computer science"]),
      ("number theory", vec!["cryptography"]),
      ("probability", vec!["physics", "statistics"]),
    ];

    Self {
      branches:            branches.into_iter().map(str::to_owned).collect(),
      connections:         to_table(connections),
      science_connections: to_table(science_connections),
    }
  }
}

impl Taxonomy {
  /// Whether `name` is a recognized branch (case-insensitive).
  pub fn is_branch(&self, name: &str) -> bool {
    self.branches.iter().any(|branch| branch.eq_ignore_ascii_case(name))
  }

  /// The branches neighboring `branch`, empty when none are recorded.
  pub fn connected(&self, branch: &str) -> &[String] {
    self.connections.get(branch).map(Vec::as_slice).unwrap_or(&[])
  }

  /// The sciences `branch` feeds, empty when none are recorded.
  pub fn sciences(&self, branch: &str) -> &[String] {
    self.science_connections.get(branch).map(Vec::as_slice).unwrap_or(&[])
  }
}

/// Builds an owned lookup table from static entries.
fn to_table<const N: usize>(entries: [(&str, Vec<&str>); N]) -> BTreeMap<String, Vec<String>> {
  entries
    .into_iter()
    .map(|(key, values)| (key.to_owned(), values.into_iter().map(str::to_owned).collect()))
    .collect()
}

#[cfg(test)]
mod tests {
  use tempfile::tempdir;

  use super::*;

  #[test]
  fn a_partial_file_fills_in_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "start_year = 2010\nend_year = 2012\n").unwrap();

    let config = Config::from_path(&path).unwrap();
    assert_eq!(config.start_year, 2010);
    assert_eq!(config.end_year, 2012);
    assert_eq!(config.category, "math");
    assert_eq!(config.output_dir, PathBuf::from("papers"));
  }

  #[test]
  fn an_empty_or_reversed_range_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "start_year = 2012\nend_year = 2010\n").unwrap();

    assert!(matches!(Config::from_path(&path), Err(GleanerError::Config(_))));
  }

  #[test]
  fn a_blank_category_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "category = \" \"\n").unwrap();

    assert!(matches!(Config::from_path(&path), Err(GleanerError::Config(_))));
  }

  #[test]
  fn unparseable_toml_surfaces_as_a_deserialization_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "start_year = \"not a year\"\n").unwrap();

    assert!(matches!(Config::from_path(&path), Err(GleanerError::TomlDe(_))));
  }

  #[test]
  fn taxonomy_lookups_are_case_insensitive_for_branches() {
    let taxonomy = Taxonomy::default();
    assert!(taxonomy.is_branch("Number Theory"));
    assert!(!taxonomy.is_branch("astrology"));
  }

  #[test]
  fn connection_tables_answer_with_empty_slices_when_unrecorded() {
    let taxonomy = Taxonomy::default();
    assert_eq!(taxonomy.connected("logic"), ["combinatorics"]);
    assert_eq!(taxonomy.sciences("number theory"), ["cryptography"]);
    assert!(taxonomy.connected("geometry").is_empty());
  }
}
