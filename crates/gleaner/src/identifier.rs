//! Validation of arXiv paper identifiers.
//!
//! Only the legacy numeric-dotted identifier scheme (e.g. `0704.0014`) is
//! accepted: the portion before the first dot must be at least four
//! characters, and the identifier may contain nothing but decimal digits
//! and dots. Identifiers carrying a category prefix — old-style
//! `math.AG/0601001` as well as colon-qualified forms — are rejected. This
//! restriction is deliberate and documented rather than silently widened;
//! callers that need the modern scheme must relax it here.

use lazy_static::lazy_static;
use regex::Regex;

use super::*;

/// Validates the syntactic shape of a paper identifier.
///
/// Surrounding whitespace is stripped before validation. The identifier is
/// valid when the stripped string is non-empty, consists of decimal digits
/// and dots only, and has at least four characters before the first dot.
///
/// # Arguments
///
/// * `raw` - Candidate identifier, possibly padded with whitespace
///
/// # Returns
///
/// Returns the trimmed identifier on success, or
/// [`GleanerError::InvalidIdentifier`] if the shape is not accepted.
///
/// # Examples
///
/// ```
/// use gleaner::identifier;
///
/// assert_eq!(identifier::validate(" 0704.0014 ").unwrap(), "0704.0014");
/// assert!(identifier::validate("abc.123").is_err());
/// assert!(identifier::validate("12.34").is_err());
/// ```
pub fn validate(raw: &str) -> Result<String> {
  lazy_static! {
    // Digits and dots only, with at least four digits before the first dot.
    static ref LEGACY_ID: Regex = Regex::new(r"^\d{4,}(\.\d*)*$").unwrap();
  }

  let identifier = raw.trim();
  if identifier.is_empty() || !LEGACY_ID.is_match(identifier) {
    return Err(GleanerError::InvalidIdentifier);
  }
  Ok(identifier.to_owned())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_legacy_numeric_identifiers() {
    assert_eq!(validate("0704.0014").unwrap(), "0704.0014");
    assert_eq!(validate("9999.99999").unwrap(), "9999.99999");
    // No dot at all is fine as long as there are at least four digits
    assert_eq!(validate("123456").unwrap(), "123456");
  }

  #[test]
  fn trims_surrounding_whitespace() {
    assert_eq!(validate("  0704.0014\n").unwrap(), "0704.0014");
  }

  #[test]
  fn rejects_empty_and_blank_input() {
    assert!(validate("").is_err());
    assert!(validate("   ").is_err());
  }

  #[test]
  fn rejects_non_numeric_identifiers() {
    assert!(validate("abc.123").is_err());
    assert!(validate("math.AG/0601001").is_err());
    assert!(validate("cs:1234.5678").is_err());
    assert!(validate("0704.0014v1").is_err());
  }

  #[test]
  fn rejects_short_prefix_before_first_dot() {
    assert!(validate("12.34").is_err());
    assert!(validate("123.4567").is_err());
    assert!(validate(".1234").is_err());
  }
}
