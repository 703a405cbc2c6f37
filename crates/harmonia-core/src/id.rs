//! Identifier normalization.
//!
//! Path-driven transports capture identifiers as raw strings and use the
//! literal token `"null"` to mean "no identifier". Before a service sees the
//! identifier, that token and true absence must collapse to the same
//! canonical no-identifier value.

/// A resource identifier in raw string form.
///
/// The service is responsible for its own parsing (e.g. to an integer key);
/// the binding layer never coerces identifier types.
pub type Id = String;

/// The path token clients send to mean "no identifier".
const NULL_PLACEHOLDER: &str = "null";

/// Normalizes a raw path-captured identifier.
///
/// The placeholder token and absence both become `None`; any other value
/// passes through unchanged.
///
/// # Example
///
/// ```
/// use harmonia_core::normalize_id;
///
/// assert_eq!(normalize_id(Some("null")), None);
/// assert_eq!(normalize_id(None), None);
/// assert_eq!(normalize_id(Some("42")), Some("42".to_owned()));
/// ```
#[must_use]
pub fn normalize_id(raw: Option<&str>) -> Option<Id> {
    match raw {
        None | Some(NULL_PLACEHOLDER) => None,
        Some(other) => Some(other.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_collapses_to_none() {
        assert_eq!(normalize_id(Some("null")), None);
    }

    #[test]
    fn test_absent_is_none() {
        assert_eq!(normalize_id(None), None);
    }

    #[test]
    fn test_values_pass_through_uncoerced() {
        assert_eq!(normalize_id(Some("42")), Some("42".to_owned()));
        assert_eq!(normalize_id(Some("0")), Some("0".to_owned()));
        assert_eq!(normalize_id(Some("a1b2-c3")), Some("a1b2-c3".to_owned()));
    }

    #[test]
    fn test_near_misses_are_not_placeholders() {
        assert_eq!(normalize_id(Some("NULL")), Some("NULL".to_owned()));
        assert_eq!(normalize_id(Some("nulled")), Some("nulled".to_owned()));
        assert_eq!(normalize_id(Some("")), Some(String::new()));
    }
}
