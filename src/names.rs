//! XML name validation and utilities
//!
//! Element and attribute names written by the document serializer, and the
//! dynamic names built from user input (parameter names, filter agendas),
//! are checked here before they reach the XML writer.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static NCNAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}][A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}\-\.0-9\u{B7}]*$")
        .unwrap()
});

/// Check if a string is a valid NCName (non-colonized name)
pub fn is_valid_ncname(name: &str) -> bool {
    NCNAME.is_match(name)
}

/// Check if a string is a valid QName (qualified name)
pub fn is_valid_qname(name: &str) -> bool {
    match name.split_once(':') {
        Some((prefix, local)) => is_valid_ncname(prefix) && is_valid_ncname(local),
        None => is_valid_ncname(name),
    }
}

/// Validate an NCName and return an error if invalid
pub fn validate_ncname(name: &str) -> Result<()> {
    if is_valid_ncname(name) {
        Ok(())
    } else {
        Err(Error::Name(format!("Invalid NCName: '{}'", name)))
    }
}

/// Validate a QName and return an error if invalid
pub fn validate_qname(name: &str) -> Result<()> {
    if is_valid_qname(name) {
        Ok(())
    } else {
        Err(Error::Name(format!("Invalid QName: '{}'", name)))
    }
}

/// Split a QName into prefix and local name
pub fn split_qname(qname: &str) -> (Option<&str>, &str) {
    if let Some((prefix, local)) = qname.split_once(':') {
        (Some(prefix), local)
    } else {
        (None, qname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_ncname() {
        assert!(is_valid_ncname("stockHeader"));
        assert!(is_valid_ncname("VPrColor"));
        assert!(is_valid_ncname("my-element.2"));
        assert!(is_valid_ncname("_private"));

        assert!(!is_valid_ncname(""));
        assert!(!is_valid_ncname("stk:stock"));
        assert!(!is_valid_ncname("1price"));
        assert!(!is_valid_ncname("has space"));
    }

    #[test]
    fn test_is_valid_qname() {
        assert!(is_valid_qname("stock"));
        assert!(is_valid_qname("stk:stock"));
        assert!(is_valid_qname("typ:ids"));

        assert!(!is_valid_qname(""));
        assert!(!is_valid_qname(":stock"));
        assert!(!is_valid_qname("stk:"));
        assert!(!is_valid_qname("a:b:c"));
    }

    #[test]
    fn test_split_qname() {
        assert_eq!(split_qname("stock"), (None, "stock"));
        assert_eq!(split_qname("stk:stock"), (Some("stk"), "stock"));
    }

    #[test]
    fn test_validate_qname() {
        assert!(validate_qname("dat:dataPack").is_ok());
        assert!(matches!(validate_qname("1:x"), Err(Error::Name(_))));
    }
}
