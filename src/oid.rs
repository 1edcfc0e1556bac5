//! Numeric object identifiers.
//!
//! Devices and the registry both spell OIDs as dotted decimal, with or without
//! a leading dot. [`Oid`] is the parsed form used to build requests and to test
//! subtree membership during walks.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Errors that can occur when parsing a dotted-decimal OID.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OidError {
    #[error("Empty OID")]
    Empty,
    #[error("Invalid sub-identifier '{0}'")]
    InvalidArc(String),
}

/// An SNMP Object Identifier.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Oid(pub Vec<u32>);

impl Oid {
    /// Creates a new OID from a slice of sub-identifiers.
    pub fn from_slice(subs: &[u32]) -> Self {
        Oid(subs.to_vec())
    }

    /// Returns true if this OID starts with `prefix`.
    pub fn starts_with(&self, prefix: &Oid) -> bool {
        self.0.len() >= prefix.0.len() && self.0[..prefix.0.len()] == prefix.0[..]
    }

    /// Returns a new OID with `index` appended, e.g. a column plus a row index.
    pub fn child(&self, index: u32) -> Oid {
        let mut v = self.0.clone();
        v.push(index);
        Oid(v)
    }

    /// Returns the sub-identifiers as `u64`, the width the SNMP client expects.
    pub fn arcs(&self) -> Vec<u64> {
        self.0.iter().map(|&a| a as u64).collect()
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}

impl FromStr for Oid {
    type Err = OidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('.');
        if trimmed.is_empty() {
            return Err(OidError::Empty);
        }

        trimmed
            .split('.')
            .map(|arc| {
                arc.parse::<u32>()
                    .map_err(|_| OidError::InvalidArc(arc.to_string()))
            })
            .collect::<Result<Vec<u32>, _>>()
            .map(Oid)
    }
}

/// Normalizes a dotted OID string: no surrounding whitespace, no leading dot.
pub fn normalize(s: &str) -> &str {
    s.trim().trim_start_matches('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_and_without_leading_dot() {
        let a: Oid = ".1.3.6.1.2.1.1.1.0".parse().unwrap();
        let b: Oid = "1.3.6.1.2.1.1.1.0".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.0, vec![1, 3, 6, 1, 2, 1, 1, 1, 0]);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!("".parse::<Oid>(), Err(OidError::Empty));
        assert_eq!(".".parse::<Oid>(), Err(OidError::Empty));
        assert_eq!(
            "1.3.x.1".parse::<Oid>(),
            Err(OidError::InvalidArc("x".to_string()))
        );
        assert!("1.3..1".parse::<Oid>().is_err());
    }

    #[test]
    fn test_display_has_no_leading_dot() {
        let oid = Oid::from_slice(&[1, 3, 6, 1, 2, 1, 2, 2, 1, 10]);
        assert_eq!(oid.to_string(), "1.3.6.1.2.1.2.2.1.10");
    }

    #[test]
    fn test_starts_with_and_child() {
        let table: Oid = "1.3.6.1.2.1.2.2".parse().unwrap();
        let column: Oid = "1.3.6.1.2.1.2.2.1.10".parse().unwrap();
        let cell = column.child(3);
        assert!(cell.starts_with(&table));
        assert!(cell.starts_with(&column));
        assert!(!table.starts_with(&cell));
        assert_eq!(cell.to_string(), "1.3.6.1.2.1.2.2.1.10.3");
    }

    #[test]
    fn test_ordering_is_numeric() {
        let a: Oid = "1.3.6.1.2.1.2.2.1.2".parse().unwrap();
        let b: Oid = "1.3.6.1.2.1.2.2.1.10".parse().unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(" .1.3.6 "), "1.3.6");
        assert_eq!(normalize("1.3.6"), "1.3.6");
    }
}
