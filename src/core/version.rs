//! Cookbook versions.
//!
//! Cookbook versions are plain dotted tuples of non-negative integers
//! (`1`, `0.0`, `0.10.0`). They are compared numerically, component by
//! component, never lexically.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// A dotted numeric cookbook version.
///
/// Ordering is component-wise numeric; when one version is a prefix of the
/// other, the shorter one sorts first. `0.0` and `0.0.0` are therefore two
/// distinct versions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    parts: Vec<u64>,
}

/// Error returned when a string is not a valid version.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid version `{input}`: expected dot-separated numbers like `1.2.3`")]
pub struct VersionParseError {
    pub input: String,
}

impl Version {
    /// Create a version from its numeric components.
    ///
    /// An empty component list is normalized to `0`.
    pub fn new(parts: impl Into<Vec<u64>>) -> Self {
        let mut parts = parts.into();
        if parts.is_empty() {
            parts.push(0);
        }
        Version { parts }
    }

    /// Parse a version string.
    pub fn parse(s: &str) -> Result<Self, VersionParseError> {
        let trimmed = s.trim();
        let err = || VersionParseError {
            input: s.to_string(),
        };

        if trimmed.is_empty() {
            return Err(err());
        }

        let parts = trimmed
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(err());
                }
                part.parse::<u64>().map_err(|_| err())
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Version { parts })
    }

    /// The default version of a cookbook whose metadata omits one.
    pub fn metadata_default() -> Self {
        Version::new([0, 0, 0])
    }

    /// The version assigned to solo-mode cookbooks without metadata.
    pub fn solo_default() -> Self {
        Version::new([0, 0])
    }

    /// Numeric components.
    pub fn parts(&self) -> &[u64] {
        &self.parts
    }

    /// Compare as numbers, padding the shorter version with zeros.
    ///
    /// Unlike `Ord`, `1.0` and `1.0.0` compare equal here.
    pub fn cmp_padded(&self, other: &Version) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        let component = |parts: &[u64], i: usize| parts.get(i).copied().unwrap_or(0);

        (0..len)
            .map(|i| component(&self.parts, i).cmp(&component(&other.parts, i)))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for part in &self.parts {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{}", part)?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        s.parse().unwrap()
    }

    #[test]
    fn test_numeric_ordering() {
        assert!(v("0.2.1") > v("0.0.1"));
        assert!(v("0.10.0") > v("0.9.0"));
        assert!(v("1.0") > v("0.99.99"));
    }

    #[test]
    fn test_short_and_long_versions_are_distinct() {
        assert_ne!(v("0.0"), v("0.0.0"));
        assert!(v("0.0") < v("0.0.0"));
        assert!(v("0.0.0") < v("0.0.1"));
    }

    #[test]
    fn test_display_normalizes_leading_zeros() {
        assert_eq!(v("01.002.3").to_string(), "1.2.3");
        assert_eq!(v(" 0.10.0 ").to_string(), "0.10.0");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "1..2", "1.2.", "a.b", "1.2-beta", "v1.0", "-1.0"] {
            assert!(Version::parse(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_cmp_padded_ignores_trailing_zeros() {
        assert_eq!(v("1.0").cmp_padded(&v("1.0.0")), Ordering::Equal);
        assert_eq!(v("1").cmp_padded(&v("1.0.1")), Ordering::Less);
        assert_eq!(v("0.10").cmp_padded(&v("0.9.9")), Ordering::Greater);
        // Map ordering still tells them apart
        assert!(v("1.0") < v("1.0.0"));
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Version::metadata_default().to_string(), "0.0.0");
        assert_eq!(Version::solo_default().to_string(), "0.0");
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&v("0.2.1")).unwrap();
        assert_eq!(json, "\"0.2.1\"");
    }
}
