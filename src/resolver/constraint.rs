//! Version constraints (`>= 0.2.0`, `<< 1.0`, `0.1.0`).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::errors::CookbookError;
use crate::core::version::Version;

static CONSTRAINT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A\s*(<<|<=|=|>=|>>)?\s*(\d+(?:\.\d+)*)\s*\z").expect("constraint pattern")
});

/// Comparison operator of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Comparator {
    /// `<<`
    Less,
    /// `<=`
    LessEq,
    /// `=`
    #[default]
    Exact,
    /// `>=`
    GreaterEq,
    /// `>>`
    Greater,
}

impl Comparator {
    /// Operator token as written in constraints.
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparator::Less => "<<",
            Comparator::LessEq => "<=",
            Comparator::Exact => "=",
            Comparator::GreaterEq => ">=",
            Comparator::Greater => ">>",
        }
    }

    /// Does `candidate` stand in this relation to `bound`?
    ///
    /// Missing trailing components count as zero, so `= 1.0` accepts `1.0.0`.
    pub fn matches(&self, candidate: &Version, bound: &Version) -> bool {
        let ord = candidate.cmp_padded(bound);
        match self {
            Comparator::Less => ord == Ordering::Less,
            Comparator::LessEq => ord != Ordering::Greater,
            Comparator::Exact => ord == Ordering::Equal,
            Comparator::GreaterEq => ord != Ordering::Less,
            Comparator::Greater => ord == Ordering::Greater,
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "<<" => Some(Comparator::Less),
            "<=" => Some(Comparator::LessEq),
            "=" => Some(Comparator::Exact),
            ">=" => Some(Comparator::GreaterEq),
            ">>" => Some(Comparator::Greater),
            _ => None,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A comparator applied to a version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionConstraint {
    pub comparator: Comparator,
    pub version: Version,
}

impl VersionConstraint {
    /// Create a constraint.
    pub fn new(comparator: Comparator, version: Version) -> Self {
        VersionConstraint {
            comparator,
            version,
        }
    }

    /// Parse a constraint; a missing operator means `=`.
    pub fn parse(s: &str) -> Result<Self, CookbookError> {
        let invalid = || CookbookError::InvalidConstraintSyntax {
            constraint: s.to_string(),
        };

        let caps = CONSTRAINT_PATTERN.captures(s).ok_or_else(invalid)?;

        let comparator = match caps.get(1) {
            Some(op) => Comparator::from_token(op.as_str()).ok_or_else(invalid)?,
            None => Comparator::Exact,
        };
        let version = Version::parse(&caps[2]).map_err(|_| invalid())?;

        Ok(VersionConstraint::new(comparator, version))
    }

    /// Does `version` satisfy this constraint?
    pub fn matches(&self, version: &Version) -> bool {
        self.comparator.matches(version, &self.version)
    }
}

impl FromStr for VersionConstraint {
    type Err = CookbookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VersionConstraint::parse(s)
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.comparator, self.version)
    }
}
