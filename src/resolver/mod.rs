//! Version selection.
//!
//! Pure functions over the ascending version list of a single cookbook.
//! All I/O happens before resolution; the catalog hands in its versions.

pub mod constraint;

pub use constraint::{Comparator, VersionConstraint};

use crate::core::errors::CookbookError;
use crate::core::version::Version;

/// Versions matching `constraint`, in ascending order.
///
/// Without a constraint every version matches.
pub fn satisfy(versions: &[Version], constraint: Option<&VersionConstraint>) -> Vec<Version> {
    match constraint {
        None => versions.to_vec(),
        Some(constraint) => versions
            .iter()
            .filter(|v| constraint.matches(v))
            .cloned()
            .collect(),
    }
}

/// Pick the highest version satisfying every constraint.
///
/// With no constraints the highest version wins. A constraint matching
/// nothing on its own is unsatisfiable; an empty intersection of
/// individually satisfiable constraints is a conflict.
pub fn satisfy_all<S: AsRef<str>>(
    name: &str,
    versions: &[Version],
    constraints: &[S],
) -> Result<Version, CookbookError> {
    let highest = || {
        versions
            .last()
            .cloned()
            .ok_or_else(|| CookbookError::unknown_cookbook(name))
    };

    if constraints.is_empty() {
        return highest();
    }

    let mut remaining: Option<Vec<Version>> = None;

    for raw in constraints {
        let raw = raw.as_ref();
        let constraint = VersionConstraint::parse(raw)?;
        let matching = satisfy(versions, Some(&constraint));

        if matching.is_empty() {
            return Err(CookbookError::UnsatisfiableDependency {
                name: name.to_string(),
                constraint: raw.to_string(),
                available: versions.iter().map(Version::to_string).collect(),
            });
        }

        let narrowed = match remaining {
            None => matching,
            Some(current) => {
                let narrowed: Vec<Version> = current
                    .into_iter()
                    .filter(|v| matching.contains(v))
                    .collect();

                if narrowed.is_empty() {
                    return Err(CookbookError::ConflictingDependency {
                        name: name.to_string(),
                        constraints: constraints
                            .iter()
                            .map(|c| c.as_ref().to_string())
                            .collect(),
                    });
                }
                narrowed
            }
        };

        tracing::trace!(
            "constraint `{}` on {} leaves {} candidate(s)",
            raw,
            name,
            narrowed.len()
        );
        remaining = Some(narrowed);
    }

    remaining
        .and_then(|vs| vs.last().cloned())
        .ok_or_else(|| CookbookError::unknown_cookbook(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versions(list: &[&str]) -> Vec<Version> {
        list.iter().map(|s| s.parse().unwrap()).collect()
    }

    fn strings(list: &[Version]) -> Vec<String> {
        list.iter().map(Version::to_string).collect()
    }

    #[test]
    fn test_satisfy_single_constraints() {
        let known = versions(&["0.0.1", "0.2.1"]);
        let run = |c: &str| strings(&satisfy(&known, Some(&c.parse::<VersionConstraint>().unwrap())));

        assert_eq!(run("<< 0.2.1"), ["0.0.1"]);
        assert_eq!(run(">= 0.0.1"), ["0.0.1", "0.2.1"]);
        assert!(run(">> 0.3.2").is_empty());
        assert_eq!(strings(&satisfy(&known, None)), ["0.0.1", "0.2.1"]);
    }

    #[test]
    fn test_satisfy_all_picks_highest_in_intersection() {
        let known = versions(&["0.0.1", "0.2.1"]);

        let v = satisfy_all("cb", &known, &["0.2.1", ">= 0.0.1"]).unwrap();
        assert_eq!(v.to_string(), "0.2.1");

        let v = satisfy_all("cb", &known, &["<= 0.2.1", "<< 0.2.1"]).unwrap();
        assert_eq!(v.to_string(), "0.0.1");
    }

    #[test]
    fn test_satisfy_all_without_constraints_is_highest() {
        let known = versions(&["0.0.1", "0.10.0", "0.9.0"]);
        let mut sorted = known.clone();
        sorted.sort();

        let none: [&str; 0] = [];
        assert_eq!(satisfy_all("cb", &sorted, &none).unwrap().to_string(), "0.10.0");
    }

    #[test]
    fn test_short_constraint_selects_padded_version() {
        let known = versions(&["1.0.0"]);
        let run = |c: &str| strings(&satisfy(&known, Some(&c.parse::<VersionConstraint>().unwrap())));

        assert_eq!(run("= 1.0"), ["1.0.0"]);
        assert_eq!(run("<= 1.0"), ["1.0.0"]);
        assert_eq!(satisfy_all("apache2", &known, &["1.0"]).unwrap().to_string(), "1.0.0");
    }

    #[test]
    fn test_satisfy_all_conflict() {
        let known = versions(&["0.0.1", "0.2.1"]);
        let err = satisfy_all("cb", &known, &["<< 0.2.1", "0.2.1"]).unwrap_err();
        assert!(matches!(err, CookbookError::ConflictingDependency { .. }));
    }

    #[test]
    fn test_satisfy_all_unsatisfiable() {
        let known = versions(&["0.0.1", "0.2.1"]);
        let err = satisfy_all("cb", &known, &[">= 0.0.1", ">> 0.3.2"]).unwrap_err();
        match err {
            CookbookError::UnsatisfiableDependency { constraint, .. } => {
                assert_eq!(constraint, ">> 0.3.2")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_satisfy_all_bad_syntax() {
        let known = versions(&["1.0.0"]);
        let err = satisfy_all("cb", &known, &["~> 1.0"]).unwrap_err();
        assert!(matches!(err, CookbookError::InvalidConstraintSyntax { .. }));
    }
}
