//! Errors raised while loading or querying the cookbook catalog.

use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::Diagnostic;

/// Error from the cookbook loader or the catalog query API.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum CookbookError {
    #[error("{}", describe_not_found(.name, .version.as_deref()))]
    #[diagnostic(
        code(galley::catalog::not_found),
        help("check the cookbook name and the configured cookbook paths; did you forget to add metadata to a cookbook?")
    )]
    NotFound {
        name: String,
        version: Option<String>,
        available: Vec<String>,
    },

    #[error("unrecognized dependency specification `{constraint}`")]
    #[diagnostic(
        code(galley::constraint::syntax),
        help("use an optional operator (<<, <=, =, >=, >>) followed by a version, e.g. `>= 1.0.0`")
    )]
    InvalidConstraintSyntax { constraint: String },

    #[error("can't satisfy dependency `{constraint}` for cookbook `{name}`")]
    #[diagnostic(code(galley::resolve::unsatisfiable))]
    UnsatisfiableDependency {
        name: String,
        constraint: String,
        available: Vec<String>,
    },

    #[error("conflicting dependencies for cookbook `{name}`")]
    #[diagnostic(
        code(galley::resolve::conflict),
        help("each constraint matches some version, but no version matches all of them")
    )]
    ConflictingDependency {
        name: String,
        constraints: Vec<String>,
    },

    #[error("malformed metadata in {}: {message}", .path.display())]
    #[diagnostic(code(galley::metadata::malformed))]
    MalformedMetadata { path: PathBuf, message: String },

    #[error("invalid version `{version}`")]
    #[diagnostic(code(galley::version::invalid))]
    InvalidVersion { version: String },

    #[error("failed to read {}", .path.display())]
    #[diagnostic(code(galley::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn describe_not_found(name: &str, version: Option<&str>) -> String {
    match version {
        Some(version) => format!(
            "cannot find the requested version `{}` of cookbook `{}`",
            version, name
        ),
        None => format!("cannot find a cookbook named `{}`", name),
    }
}

impl CookbookError {
    /// Shorthand for an unknown cookbook name.
    pub fn unknown_cookbook(name: impl Into<String>) -> Self {
        CookbookError::NotFound {
            name: name.into(),
            version: None,
            available: Vec::new(),
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            CookbookError::NotFound {
                name,
                version,
                available,
            } => {
                let mut diag = Diagnostic::error(self.to_string());

                if version.is_some() && !available.is_empty() {
                    diag = diag.with_context(format!(
                        "available versions: {}",
                        available.join(", ")
                    ));
                }

                diag.with_suggestion(format!(
                    "Run `galley versions {}` to list the known versions",
                    name
                ))
                .with_suggestion("Check the configured cookbook paths".to_string())
            }

            CookbookError::InvalidConstraintSyntax { constraint } => {
                Diagnostic::error(self.to_string())
                    .with_context(format!("could not parse `{}`", constraint))
                    .with_suggestion(
                        "Write constraints as `<op> <version>`, e.g. `>= 0.2.0`".to_string(),
                    )
            }

            CookbookError::UnsatisfiableDependency {
                name, available, ..
            } => {
                let mut diag = Diagnostic::error(self.to_string());

                if !available.is_empty() {
                    diag = diag.with_context(format!(
                        "available versions: {}",
                        available.join(", ")
                    ));
                }

                diag.with_suggestion(format!(
                    "Relax the version requirement for `{}`",
                    name
                ))
            }

            CookbookError::ConflictingDependency { name, constraints } => {
                let mut diag = Diagnostic::error(self.to_string());

                for constraint in constraints {
                    diag = diag.with_context(format!("requires {} {}", name, constraint));
                }

                diag.with_suggestion(
                    "Align the version constraints so at least one version matches all of them"
                        .to_string(),
                )
            }

            CookbookError::MalformedMetadata { path, .. } => Diagnostic::error(self.to_string())
                .with_location(path.clone())
                .with_suggestion("Fix or regenerate the metadata.json file".to_string()),

            CookbookError::InvalidVersion { .. } => Diagnostic::error(self.to_string())
                .with_suggestion("Versions are dot-separated numbers, e.g. `0.10.0`".to_string()),

            CookbookError::Io { path, source } => Diagnostic::error(self.to_string())
                .with_location(path.clone())
                .with_context(source.to_string()),
        }
    }
}
