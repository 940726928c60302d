//! Error types for schema construction and component lookup.
//!
//! [`SchemaError`] covers the fatal failures of the startup pipeline: any of
//! them aborts construction and no schema is published. [`LookupError`] is
//! the recoverable outcome of asking a [`ComponentRegistry`] for a component;
//! the wiring resolver records it and carries on.
//!
//! [`ComponentRegistry`]: crate::components::ComponentRegistry

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors raised while loading, merging or assembling a schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The schema location is missing, empty or the configuration is invalid.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A schema document could not be read.
    #[error("failed to read schema document {}: {source}", path.display())]
    Io {
        /// Path of the document.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A schema document has syntax errors.
    #[error("syntax error in {origin} at {line}:{column}: {message}")]
    Parse {
        /// File path or in-memory origin of the document.
        origin: String,
        /// 1-based line of the first reported position.
        line: usize,
        /// 1-based column of the first reported position.
        column: usize,
        /// Parser message.
        message: String,
    },

    /// Two documents declare incompatible definitions for the same name.
    #[error("conflicting definitions for `{name}`: {reason}")]
    Conflict {
        /// Type (or `schema`) name the conflict was found on.
        name: String,
        /// What differs.
        reason: String,
    },

    /// The execution engine rejected the registry and wiring combination.
    #[error("failed to build executable schema: {0}")]
    Build(String),
}

impl SchemaError {
    /// Returns the stable error code used in structured logs.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Io { .. } => "IO_ERROR",
            Self::Parse { .. } => "PARSE_ERROR",
            Self::Conflict { .. } => "SCHEMA_CONFLICT",
            Self::Build(_) => "SCHEMA_BUILD_FAILED",
        }
    }

    pub(crate) fn conflict(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Conflict {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn parse(origin: &str, err: async_graphql_parser::Error) -> Self {
        let (line, column) = err
            .positions()
            .next()
            .map(|pos| (pos.line, pos.column))
            .unwrap_or((0, 0));
        Self::Parse {
            origin: origin.to_string(),
            line,
            column,
            message: err.to_string(),
        }
    }
}

/// Kind of component the caller expected from a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    /// A field resolver.
    DataFetcher,
    /// A per-type wiring builder.
    TypeBuilder,
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DataFetcher => write!(f, "data fetcher"),
            Self::TypeBuilder => write!(f, "type builder"),
        }
    }
}

/// Recoverable outcome of a failed component lookup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    /// No component is registered under the name.
    #[error("no component named `{name}`")]
    NotFound {
        /// Looked-up name.
        name: String,
    },

    /// The component exists but could not be constructed.
    #[error("component `{name}` failed to initialize: {reason}")]
    Initialization {
        /// Looked-up name.
        name: String,
        /// Reason reported by the component factory.
        reason: String,
    },

    /// The component exists but does not provide the expected capability.
    #[error("component `{name}` is not a {expected}")]
    UnexpectedKind {
        /// Looked-up name.
        name: String,
        /// Capability the caller asked for.
        expected: ComponentKind,
    },
}

impl LookupError {
    /// Returns `true` for the expected "nothing registered" case.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
