//! Public error types for the behavior engine API.
//!
//! Internal errors are converted to these types at the API boundary.

use std::fmt;

use crate::errors::{ConstructError, RegistrationError};
use crate::reader::Span;

/// Public error type for all engine operations.
#[derive(Debug)]
pub enum Error {
    /// Invalid API usage (e.g., executing before a graph was created, unknown agent).
    Api(String),

    /// The host binding contract was violated.
    Registration(RegistrationError),

    /// The intermediate code could not be turned into an option graph.
    ///
    /// Contains the diagnostics and the intermediate code they point into.
    Construction {
        diagnostics: Vec<Diagnostic>,
        source: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Api(msg) => write!(f, "API error: {}", msg),
            Error::Registration(err) => write!(f, "Registration error: {}", err),
            Error::Construction { diagnostics, .. } => {
                let error_count = diagnostics
                    .iter()
                    .filter(|d| d.severity == Severity::Error)
                    .count();
                write!(f, "Option graph construction failed with {} error(s)", error_count)?;
                if let Some(first) = diagnostics.first() {
                    write!(f, ": {}", first.message)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for Error {}

/// A diagnostic message with a location inside the intermediate code.
///
/// Maps cleanly to LSP diagnostics for editor integration.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Severity level (error, warning, info).
    pub severity: Severity,

    /// Primary diagnostic message.
    pub message: String,

    /// Source location of the primary issue.
    pub span: Span,

    /// Enclosing nodes that were being built, innermost first.
    pub related: Vec<RelatedInfo>,

    /// Optional help text suggesting how to fix the issue.
    pub help: Option<String>,

    /// Optional error code for documentation lookup.
    pub code: Option<String>,
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Related information for a diagnostic (e.g., "in option `x`").
#[derive(Debug, Clone, PartialEq)]
pub struct RelatedInfo {
    pub span: Span,
    pub message: String,
}

// ============================================================================
// Conversion from internal errors
// ============================================================================

impl From<RegistrationError> for Error {
    fn from(err: RegistrationError) -> Self {
        Error::Registration(err)
    }
}

impl Error {
    pub(crate) fn construction(err: &ConstructError, source: &str) -> Self {
        Error::Construction {
            diagnostics: vec![err.to_diagnostic()],
            source: source.to_string(),
        }
    }
}
