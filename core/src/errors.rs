//! Internal error types for graph construction and host registration.

use core::fmt;

use crate::api::{Diagnostic, Severity};
use crate::diagnostics::Context;
use crate::reader::Span;
use crate::symbols::Domain;

/// The category of a named entity, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    InputSymbol(Domain),
    OutputSymbol(Domain),
    OptionParameter(Domain),
    Parameter(Domain),
    Enumeration,
    Option,
    State,
    BasicBehavior,
    Agent,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameKind::InputSymbol(domain) => write!(f, "{} input symbol", domain),
            NameKind::OutputSymbol(domain) => write!(f, "{} output symbol", domain),
            NameKind::OptionParameter(domain) => write!(f, "{} option parameter", domain),
            NameKind::Parameter(domain) => write!(f, "{} parameter", domain),
            NameKind::Enumeration => write!(f, "enumeration"),
            NameKind::Option => write!(f, "option"),
            NameKind::State => write!(f, "state"),
            NameKind::BasicBehavior => write!(f, "basic behavior"),
            NameKind::Agent => write!(f, "agent"),
        }
    }
}

/// Where a one character tag was expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagPosition {
    Expression(Domain),
    Statement,
    Action,
    ParameterDeclaration,
    ParameterBinding,
}

impl fmt::Display for TagPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagPosition::Expression(domain) => write!(f, "{} expression", domain),
            TagPosition::Statement => write!(f, "statement"),
            TagPosition::Action => write!(f, "action"),
            TagPosition::ParameterDeclaration => write!(f, "parameter declaration"),
            TagPosition::ParameterBinding => write!(f, "parameter binding"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ErrorKind {
    // Stream errors.
    #[error("unexpected end of intermediate code")]
    UnexpectedEnd,

    #[error("unrecognized input `{text}`")]
    UnrecognizedInput { text: String },

    #[error("token of {length} bytes exceeds the limit of {max} bytes")]
    TokenTooLong { length: usize, max: usize },

    #[error("expected a decimal value, found `{found}`")]
    InvalidValue { found: String },

    #[error("expected a non-negative count, found `{found}`")]
    InvalidCount { found: String },

    #[error("expected `true` or `false`, found `{found}`")]
    InvalidBoolean { found: String },

    #[error("expected target state flag `0` or `1`, found `{found}`")]
    InvalidTargetFlag { found: String },

    #[error("unknown {position} tag `{tag}`")]
    UnknownTag { position: TagPosition, tag: String },

    #[error("expected {kind} `{expected}`, found `{found}`")]
    OutOfOrder {
        kind: NameKind,
        expected: String,
        found: String,
    },

    #[error("intermediate code declares no options")]
    EmptyGraph,

    #[error("unexpected trailing input `{found}`")]
    TrailingInput { found: String },

    #[error("nesting exceeds the maximum depth of {max}")]
    NestingTooDeep { max: usize },

    // Binding errors.
    #[error("{kind} `{name}` does not exist")]
    Unresolved { kind: NameKind, name: String },

    #[error("enumeration `{enumeration}` has no element `{element}`")]
    UnknownEnumElement { enumeration: String, element: String },

    #[error("{kind} `{name}` is declared more than once")]
    Duplicate { kind: NameKind, name: String },

    #[error("parameter `{name}` of `{target}` is not bound")]
    UnboundParameter { name: String, target: String },

    #[error("parameter `{name}` of `{target}` is bound more than once")]
    DuplicateBinding { name: String, target: String },

    #[error("`{operator}` needs at least one operand")]
    MissingOperands { operator: &'static str },

    // Domain errors.
    #[error("enumeration mismatch: expected `{expected}`, found `{found}`")]
    EnumerationMismatch { expected: String, found: String },

    #[error("enumerated value `{element}` has no enumeration to resolve against")]
    UntypedEnumeratedValue { element: String },
}

impl ErrorKind {
    fn help(&self) -> Option<String> {
        match self {
            ErrorKind::Unresolved {
                kind: NameKind::InputSymbol(_) | NameKind::OutputSymbol(_),
                ..
            } => Some("symbols must be registered before the option graph is created".into()),
            ErrorKind::Unresolved {
                kind: NameKind::BasicBehavior,
                ..
            } => Some("basic behaviors must be registered before the option graph is created".into()),
            ErrorKind::TokenTooLong { .. } => {
                Some("raise `EngineOptions::max_token_length` if the name is legitimate".into())
            }
            ErrorKind::NestingTooDeep { .. } => {
                Some("raise `EngineOptions::max_nesting_depth` if the code is legitimate".into())
            }
            _ => None,
        }
    }
}

/// A failure to build part of the option graph from intermediate code.
///
/// Carries the location of the offending token and the chain of enclosing
/// nodes (innermost first) that were being built when the error occurred.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructError {
    pub kind: ErrorKind,
    pub span: Span,
    pub context: Vec<Context>,
}

impl ConstructError {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        Self {
            kind,
            span,
            context: Vec::new(),
        }
    }

    /// Records an enclosing node while the error unwinds.
    pub fn in_context(mut self, context: Context) -> Self {
        self.context.push(context);
        self
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic {
            severity: Severity::Error,
            message: self.kind.to_string(),
            span: self.span.clone(),
            related: self.context.iter().map(Context::to_related_info).collect(),
            help: self.kind.help(),
            code: None,
        }
    }
}

impl fmt::Display for ConstructError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        for context in &self.context {
            write!(f, "\n  {}", context.to_related_info().message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ConstructError {}

/// A failure of the host binding contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("{kind} `{name}` is already registered")]
    Duplicate { kind: NameKind, name: String },

    #[error("{kind} `{name}` is not registered")]
    Unknown { kind: NameKind, name: String },

    #[error("element `{element}` of enumeration `{enumeration}` is already registered")]
    DuplicateEnumElement {
        enumeration: String,
        element: String,
    },

    #[error("{kind} `{parameter}` of `{owner}` is already registered")]
    DuplicateParameter {
        kind: NameKind,
        owner: String,
        parameter: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_context() {
        let err = ConstructError::new(
            ErrorKind::Unresolved {
                kind: NameKind::State,
                name: "missing".into(),
            },
            Span::new(10, 17),
        )
        .in_context(Context::InState {
            name: "start".into(),
            span: Span::new(0, 5),
        });
        assert_eq!(
            err.to_string(),
            "state `missing` does not exist\n  in state `start`"
        );
    }

    #[test]
    fn test_to_diagnostic() {
        let err = ConstructError::new(
            ErrorKind::Unresolved {
                kind: NameKind::InputSymbol(Domain::Decimal),
                name: "ball.distance".into(),
            },
            Span::new(3, 16),
        );
        let diagnostic = err.to_diagnostic();
        assert_eq!(diagnostic.severity, Severity::Error);
        assert_eq!(
            diagnostic.message,
            "decimal input symbol `ball.distance` does not exist"
        );
        assert_eq!(diagnostic.span, Span::new(3, 16));
        assert!(diagnostic.help.is_some());
        assert!(diagnostic.related.is_empty());
    }

    #[test]
    fn test_registration_error_messages() {
        let err = RegistrationError::DuplicateParameter {
            kind: NameKind::Parameter(Domain::Boolean),
            owner: "kick".into(),
            parameter: "strong".into(),
        };
        assert_eq!(
            err.to_string(),
            "boolean parameter `strong` of `kick` is already registered"
        );
    }
}
