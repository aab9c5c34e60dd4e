use crate::api::RelatedInfo;
use crate::reader::Span;

/// Context information for construction errors.
///
/// Each frame names a node of the option graph that was being built when the
/// error occurred, and converts to a [`RelatedInfo`] for diagnostic display.
#[derive(Debug, Clone, PartialEq)]
pub enum Context {
    /// In the body of an option
    InOption { name: String, span: Span },
    /// In the body of a state
    InState { name: String, span: Span },
    /// In an action of a state
    InAction { what: String, span: Span },
    /// While binding a parameter
    InParameter { name: String, span: Span },
    /// In the operand of an operator
    InOperand { operator: String, span: Span },
    /// In the declaration of an agent
    InAgent { name: String, span: Span },
    /// Where something was declared
    DeclaredHere { what: String, span: Span },
}

impl Context {
    /// Convert to a RelatedInfo for diagnostic display
    pub fn to_related_info(&self) -> RelatedInfo {
        let (span, message) = match self {
            Context::InOption { name, span } => (span, format!("in option `{}`", name)),
            Context::InState { name, span } => (span, format!("in state `{}`", name)),
            Context::InAction { what, span } => (span, format!("in {}", what)),
            Context::InParameter { name, span } => (span, format!("in parameter `{}`", name)),
            Context::InOperand { operator, span } => {
                (span, format!("in operand of `{}`", operator))
            }
            Context::InAgent { name, span } => (span, format!("in agent `{}`", name)),
            Context::DeclaredHere { what, span } => (span, format!("{} declared here", what)),
        };
        RelatedInfo {
            span: span.clone(),
            message,
        }
    }
}
