use crate::build::{Builder, Scope, resolve, unknown_tag};
use crate::errors::{ConstructError, NameKind, TagPosition};
use crate::expressions::BooleanExpr;
use crate::runtime::ExecutionContext;

/// The decision tree of a state.
#[derive(Debug)]
pub enum Statement {
    /// Leaf: the index of a state of the same option.
    Transition(usize),
    /// `if` / `else if` / `else`, tested in declaration order.
    IfElse {
        condition: BooleanExpr,
        then: Box<Statement>,
        else_ifs: Vec<(BooleanExpr, Statement)>,
        otherwise: Box<Statement>,
    },
}

impl Statement {
    pub(crate) fn create(b: &mut Builder<'_>, scope: &Scope<'_>) -> Result<Self, ConstructError> {
        b.nested(|b| Self::create_tagged(b, scope))
    }

    fn create_tagged(b: &mut Builder<'_>, scope: &Scope<'_>) -> Result<Self, ConstructError> {
        let tag = b.read_string()?;
        match tag.tag() {
            Some('t') => {
                let name = b.read_string()?;
                Ok(Statement::Transition(resolve(
                    scope.states,
                    NameKind::State,
                    &name,
                )?))
            }
            Some('i') => {
                let condition = BooleanExpr::create(b, scope)?;
                let then = Statement::create(b, scope)?;
                let (else_ifs, otherwise) = match Statement::create(b, scope)? {
                    // `else { if .. }` reads as another `else if` of this block.
                    Statement::IfElse {
                        condition: nested_condition,
                        then: nested_then,
                        mut else_ifs,
                        otherwise,
                    } => {
                        else_ifs.insert(0, (nested_condition, *nested_then));
                        (else_ifs, otherwise)
                    }
                    transition => (Vec::new(), Box::new(transition)),
                };
                Ok(Statement::IfElse {
                    condition,
                    then: Box::new(then),
                    else_ifs,
                    otherwise,
                })
            }
            _ => Err(unknown_tag(TagPosition::Statement, &tag)),
        }
    }

    /// Index of the state selected by the decision tree.
    pub(crate) fn next_state(&self, cx: &ExecutionContext<'_>) -> usize {
        match self {
            Statement::Transition(state) => *state,
            Statement::IfElse {
                condition,
                then,
                else_ifs,
                otherwise,
            } => {
                if condition.value(cx) {
                    return then.next_state(cx);
                }
                for (condition, statement) in else_ifs {
                    if condition.value(cx) {
                        return statement.next_state(cx);
                    }
                }
                otherwise.next_state(cx)
            }
        }
    }

    /// Every state this tree can transition to, in reading order.
    pub fn targets(&self) -> Vec<usize> {
        let mut out = Vec::new();
        self.collect_targets(&mut out);
        out
    }

    fn collect_targets(&self, out: &mut Vec<usize>) {
        match self {
            Statement::Transition(state) => out.push(*state),
            Statement::IfElse {
                then,
                else_ifs,
                otherwise,
                ..
            } => {
                then.collect_targets(out);
                for (_, statement) in else_ifs {
                    statement.collect_targets(out);
                }
                otherwise.collect_targets(out);
            }
        }
    }
}
