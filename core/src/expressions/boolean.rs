use super::operators::{RelationalOp, eval_relational};
use super::{Conditional, DecimalExpr, EnumeratedExpr, read_input};
use crate::build::{Builder, Scope, resolve, unknown_tag};
use crate::diagnostics::Context;
use crate::errors::{ConstructError, ErrorKind, NameKind, TagPosition};
use crate::graph::Action;
use crate::parameters::ParameterAssignment;
use crate::reader::Token;
use crate::runtime::ExecutionContext;
use crate::symbols::Domain;

#[derive(Debug)]
pub enum BooleanExpr {
    Value(bool),
    OptionParameter(usize),
    InputSymbol {
        symbol: usize,
        parameters: ParameterAssignment,
    },
    OutputSymbol(usize),
    And(Vec<BooleanExpr>),
    Or(Vec<BooleanExpr>),
    Not(Box<BooleanExpr>),
    Relational {
        op: RelationalOp,
        left: Box<DecimalExpr>,
        right: Box<DecimalExpr>,
    },
    /// Two enumerated values of the same enumeration are equal.
    EnumeratedEquality {
        left: Box<EnumeratedExpr>,
        right: Box<EnumeratedExpr>,
    },
    /// Some option activated by the owning state is in a target state.
    SubsequentOptionReachedTargetState,
    Conditional(Box<Conditional<BooleanExpr>>),
}

fn operand_context(operator: &str, tag: &Token<'_>) -> impl Fn(ConstructError) -> ConstructError {
    let operator = operator.to_string();
    let span = tag.span.clone();
    move |e| {
        e.in_context(Context::InOperand {
            operator: operator.clone(),
            span: span.clone(),
        })
    }
}

impl BooleanExpr {
    pub(crate) fn create(b: &mut Builder<'_>, scope: &Scope<'_>) -> Result<Self, ConstructError> {
        b.nested(|b| Self::create_tagged(b, scope))
    }

    fn create_tagged(b: &mut Builder<'_>, scope: &Scope<'_>) -> Result<Self, ConstructError> {
        let tag = b.read_string()?;
        let expression = match tag.tag() {
            Some('v') => BooleanExpr::Value(b.read_boolean()?),
            Some('p') => {
                let name = b.read_string()?;
                BooleanExpr::OptionParameter(scope.option_parameter(Domain::Boolean, &name)?)
            }
            Some('i') => {
                let name = b.read_string()?;
                let inputs = scope.symbols.boolean_input_symbols();
                let symbol = resolve(inputs, NameKind::InputSymbol(Domain::Boolean), &name)?;
                let parameters =
                    ParameterAssignment::create(b, scope, &inputs[symbol].parameters, name.text)?;
                BooleanExpr::InputSymbol { symbol, parameters }
            }
            Some('o') => {
                let name = b.read_string()?;
                let outputs = scope.symbols.boolean_output_symbols();
                BooleanExpr::OutputSymbol(resolve(
                    outputs,
                    NameKind::OutputSymbol(Domain::Boolean),
                    &name,
                )?)
            }
            Some('t') => BooleanExpr::SubsequentOptionReachedTargetState,
            Some(c @ ('&' | '|')) => {
                let operator = if c == '&' { "&&" } else { "||" };
                let (count, _) = b.read_count()?;
                if count == 0 {
                    return Err(ConstructError::new(
                        ErrorKind::MissingOperands { operator },
                        tag.span.clone(),
                    ));
                }
                let in_operand = operand_context(operator, &tag);
                let mut operands = Vec::new();
                for _ in 0..count {
                    operands.push(BooleanExpr::create(b, scope).map_err(&in_operand)?);
                }
                if c == '&' {
                    BooleanExpr::And(operands)
                } else {
                    BooleanExpr::Or(operands)
                }
            }
            Some('!') => {
                let operand = BooleanExpr::create(b, scope).map_err(operand_context("!", &tag))?;
                BooleanExpr::Not(Box::new(operand))
            }
            Some('c') => {
                let in_operand = operand_context("==", &tag);
                let left = EnumeratedExpr::create(b, scope, None).map_err(&in_operand)?;
                let right = EnumeratedExpr::create(b, scope, Some(left.enumeration()))
                    .map_err(&in_operand)?;
                BooleanExpr::EnumeratedEquality {
                    left: Box::new(left),
                    right: Box::new(right),
                }
            }
            Some('q') => BooleanExpr::Conditional(Box::new(Conditional::create(b, scope, |b| {
                BooleanExpr::create(b, scope)
            })?)),
            Some(c) => match RelationalOp::from_tag(c) {
                Some(op) => {
                    let in_operand = operand_context(op.symbol(), &tag);
                    let left = DecimalExpr::create(b, scope).map_err(&in_operand)?;
                    let right = DecimalExpr::create(b, scope).map_err(&in_operand)?;
                    BooleanExpr::Relational {
                        op,
                        left: Box::new(left),
                        right: Box::new(right),
                    }
                }
                None => return Err(unknown_tag(TagPosition::Expression(Domain::Boolean), &tag)),
            },
            None => return Err(unknown_tag(TagPosition::Expression(Domain::Boolean), &tag)),
        };
        tracing::trace!(tag = tag.text, "created boolean expression");
        Ok(expression)
    }

    pub(crate) fn value(&self, cx: &ExecutionContext<'_>) -> bool {
        match self {
            BooleanExpr::Value(value) => *value,
            BooleanExpr::OptionParameter(index) => cx.option.parameters.boolean[*index].get(),
            BooleanExpr::InputSymbol { symbol, parameters } => {
                read_input(&cx.symbols().boolean_input_symbols()[*symbol], parameters, cx)
            }
            BooleanExpr::OutputSymbol(index) => cx.symbols().boolean_output_symbols()[*index].value(),
            BooleanExpr::And(operands) => operands.iter().all(|operand| operand.value(cx)),
            BooleanExpr::Or(operands) => operands.iter().any(|operand| operand.value(cx)),
            BooleanExpr::Not(operand) => !operand.value(cx),
            BooleanExpr::Relational { op, left, right } => {
                eval_relational(*op, left.value(cx), right.value(cx))
            }
            BooleanExpr::EnumeratedEquality { left, right } => left.value(cx) == right.value(cx),
            BooleanExpr::SubsequentOptionReachedTargetState => {
                cx.state.actions().iter().any(|action| match action {
                    Action::Option { option, .. } => {
                        cx.runtime.options[*option].reached_target_state(cx.runtime.cycle)
                    }
                    _ => false,
                })
            }
            BooleanExpr::Conditional(conditional) => conditional.select(cx).value(cx),
        }
    }
}
