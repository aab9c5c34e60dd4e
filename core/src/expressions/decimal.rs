use super::operators::{ArithmeticOp, eval_arithmetic};
use super::{Conditional, read_input};
use crate::build::{Builder, Scope, resolve, unknown_tag};
use crate::diagnostics::Context;
use crate::errors::{ConstructError, NameKind, TagPosition};
use crate::parameters::ParameterAssignment;
use crate::runtime::ExecutionContext;
use crate::symbols::Domain;

#[derive(Debug)]
pub enum DecimalExpr {
    Value(f64),
    OptionParameter(usize),
    InputSymbol {
        symbol: usize,
        parameters: ParameterAssignment,
    },
    OutputSymbol(usize),
    Arithmetic {
        op: ArithmeticOp,
        left: Box<DecimalExpr>,
        right: Box<DecimalExpr>,
    },
    Conditional(Box<Conditional<DecimalExpr>>),
    /// Time since the owning state became active.
    StateTime,
    /// Time since the owning option became active.
    OptionTime,
}

impl DecimalExpr {
    pub(crate) fn create(b: &mut Builder<'_>, scope: &Scope<'_>) -> Result<Self, ConstructError> {
        b.nested(|b| Self::create_tagged(b, scope))
    }

    fn create_tagged(b: &mut Builder<'_>, scope: &Scope<'_>) -> Result<Self, ConstructError> {
        let tag = b.read_string()?;
        let expression = match tag.tag() {
            Some('v' | 'c') => DecimalExpr::Value(b.read_value()?),
            Some('p') => {
                let name = b.read_string()?;
                DecimalExpr::OptionParameter(scope.option_parameter(Domain::Decimal, &name)?)
            }
            Some('i') => {
                let name = b.read_string()?;
                let inputs = scope.symbols.decimal_input_symbols();
                let symbol = resolve(inputs, NameKind::InputSymbol(Domain::Decimal), &name)?;
                let parameters =
                    ParameterAssignment::create(b, scope, &inputs[symbol].parameters, name.text)?;
                DecimalExpr::InputSymbol { symbol, parameters }
            }
            Some('o') => {
                let name = b.read_string()?;
                let outputs = scope.symbols.decimal_output_symbols();
                DecimalExpr::OutputSymbol(resolve(
                    outputs,
                    NameKind::OutputSymbol(Domain::Decimal),
                    &name,
                )?)
            }
            Some('s') => DecimalExpr::StateTime,
            Some('t') => DecimalExpr::OptionTime,
            Some('q') => DecimalExpr::Conditional(Box::new(Conditional::create(b, scope, |b| {
                DecimalExpr::create(b, scope)
            })?)),
            Some(c) => match ArithmeticOp::from_tag(c) {
                Some(op) => {
                    let in_operand = |e: ConstructError| {
                        e.in_context(Context::InOperand {
                            operator: op.symbol().to_string(),
                            span: tag.span.clone(),
                        })
                    };
                    let left = DecimalExpr::create(b, scope).map_err(in_operand)?;
                    let right = DecimalExpr::create(b, scope).map_err(in_operand)?;
                    DecimalExpr::Arithmetic {
                        op,
                        left: Box::new(left),
                        right: Box::new(right),
                    }
                }
                None => return Err(unknown_tag(TagPosition::Expression(Domain::Decimal), &tag)),
            },
            None => return Err(unknown_tag(TagPosition::Expression(Domain::Decimal), &tag)),
        };
        tracing::trace!(tag = tag.text, "created decimal expression");
        Ok(expression)
    }

    pub(crate) fn value(&self, cx: &ExecutionContext<'_>) -> f64 {
        match self {
            DecimalExpr::Value(value) => *value,
            DecimalExpr::OptionParameter(index) => cx.option.parameters.decimal[*index].get(),
            DecimalExpr::InputSymbol { symbol, parameters } => {
                read_input(&cx.symbols().decimal_input_symbols()[*symbol], parameters, cx)
            }
            DecimalExpr::OutputSymbol(index) => cx.symbols().decimal_output_symbols()[*index].value(),
            DecimalExpr::Arithmetic { op, left, right } => {
                eval_arithmetic(*op, left.value(cx), right.value(cx))
            }
            DecimalExpr::Conditional(conditional) => conditional.select(cx).value(cx),
            DecimalExpr::StateTime => cx.state.time_of_execution() as f64,
            DecimalExpr::OptionTime => cx.option.time_of_execution() as f64,
        }
    }
}
