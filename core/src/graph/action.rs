use crate::build::{Builder, Scope, resolve, unknown_tag};
use crate::diagnostics::Context;
use crate::errors::{ConstructError, NameKind, TagPosition};
use crate::expressions::{BooleanExpr, DecimalExpr, EnumeratedExpr};
use crate::parameters::ParameterAssignment;
use crate::runtime::ExecutionContext;
use crate::symbols::Domain;

/// What an active state does every cycle.
#[derive(Debug)]
pub enum Action {
    /// Activate a subsequent option.
    Option {
        option: usize,
        parameters: ParameterAssignment,
    },
    /// Run a basic behavior.
    BasicBehavior {
        behavior: usize,
        parameters: ParameterAssignment,
    },
    DecimalOutput {
        symbol: usize,
        expression: DecimalExpr,
    },
    BooleanOutput {
        symbol: usize,
        expression: BooleanExpr,
    },
    EnumeratedOutput {
        symbol: usize,
        expression: EnumeratedExpr,
    },
}

impl Action {
    pub(crate) fn create(b: &mut Builder<'_>, scope: &Scope<'_>) -> Result<Self, ConstructError> {
        let tag = b.read_string()?;
        let name = b.read_string()?;
        let in_action = |what: &str| {
            let context = Context::InAction {
                what: format!("{} `{}`", what, name.text),
                span: name.span.clone(),
            };
            move |e: ConstructError| e.in_context(context)
        };
        let action = match tag.tag() {
            Some('o') => {
                let option = resolve(scope.options, NameKind::Option, &name)?;
                let parameters =
                    ParameterAssignment::create(b, scope, &scope.options[option], name.text)
                        .map_err(in_action("activation of option"))?;
                Action::Option { option, parameters }
            }
            Some('a') => {
                let behavior = resolve(scope.behaviors, NameKind::BasicBehavior, &name)?;
                let parameters = ParameterAssignment::create(
                    b,
                    scope,
                    &scope.behaviors[behavior].parameters,
                    name.text,
                )
                .map_err(in_action("basic behavior"))?;
                Action::BasicBehavior {
                    behavior,
                    parameters,
                }
            }
            Some('d') => {
                let outputs = scope.symbols.decimal_output_symbols();
                let symbol = resolve(outputs, NameKind::OutputSymbol(Domain::Decimal), &name)?;
                let expression = DecimalExpr::create(b, scope)
                    .map_err(in_action("assignment to output symbol"))?;
                Action::DecimalOutput { symbol, expression }
            }
            Some('b') => {
                let outputs = scope.symbols.boolean_output_symbols();
                let symbol = resolve(outputs, NameKind::OutputSymbol(Domain::Boolean), &name)?;
                let expression = BooleanExpr::create(b, scope)
                    .map_err(in_action("assignment to output symbol"))?;
                Action::BooleanOutput { symbol, expression }
            }
            Some('e') => {
                let outputs = scope.symbols.enumerated_output_symbols();
                let symbol = resolve(outputs, NameKind::OutputSymbol(Domain::Enumerated), &name)?;
                let expected = outputs[symbol].enumeration();
                let expression = EnumeratedExpr::create(b, scope, expected)
                    .map_err(in_action("assignment to output symbol"))?;
                Action::EnumeratedOutput { symbol, expression }
            }
            _ => return Err(unknown_tag(TagPosition::Action, &tag)),
        };
        tracing::debug!(tag = tag.text, name = name.text, "created action");
        Ok(action)
    }

    pub(crate) fn execute(&self, cx: &ExecutionContext<'_>) {
        let runtime = cx.runtime;
        match self {
            Action::Option { option, parameters } => {
                let target = &runtime.options[*option];
                if target.executed_in(runtime.cycle) {
                    tracing::warn!(option = target.name(), "option activated twice in one cycle");
                    return;
                }
                parameters.set(&target.parameters, cx);
                target.execute(runtime);
            }
            Action::BasicBehavior {
                behavior,
                parameters,
            } => {
                let entry = &runtime.behaviors[*behavior];
                if entry.executed_in(runtime.cycle) {
                    tracing::warn!(
                        behavior = entry.name(),
                        "basic behavior invoked twice in one cycle"
                    );
                    return;
                }
                let changed = parameters.set(&entry.parameters, cx);
                entry.run(changed, runtime.cycle);
            }
            Action::DecimalOutput { symbol, expression } => {
                let value = expression.value(cx);
                runtime.symbols.decimal_output_symbols()[*symbol].set_value(value);
            }
            Action::BooleanOutput { symbol, expression } => {
                let value = expression.value(cx);
                runtime.symbols.boolean_output_symbols()[*symbol].set_value(value);
            }
            Action::EnumeratedOutput { symbol, expression } => {
                let value = expression.value(cx);
                runtime.symbols.enumerated_output_symbols()[*symbol].set_value(value);
            }
        }
    }
}
