use super::{Conditional, read_input};
use crate::build::{Builder, Scope, resolve, unknown_tag};
use crate::errors::{ConstructError, ErrorKind, NameKind, TagPosition};
use crate::parameters::ParameterAssignment;
use crate::reader::Token;
use crate::runtime::ExecutionContext;
use crate::symbols::{Domain, EnumId};

/// An enumerated expression, typed against one enumeration.
#[derive(Debug)]
pub struct EnumeratedExpr {
    enumeration: EnumId,
    kind: EnumeratedKind,
}

#[derive(Debug)]
pub enum EnumeratedKind {
    Value(i32),
    OptionParameter(usize),
    InputSymbol {
        symbol: usize,
        parameters: ParameterAssignment,
    },
    OutputSymbol(usize),
    Conditional(Box<Conditional<EnumeratedExpr>>),
}

/// Fails unless `found` is the expected enumeration.
fn check_enumeration(
    scope: &Scope<'_>,
    expected: Option<EnumId>,
    found: EnumId,
    token: &Token<'_>,
) -> Result<EnumId, ConstructError> {
    match expected {
        Some(expected) if expected != found => Err(ConstructError::new(
            ErrorKind::EnumerationMismatch {
                expected: scope.symbols.enumeration(expected).name().to_string(),
                found: scope.symbols.enumeration(found).name().to_string(),
            },
            token.span.clone(),
        )),
        _ => Ok(found),
    }
}

/// The enumeration of an enumerated symbol; always present once registered.
fn typed(enumeration: Option<EnumId>, token: &Token<'_>) -> Result<EnumId, ConstructError> {
    enumeration.ok_or_else(|| {
        ConstructError::new(
            ErrorKind::Unresolved {
                kind: NameKind::Enumeration,
                name: token.text.to_string(),
            },
            token.span.clone(),
        )
    })
}

impl EnumeratedExpr {
    /// Builds an expression of the `expected` enumeration, or of whatever
    /// enumeration the expression itself determines when `expected` is None.
    pub(crate) fn create(
        b: &mut Builder<'_>,
        scope: &Scope<'_>,
        expected: Option<EnumId>,
    ) -> Result<Self, ConstructError> {
        b.nested(|b| Self::create_tagged(b, scope, expected))
    }

    fn create_tagged(
        b: &mut Builder<'_>,
        scope: &Scope<'_>,
        expected: Option<EnumId>,
    ) -> Result<Self, ConstructError> {
        let tag = b.read_string()?;
        let (enumeration, kind) = match tag.tag() {
            Some('v') => {
                let element = b.read_string()?;
                let Some(enumeration) = expected else {
                    return Err(ConstructError::new(
                        ErrorKind::UntypedEnumeratedValue {
                            element: element.text.to_string(),
                        },
                        element.span,
                    ));
                };
                let domain = scope.symbols.enumeration(enumeration);
                let value = domain.value_of(element.text).ok_or_else(|| {
                    ConstructError::new(
                        ErrorKind::UnknownEnumElement {
                            enumeration: domain.name().to_string(),
                            element: element.text.to_string(),
                        },
                        element.span.clone(),
                    )
                })?;
                (enumeration, EnumeratedKind::Value(value))
            }
            Some('p') => {
                let name = b.read_string()?;
                let index = scope.option_parameter(Domain::Enumerated, &name)?;
                let found = scope.parameters.enumerated[index].enumeration;
                (
                    check_enumeration(scope, expected, found, &name)?,
                    EnumeratedKind::OptionParameter(index),
                )
            }
            Some('i') => {
                let name = b.read_string()?;
                let inputs = scope.symbols.enumerated_input_symbols();
                let symbol = resolve(inputs, NameKind::InputSymbol(Domain::Enumerated), &name)?;
                let found = typed(inputs[symbol].enumeration(), &name)?;
                let enumeration = check_enumeration(scope, expected, found, &name)?;
                let parameters =
                    ParameterAssignment::create(b, scope, &inputs[symbol].parameters, name.text)?;
                (enumeration, EnumeratedKind::InputSymbol { symbol, parameters })
            }
            Some('o') => {
                let name = b.read_string()?;
                let outputs = scope.symbols.enumerated_output_symbols();
                let symbol = resolve(outputs, NameKind::OutputSymbol(Domain::Enumerated), &name)?;
                let found = typed(outputs[symbol].enumeration(), &name)?;
                (
                    check_enumeration(scope, expected, found, &name)?,
                    EnumeratedKind::OutputSymbol(symbol),
                )
            }
            Some('q') => {
                let condition = super::BooleanExpr::create(b, scope)?;
                let then = EnumeratedExpr::create(b, scope, expected)?;
                let enumeration = then.enumeration;
                let otherwise = EnumeratedExpr::create(b, scope, Some(enumeration))?;
                (
                    enumeration,
                    EnumeratedKind::Conditional(Box::new(Conditional {
                        condition,
                        then,
                        otherwise,
                    })),
                )
            }
            _ => return Err(unknown_tag(TagPosition::Expression(Domain::Enumerated), &tag)),
        };
        tracing::trace!(tag = tag.text, "created enumerated expression");
        Ok(Self { enumeration, kind })
    }

    pub fn enumeration(&self) -> EnumId {
        self.enumeration
    }

    pub fn kind(&self) -> &EnumeratedKind {
        &self.kind
    }

    pub(crate) fn value(&self, cx: &ExecutionContext<'_>) -> i32 {
        match &self.kind {
            EnumeratedKind::Value(value) => *value,
            EnumeratedKind::OptionParameter(index) => {
                cx.option.parameters.enumerated[*index].get()
            }
            EnumeratedKind::InputSymbol { symbol, parameters } => read_input(
                &cx.symbols().enumerated_input_symbols()[*symbol],
                parameters,
                cx,
            ),
            EnumeratedKind::OutputSymbol(index) => {
                cx.symbols().enumerated_output_symbols()[*index].value()
            }
            EnumeratedKind::Conditional(conditional) => conditional.select(cx).value(cx),
        }
    }
}
