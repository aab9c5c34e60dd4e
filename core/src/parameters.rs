//! Formal parameters and their call site bindings.

use std::cell::Cell;
use std::rc::Rc;

use crate::build::{Builder, Scope, resolve, unknown_tag};
use crate::diagnostics::Context;
use crate::errors::{ConstructError, ErrorKind, NameKind, RegistrationError, TagPosition};
use crate::expressions::{BooleanExpr, DecimalExpr, EnumeratedExpr};
use crate::reader::{Span, Token};
use crate::registry::NamedRegistry;
use crate::runtime::ExecutionContext;
use crate::symbols::{Domain, EnumId, Symbols};

/// An enumerated parameter slot and the enumeration it is typed against.
#[derive(Debug)]
pub struct EnumeratedParameter {
    pub(crate) enumeration: EnumId,
    pub(crate) slot: Rc<Cell<i32>>,
}

impl EnumeratedParameter {
    pub fn enumeration(&self) -> EnumId {
        self.enumeration
    }

    pub fn get(&self) -> i32 {
        self.slot.get()
    }
}

/// The formal parameters of an input symbol, basic behavior or option.
///
/// Each parameter is a shared slot: the engine writes bound values into it
/// and the owner reads them.
#[derive(Debug, Default)]
pub struct Parameters {
    pub(crate) decimal: NamedRegistry<Rc<Cell<f64>>>,
    pub(crate) boolean: NamedRegistry<Rc<Cell<bool>>>,
    pub(crate) enumerated: NamedRegistry<EnumeratedParameter>,
}

/// Current value of one parameter slot.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    Decimal(f64),
    Boolean(bool),
    Enumerated { value: i32, element: Option<String> },
}

fn duplicate_parameter(domain: Domain, owner: &str, name: &str) -> RegistrationError {
    RegistrationError::DuplicateParameter {
        kind: NameKind::Parameter(domain),
        owner: owner.to_string(),
        parameter: name.to_string(),
    }
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn register_decimal(
        &mut self,
        owner: &str,
        name: &str,
        slot: Rc<Cell<f64>>,
    ) -> Result<(), RegistrationError> {
        self.decimal
            .append(name, slot)
            .map_err(|_| duplicate_parameter(Domain::Decimal, owner, name))?;
        Ok(())
    }

    pub(crate) fn register_boolean(
        &mut self,
        owner: &str,
        name: &str,
        slot: Rc<Cell<bool>>,
    ) -> Result<(), RegistrationError> {
        self.boolean
            .append(name, slot)
            .map_err(|_| duplicate_parameter(Domain::Boolean, owner, name))?;
        Ok(())
    }

    pub(crate) fn register_enumerated(
        &mut self,
        owner: &str,
        name: &str,
        enumeration: EnumId,
        slot: Rc<Cell<i32>>,
    ) -> Result<(), RegistrationError> {
        self.enumerated
            .append(name, EnumeratedParameter { enumeration, slot })
            .map_err(|_| duplicate_parameter(Domain::Enumerated, owner, name))?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.decimal.len() + self.boolean.len() + self.enumerated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn decimal(&self) -> &NamedRegistry<Rc<Cell<f64>>> {
        &self.decimal
    }

    pub fn boolean(&self) -> &NamedRegistry<Rc<Cell<bool>>> {
        &self.boolean
    }

    pub fn enumerated(&self) -> &NamedRegistry<EnumeratedParameter> {
        &self.enumerated
    }

    /// Names and current values, decimal first, then boolean, then enumerated.
    pub fn values(&self, symbols: &Symbols) -> Vec<(String, ParameterValue)> {
        let decimal = self
            .decimal
            .iter()
            .map(|(name, slot)| (name.to_string(), ParameterValue::Decimal(slot.get())));
        let boolean = self
            .boolean
            .iter()
            .map(|(name, slot)| (name.to_string(), ParameterValue::Boolean(slot.get())));
        let enumerated = self.enumerated.iter().map(|(name, parameter)| {
            let value = parameter.get();
            let element = symbols
                .element_name(parameter.enumeration, value)
                .map(str::to_string);
            (name.to_string(), ParameterValue::Enumerated { value, element })
        });
        decimal.chain(boolean).chain(enumerated).collect()
    }
}

#[derive(Debug)]
struct Binding<T: Copy, E> {
    index: usize,
    expression: E,
    last: Cell<Option<T>>,
}

impl<T: Copy, E> Binding<T, E> {
    fn new(index: usize, expression: E) -> Self {
        Self {
            index,
            expression,
            last: Cell::new(None),
        }
    }
}

/// Expressions bound to the formal parameters of one call site.
#[derive(Debug, Default)]
pub struct ParameterAssignment {
    decimal: Vec<Binding<f64, DecimalExpr>>,
    boolean: Vec<Binding<bool, BooleanExpr>>,
    enumerated: Vec<Binding<i32, EnumeratedExpr>>,
}

impl ParameterAssignment {
    /// Reads a binding for every formal parameter of `target`.
    pub(crate) fn create(
        b: &mut Builder<'_>,
        scope: &Scope<'_>,
        target: &Parameters,
        target_name: &str,
    ) -> Result<Self, ConstructError> {
        let (count, count_span) = b.read_count()?;
        let mut assignment = ParameterAssignment::default();
        let mut bound: Vec<(Domain, usize)> = Vec::new();

        for _ in 0..count {
            let tag = b.read_string()?;
            let name = b.read_string()?;
            let in_parameter = |e: ConstructError| {
                e.in_context(Context::InParameter {
                    name: name.text.to_string(),
                    span: name.span.clone(),
                })
            };
            let domain = match tag.tag() {
                Some('d') => Domain::Decimal,
                Some('b') => Domain::Boolean,
                Some('e') => Domain::Enumerated,
                _ => return Err(unknown_tag(TagPosition::ParameterBinding, &tag)),
            };
            let kind = NameKind::Parameter(domain);
            let index = match domain {
                Domain::Decimal => resolve(&target.decimal, kind, &name)?,
                Domain::Boolean => resolve(&target.boolean, kind, &name)?,
                Domain::Enumerated => resolve(&target.enumerated, kind, &name)?,
            };
            if bound.contains(&(domain, index)) {
                return Err(ConstructError::new(
                    ErrorKind::DuplicateBinding {
                        name: name.text.to_string(),
                        target: target_name.to_string(),
                    },
                    name.span.clone(),
                ));
            }
            bound.push((domain, index));

            match domain {
                Domain::Decimal => {
                    let expression = DecimalExpr::create(b, scope).map_err(in_parameter)?;
                    assignment.decimal.push(Binding::new(index, expression));
                }
                Domain::Boolean => {
                    let expression = BooleanExpr::create(b, scope).map_err(in_parameter)?;
                    assignment.boolean.push(Binding::new(index, expression));
                }
                Domain::Enumerated => {
                    let enumeration = target.enumerated[index].enumeration;
                    let expression = EnumeratedExpr::create(b, scope, Some(enumeration))
                        .map_err(in_parameter)?;
                    assignment.enumerated.push(Binding::new(index, expression));
                }
            }
        }

        check_all_bound(&target.decimal, Domain::Decimal, &bound, target_name, &count_span)?;
        check_all_bound(&target.boolean, Domain::Boolean, &bound, target_name, &count_span)?;
        check_all_bound(
            &target.enumerated,
            Domain::Enumerated,
            &bound,
            target_name,
            &count_span,
        )?;
        Ok(assignment)
    }

    /// Evaluates every bound expression and writes the values into the
    /// parameter slots of `target`.
    ///
    /// Returns true if any value differs from the one written by the previous
    /// call. The first call always reports a change.
    pub(crate) fn set(&self, target: &Parameters, cx: &ExecutionContext<'_>) -> bool {
        let mut changed = false;
        for binding in &self.decimal {
            let value = binding.expression.value(cx);
            let previous = binding.last.replace(Some(value));
            changed |= previous.map(f64::to_bits) != Some(value.to_bits());
            target.decimal[binding.index].set(value);
        }
        for binding in &self.boolean {
            let value = binding.expression.value(cx);
            changed |= binding.last.replace(Some(value)) != Some(value);
            target.boolean[binding.index].set(value);
        }
        for binding in &self.enumerated {
            let value = binding.expression.value(cx);
            changed |= binding.last.replace(Some(value)) != Some(value);
            target.enumerated[binding.index].slot.set(value);
        }
        changed
    }

    pub fn is_empty(&self) -> bool {
        self.decimal.is_empty() && self.boolean.is_empty() && self.enumerated.is_empty()
    }
}

fn check_all_bound<T>(
    formal: &NamedRegistry<T>,
    domain: Domain,
    bound: &[(Domain, usize)],
    target_name: &str,
    span: &Span,
) -> Result<(), ConstructError> {
    match formal
        .names()
        .enumerate()
        .find(|(index, _)| !bound.contains(&(domain, *index)))
    {
        Some((_, name)) => Err(ConstructError::new(
            ErrorKind::UnboundParameter {
                name: name.to_string(),
                target: target_name.to_string(),
            },
            span.clone(),
        )),
        None => Ok(()),
    }
}

/// Reads the formal parameter declarations of an option header.
pub(crate) fn declare(
    b: &mut Builder<'_>,
    symbols: &Symbols,
    owner: &Token<'_>,
) -> Result<Parameters, ConstructError> {
    let (count, _) = b.read_count()?;
    let mut parameters = Parameters::new();
    for _ in 0..count {
        let tag = b.read_string()?;
        let (domain, registered) = match tag.tag() {
            Some('d') => {
                let name = b.read_string()?;
                let registered = parameters.register_decimal(
                    owner.text,
                    name.text,
                    Rc::new(Cell::new(0.0)),
                );
                (Domain::Decimal, registered.map_err(|_| name))
            }
            Some('b') => {
                let name = b.read_string()?;
                let registered = parameters.register_boolean(
                    owner.text,
                    name.text,
                    Rc::new(Cell::new(false)),
                );
                (Domain::Boolean, registered.map_err(|_| name))
            }
            Some('e') => {
                let enumeration = b.read_string()?;
                let id = symbols
                    .enumerations()
                    .position(enumeration.text)
                    .map(EnumId)
                    .ok_or_else(|| {
                        ConstructError::new(
                            ErrorKind::Unresolved {
                                kind: NameKind::Enumeration,
                                name: enumeration.text.to_string(),
                            },
                            enumeration.span.clone(),
                        )
                    })?;
                let name = b.read_string()?;
                let registered = parameters.register_enumerated(
                    owner.text,
                    name.text,
                    id,
                    Rc::new(Cell::new(0)),
                );
                (Domain::Enumerated, registered.map_err(|_| name))
            }
            _ => return Err(unknown_tag(TagPosition::ParameterDeclaration, &tag)),
        };
        if let Err(name) = registered {
            return Err(ConstructError::new(
                ErrorKind::Duplicate {
                    kind: NameKind::OptionParameter(domain),
                    name: name.text.to_string(),
                },
                name.span,
            ));
        }
    }
    Ok(parameters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::EngineOptions;
    use crate::fixture::Fixture;
    use pretty_assertions::assert_eq;

    fn kick_parameters(symbols: &mut Symbols) -> (Parameters, Rc<Cell<f64>>) {
        let distance = Rc::new(Cell::new(0.0));
        let mut parameters = Parameters::new();
        parameters
            .register_decimal("kick", "distance", distance.clone())
            .unwrap();
        parameters
            .register_boolean("kick", "strong", Rc::new(Cell::new(false)))
            .unwrap();
        symbols.register_enum_element("foot", "left", 0).unwrap();
        symbols.register_enum_element("foot", "right", 1).unwrap();
        parameters
            .register_enumerated("kick", "foot", EnumId(0), Rc::new(Cell::new(0)))
            .unwrap();
        (parameters, distance)
    }

    fn assign(
        fixture: &Fixture,
        target: &Parameters,
        source: &str,
    ) -> Result<ParameterAssignment, ConstructError> {
        let mut b = Builder::new(source, &EngineOptions::default());
        let assignment = ParameterAssignment::create(&mut b, &fixture.scope(), target, "kick")?;
        b.expect_end()?;
        Ok(assignment)
    }

    #[test]
    fn test_set_reports_changes() {
        let mut symbols = Symbols::new();
        let (target, distance) = kick_parameters(&mut symbols);
        let fixture = Fixture::new(symbols);
        let assignment =
            assign(&fixture, &target, "3 d distance v 5 b strong v true e foot v right").unwrap();

        assert!(assignment.set(&target, &fixture.context()));
        assert_eq!(distance.get(), 5.0);
        assert!(target.boolean[0].get());
        assert_eq!(target.enumerated[0].get(), 1);

        assert!(!assignment.set(&target, &fixture.context()));
        assert!(format!("{:?}", assignment).contains("last: Cell { value: Some(5.0) }"));
    }

    #[test]
    fn test_set_follows_bound_expression() {
        let mut symbols = Symbols::new();
        let (target, distance) = kick_parameters(&mut symbols);
        let ball = Rc::new(Cell::new(1.0));
        symbols
            .register_decimal_input_symbol("ball.distance", ball.clone())
            .unwrap();
        let fixture = Fixture::new(symbols);
        let assignment = assign(
            &fixture,
            &target,
            "3 b strong v false e foot v left d distance i ball.distance 0",
        )
        .unwrap();

        assert!(assignment.set(&target, &fixture.context()));
        assert!(!assignment.set(&target, &fixture.context()));
        ball.set(2.0);
        assert!(assignment.set(&target, &fixture.context()));
        assert_eq!(distance.get(), 2.0);
    }

    #[test]
    fn test_every_parameter_must_be_bound() {
        let mut symbols = Symbols::new();
        let (target, _) = kick_parameters(&mut symbols);
        let fixture = Fixture::new(symbols);
        let err = assign(&fixture, &target, "2 d distance v 5 e foot v left").unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::UnboundParameter {
                name: "strong".into(),
                target: "kick".into(),
            }
        );
    }

    #[test]
    fn test_unknown_parameter() {
        let mut symbols = Symbols::new();
        let (target, _) = kick_parameters(&mut symbols);
        let fixture = Fixture::new(symbols);
        let err = assign(&fixture, &target, "1 d angle v 5").unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::Unresolved {
                kind: NameKind::Parameter(Domain::Decimal),
                name: "angle".into(),
            }
        );
    }

    #[test]
    fn test_duplicate_binding() {
        let mut symbols = Symbols::new();
        let (target, _) = kick_parameters(&mut symbols);
        let fixture = Fixture::new(symbols);
        let err = assign(&fixture, &target, "2 d distance v 5 d distance v 6").unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::DuplicateBinding {
                name: "distance".into(),
                target: "kick".into(),
            }
        );
    }

    #[test]
    fn test_binding_error_names_parameter() {
        let mut symbols = Symbols::new();
        let (target, _) = kick_parameters(&mut symbols);
        let fixture = Fixture::new(symbols);
        let err = assign(&fixture, &target, "1 e foot v middle").unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::UnknownEnumElement {
                enumeration: "foot".into(),
                element: "middle".into(),
            }
        );
        assert_eq!(
            err.context[0].to_related_info().message,
            "in parameter `foot`"
        );
    }

    #[test]
    fn test_declare_option_parameters() {
        let mut symbols = Symbols::new();
        symbols.register_enum_element("foot", "left", 0).unwrap();
        let mut b = Builder::new("approach 3 d speed b careful e foot foot", &EngineOptions::default());
        let owner = b.read_string().unwrap();
        let parameters = declare(&mut b, &symbols, &owner).unwrap();
        b.expect_end().unwrap();

        assert_eq!(parameters.len(), 3);
        assert_eq!(
            parameters.values(&symbols),
            vec![
                ("speed".to_string(), ParameterValue::Decimal(0.0)),
                ("careful".to_string(), ParameterValue::Boolean(false)),
                (
                    "foot".to_string(),
                    ParameterValue::Enumerated {
                        value: 0,
                        element: Some("left".to_string()),
                    }
                ),
            ]
        );
    }

    #[test]
    fn test_declare_rejects_unknown_enumeration_and_duplicates() {
        let symbols = Symbols::new();
        let mut b = Builder::new("approach 1 e side foot", &EngineOptions::default());
        let owner = b.read_string().unwrap();
        let err = declare(&mut b, &symbols, &owner).unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::Unresolved {
                kind: NameKind::Enumeration,
                name: "side".into(),
            }
        );

        let mut b = Builder::new("approach 2 d speed d speed", &EngineOptions::default());
        let owner = b.read_string().unwrap();
        let err = declare(&mut b, &symbols, &owner).unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::Duplicate {
                kind: NameKind::OptionParameter(Domain::Decimal),
                name: "speed".into(),
            }
        );
    }
}
