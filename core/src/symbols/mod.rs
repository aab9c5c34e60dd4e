//! The symbol table: enumerations plus input and output symbols per domain.

mod binding;
mod symbol;

use core::fmt;
use std::cell::Cell;
use std::rc::Rc;

pub use binding::{InputBinding, OutputBinding};
pub use symbol::{InputSymbol, OutputSymbol};

use crate::errors::{NameKind, RegistrationError};
use crate::parameters::Parameters;
use crate::registry::NamedRegistry;

/// The three value domains of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Decimal,
    Boolean,
    Enumerated,
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Decimal => write!(f, "decimal"),
            Domain::Boolean => write!(f, "boolean"),
            Domain::Enumerated => write!(f, "enumerated"),
        }
    }
}

/// Position of an [`Enumeration`] inside [`Symbols`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumId(pub(crate) usize);

/// A named closed set of integer valued elements.
pub struct Enumeration {
    name: String,
    elements: NamedRegistry<i32>,
}

impl Enumeration {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            elements: NamedRegistry::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_of(&self, element: &str) -> Option<i32> {
        self.elements.get(element).copied()
    }

    /// The first element registered with `value`.
    pub fn element_name(&self, value: i32) -> Option<&str> {
        self.elements
            .iter()
            .find(|(_, v)| **v == value)
            .map(|(name, _)| name)
    }

    pub fn elements(&self) -> impl Iterator<Item = (&str, i32)> {
        self.elements.iter().map(|(name, value)| (name, *value))
    }
}

#[derive(Default)]
pub struct Symbols {
    enumerations: NamedRegistry<Enumeration>,
    decimal_inputs: NamedRegistry<InputSymbol<f64>>,
    boolean_inputs: NamedRegistry<InputSymbol<bool>>,
    enumerated_inputs: NamedRegistry<InputSymbol<i32>>,
    decimal_outputs: NamedRegistry<OutputSymbol<f64>>,
    boolean_outputs: NamedRegistry<OutputSymbol<bool>>,
    enumerated_outputs: NamedRegistry<OutputSymbol<i32>>,
}

pub(crate) fn duplicate(kind: NameKind, name: &str) -> RegistrationError {
    RegistrationError::Duplicate {
        kind,
        name: name.to_string(),
    }
}

pub(crate) fn unknown(kind: NameKind, name: &str) -> RegistrationError {
    RegistrationError::Unknown {
        kind,
        name: name.to_string(),
    }
}

impl Symbols {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds an enumeration, creating an empty one on first mention.
    pub(crate) fn enumeration_or_insert(&mut self, name: &str) -> EnumId {
        EnumId(self.enumerations.position_or_insert_with(name, || {
            tracing::debug!(enumeration = name, "created enumeration");
            Enumeration::new(name)
        }))
    }

    pub fn register_enum_element(
        &mut self,
        enumeration: &str,
        element: &str,
        value: i32,
    ) -> Result<(), RegistrationError> {
        let id = self.enumeration_or_insert(enumeration);
        let enumeration = &mut self.enumerations[id.0];
        enumeration
            .elements
            .append(element, value)
            .map_err(|_| RegistrationError::DuplicateEnumElement {
                enumeration: enumeration.name.clone(),
                element: element.to_string(),
            })?;
        Ok(())
    }

    // ---- input symbols ------------------------------------------------------

    pub fn register_decimal_input_symbol(
        &mut self,
        name: &str,
        binding: impl Into<InputBinding<f64>>,
    ) -> Result<(), RegistrationError> {
        self.decimal_inputs
            .append(name, InputSymbol::new(name, binding.into(), None))
            .map_err(|_| duplicate(NameKind::InputSymbol(Domain::Decimal), name))?;
        tracing::debug!(symbol = name, "registered decimal input symbol");
        Ok(())
    }

    pub fn register_boolean_input_symbol(
        &mut self,
        name: &str,
        binding: impl Into<InputBinding<bool>>,
    ) -> Result<(), RegistrationError> {
        self.boolean_inputs
            .append(name, InputSymbol::new(name, binding.into(), None))
            .map_err(|_| duplicate(NameKind::InputSymbol(Domain::Boolean), name))?;
        tracing::debug!(symbol = name, "registered boolean input symbol");
        Ok(())
    }

    pub fn register_enumerated_input_symbol(
        &mut self,
        name: &str,
        enumeration: &str,
        binding: impl Into<InputBinding<i32>>,
    ) -> Result<(), RegistrationError> {
        if self.enumerated_inputs.exists(name) {
            return Err(duplicate(NameKind::InputSymbol(Domain::Enumerated), name));
        }
        let id = self.enumeration_or_insert(enumeration);
        self.enumerated_inputs
            .append(name, InputSymbol::new(name, binding.into(), Some(id)))
            .map_err(|_| duplicate(NameKind::InputSymbol(Domain::Enumerated), name))?;
        tracing::debug!(symbol = name, enumeration, "registered enumerated input symbol");
        Ok(())
    }

    /// Registers the callback run when a call site changes any parameter of
    /// the decimal input symbol `name`.
    pub fn register_decimal_input_symbol_parameters_changed(
        &mut self,
        name: &str,
        callback: impl Fn() + 'static,
    ) -> Result<(), RegistrationError> {
        self.decimal_inputs
            .get_mut(name)
            .ok_or_else(|| unknown(NameKind::InputSymbol(Domain::Decimal), name))?
            .set_parameters_changed(Box::new(callback));
        Ok(())
    }

    pub fn register_boolean_input_symbol_parameters_changed(
        &mut self,
        name: &str,
        callback: impl Fn() + 'static,
    ) -> Result<(), RegistrationError> {
        self.boolean_inputs
            .get_mut(name)
            .ok_or_else(|| unknown(NameKind::InputSymbol(Domain::Boolean), name))?
            .set_parameters_changed(Box::new(callback));
        Ok(())
    }

    pub fn register_enumerated_input_symbol_parameters_changed(
        &mut self,
        name: &str,
        callback: impl Fn() + 'static,
    ) -> Result<(), RegistrationError> {
        self.enumerated_inputs
            .get_mut(name)
            .ok_or_else(|| unknown(NameKind::InputSymbol(Domain::Enumerated), name))?
            .set_parameters_changed(Box::new(callback));
        Ok(())
    }

    fn input_parameters_mut(
        &mut self,
        domain: Domain,
        symbol: &str,
    ) -> Result<&mut Parameters, RegistrationError> {
        let parameters = match domain {
            Domain::Decimal => self.decimal_inputs.get_mut(symbol).map(|s| &mut s.parameters),
            Domain::Boolean => self.boolean_inputs.get_mut(symbol).map(|s| &mut s.parameters),
            Domain::Enumerated => self
                .enumerated_inputs
                .get_mut(symbol)
                .map(|s| &mut s.parameters),
        };
        parameters.ok_or_else(|| unknown(NameKind::InputSymbol(domain), symbol))
    }

    fn add_decimal_parameter(
        &mut self,
        domain: Domain,
        symbol: &str,
        name: &str,
        slot: Rc<Cell<f64>>,
    ) -> Result<(), RegistrationError> {
        self.input_parameters_mut(domain, symbol)?
            .register_decimal(symbol, name, slot)
    }

    fn add_boolean_parameter(
        &mut self,
        domain: Domain,
        symbol: &str,
        name: &str,
        slot: Rc<Cell<bool>>,
    ) -> Result<(), RegistrationError> {
        self.input_parameters_mut(domain, symbol)?
            .register_boolean(symbol, name, slot)
    }

    fn add_enumerated_parameter(
        &mut self,
        domain: Domain,
        symbol: &str,
        name: &str,
        enumeration: &str,
        slot: Rc<Cell<i32>>,
    ) -> Result<(), RegistrationError> {
        // Validate the symbol before implicitly creating the enumeration.
        self.input_parameters_mut(domain, symbol)?;
        let id = self.enumeration_or_insert(enumeration);
        self.input_parameters_mut(domain, symbol)?
            .register_enumerated(symbol, name, id, slot)
    }

    pub fn register_decimal_input_symbol_decimal_parameter(
        &mut self,
        symbol: &str,
        name: &str,
        slot: Rc<Cell<f64>>,
    ) -> Result<(), RegistrationError> {
        self.add_decimal_parameter(Domain::Decimal, symbol, name, slot)
    }

    pub fn register_decimal_input_symbol_boolean_parameter(
        &mut self,
        symbol: &str,
        name: &str,
        slot: Rc<Cell<bool>>,
    ) -> Result<(), RegistrationError> {
        self.add_boolean_parameter(Domain::Decimal, symbol, name, slot)
    }

    pub fn register_decimal_input_symbol_enumerated_parameter(
        &mut self,
        symbol: &str,
        name: &str,
        enumeration: &str,
        slot: Rc<Cell<i32>>,
    ) -> Result<(), RegistrationError> {
        self.add_enumerated_parameter(Domain::Decimal, symbol, name, enumeration, slot)
    }

    pub fn register_boolean_input_symbol_decimal_parameter(
        &mut self,
        symbol: &str,
        name: &str,
        slot: Rc<Cell<f64>>,
    ) -> Result<(), RegistrationError> {
        self.add_decimal_parameter(Domain::Boolean, symbol, name, slot)
    }

    pub fn register_boolean_input_symbol_boolean_parameter(
        &mut self,
        symbol: &str,
        name: &str,
        slot: Rc<Cell<bool>>,
    ) -> Result<(), RegistrationError> {
        self.add_boolean_parameter(Domain::Boolean, symbol, name, slot)
    }

    pub fn register_boolean_input_symbol_enumerated_parameter(
        &mut self,
        symbol: &str,
        name: &str,
        enumeration: &str,
        slot: Rc<Cell<i32>>,
    ) -> Result<(), RegistrationError> {
        self.add_enumerated_parameter(Domain::Boolean, symbol, name, enumeration, slot)
    }

    pub fn register_enumerated_input_symbol_decimal_parameter(
        &mut self,
        symbol: &str,
        name: &str,
        slot: Rc<Cell<f64>>,
    ) -> Result<(), RegistrationError> {
        self.add_decimal_parameter(Domain::Enumerated, symbol, name, slot)
    }

    pub fn register_enumerated_input_symbol_boolean_parameter(
        &mut self,
        symbol: &str,
        name: &str,
        slot: Rc<Cell<bool>>,
    ) -> Result<(), RegistrationError> {
        self.add_boolean_parameter(Domain::Enumerated, symbol, name, slot)
    }

    pub fn register_enumerated_input_symbol_enumerated_parameter(
        &mut self,
        symbol: &str,
        name: &str,
        enumeration: &str,
        slot: Rc<Cell<i32>>,
    ) -> Result<(), RegistrationError> {
        self.add_enumerated_parameter(Domain::Enumerated, symbol, name, enumeration, slot)
    }

    // ---- output symbols -----------------------------------------------------

    pub fn register_decimal_output_symbol(
        &mut self,
        name: &str,
        binding: impl Into<OutputBinding<f64>>,
    ) -> Result<(), RegistrationError> {
        self.decimal_outputs
            .append(name, OutputSymbol::new(name, binding.into(), None))
            .map_err(|_| duplicate(NameKind::OutputSymbol(Domain::Decimal), name))?;
        tracing::debug!(symbol = name, "registered decimal output symbol");
        Ok(())
    }

    pub fn register_boolean_output_symbol(
        &mut self,
        name: &str,
        binding: impl Into<OutputBinding<bool>>,
    ) -> Result<(), RegistrationError> {
        self.boolean_outputs
            .append(name, OutputSymbol::new(name, binding.into(), None))
            .map_err(|_| duplicate(NameKind::OutputSymbol(Domain::Boolean), name))?;
        tracing::debug!(symbol = name, "registered boolean output symbol");
        Ok(())
    }

    pub fn register_enumerated_output_symbol(
        &mut self,
        name: &str,
        enumeration: &str,
        binding: impl Into<OutputBinding<i32>>,
    ) -> Result<(), RegistrationError> {
        if self.enumerated_outputs.exists(name) {
            return Err(duplicate(NameKind::OutputSymbol(Domain::Enumerated), name));
        }
        let id = self.enumeration_or_insert(enumeration);
        self.enumerated_outputs
            .append(name, OutputSymbol::new(name, binding.into(), Some(id)))
            .map_err(|_| duplicate(NameKind::OutputSymbol(Domain::Enumerated), name))?;
        tracing::debug!(symbol = name, enumeration, "registered enumerated output symbol");
        Ok(())
    }

    /// Clears the was-set flag of every output symbol.
    pub fn reset_output_symbols(&self) {
        self.decimal_outputs.values().for_each(OutputSymbol::reset);
        self.boolean_outputs.values().for_each(OutputSymbol::reset);
        self.enumerated_outputs.values().for_each(OutputSymbol::reset);
    }

    // ---- lookup -------------------------------------------------------------

    pub fn enumerations(&self) -> &NamedRegistry<Enumeration> {
        &self.enumerations
    }

    pub fn enumeration(&self, id: EnumId) -> &Enumeration {
        &self.enumerations[id.0]
    }

    pub fn decimal_input_symbols(&self) -> &NamedRegistry<InputSymbol<f64>> {
        &self.decimal_inputs
    }

    pub fn boolean_input_symbols(&self) -> &NamedRegistry<InputSymbol<bool>> {
        &self.boolean_inputs
    }

    pub fn enumerated_input_symbols(&self) -> &NamedRegistry<InputSymbol<i32>> {
        &self.enumerated_inputs
    }

    pub fn decimal_output_symbols(&self) -> &NamedRegistry<OutputSymbol<f64>> {
        &self.decimal_outputs
    }

    pub fn boolean_output_symbols(&self) -> &NamedRegistry<OutputSymbol<bool>> {
        &self.boolean_outputs
    }

    pub fn enumerated_output_symbols(&self) -> &NamedRegistry<OutputSymbol<i32>> {
        &self.enumerated_outputs
    }

    pub fn decimal_output_value(&self, name: &str) -> Option<f64> {
        self.decimal_outputs.get(name).map(OutputSymbol::value)
    }

    pub fn boolean_output_value(&self, name: &str) -> Option<bool> {
        self.boolean_outputs.get(name).map(OutputSymbol::value)
    }

    pub fn enumerated_output_value(&self, name: &str) -> Option<i32> {
        self.enumerated_outputs.get(name).map(OutputSymbol::value)
    }

    /// The element name of an enumerated output's current value.
    pub fn enumerated_output_element(&self, name: &str) -> Option<&str> {
        let symbol = self.enumerated_outputs.get(name)?;
        let enumeration = self.enumeration(symbol.enumeration()?);
        enumeration.element_name(symbol.value())
    }

    pub fn decimal_output_was_set(&self, name: &str) -> Option<bool> {
        self.decimal_outputs
            .get(name)
            .map(OutputSymbol::active_value_was_set)
    }

    pub fn boolean_output_was_set(&self, name: &str) -> Option<bool> {
        self.boolean_outputs
            .get(name)
            .map(OutputSymbol::active_value_was_set)
    }

    pub fn enumerated_output_was_set(&self, name: &str) -> Option<bool> {
        self.enumerated_outputs
            .get(name)
            .map(OutputSymbol::active_value_was_set)
    }

    pub(crate) fn element_name(&self, enumeration: EnumId, value: i32) -> Option<&str> {
        self.enumeration(enumeration).element_name(value)
    }
}
