//! Environment builder for registering the host bindings.

use std::cell::Cell;
use std::rc::Rc;

use crate::behavior::{BasicBehavior, BehaviorEntry};
use crate::errors::{NameKind, RegistrationError};
use crate::parameters::Parameters;
use crate::registry::NamedRegistry;
use crate::symbols::Symbols;

/// Builder for the symbols and basic behaviors an option graph can use.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use xabsl_core::api::{Clock, Engine, EngineOptions};
///
/// let strength = Rc::new(Cell::new(0.0));
/// let engine = Engine::new(EngineOptions::default(), Clock::system(), |env| {
///     env.symbols().register_enum_element("role", "striker", 0)?;
///     env.register_basic_behavior("kick", || println!("kick"))?;
///     env.register_basic_behavior_decimal_parameter("kick", "strength", strength.clone())?;
///     Ok(())
/// })
/// .unwrap();
/// assert!(engine.environment().behaviors().exists("kick"));
/// ```
#[derive(Default)]
pub struct EnvironmentBuilder {
    symbols: Symbols,
    behaviors: NamedRegistry<BehaviorEntry>,
}

impl EnvironmentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The symbol table, for registering symbols and enumerations.
    pub fn symbols(&mut self) -> &mut Symbols {
        &mut self.symbols
    }

    pub fn register_basic_behavior(
        &mut self,
        name: &str,
        behavior: impl BasicBehavior + 'static,
    ) -> Result<(), RegistrationError> {
        self.behaviors
            .append(name, BehaviorEntry::new(name, Box::new(behavior)))
            .map_err(|_| RegistrationError::Duplicate {
                kind: NameKind::BasicBehavior,
                name: name.to_string(),
            })?;
        tracing::debug!(behavior = name, "registered basic behavior");
        Ok(())
    }

    fn behavior_parameters_mut(
        &mut self,
        behavior: &str,
    ) -> Result<&mut Parameters, RegistrationError> {
        self.behaviors
            .get_mut(behavior)
            .map(|entry| &mut entry.parameters)
            .ok_or_else(|| RegistrationError::Unknown {
                kind: NameKind::BasicBehavior,
                name: behavior.to_string(),
            })
    }

    pub fn register_basic_behavior_decimal_parameter(
        &mut self,
        behavior: &str,
        name: &str,
        slot: Rc<Cell<f64>>,
    ) -> Result<(), RegistrationError> {
        self.behavior_parameters_mut(behavior)?
            .register_decimal(behavior, name, slot)
    }

    pub fn register_basic_behavior_boolean_parameter(
        &mut self,
        behavior: &str,
        name: &str,
        slot: Rc<Cell<bool>>,
    ) -> Result<(), RegistrationError> {
        self.behavior_parameters_mut(behavior)?
            .register_boolean(behavior, name, slot)
    }

    pub fn register_basic_behavior_enumerated_parameter(
        &mut self,
        behavior: &str,
        name: &str,
        enumeration: &str,
        slot: Rc<Cell<i32>>,
    ) -> Result<(), RegistrationError> {
        self.behavior_parameters_mut(behavior)?;
        let id = self.symbols.enumeration_or_insert(enumeration);
        self.behavior_parameters_mut(behavior)?
            .register_enumerated(behavior, name, id, slot)
    }

    pub(crate) fn build(self) -> Environment {
        Environment {
            symbols: self.symbols,
            behaviors: self.behaviors,
        }
    }
}

/// The registered host bindings.
pub struct Environment {
    pub(crate) symbols: Symbols,
    pub(crate) behaviors: NamedRegistry<BehaviorEntry>,
}

impl Environment {
    pub fn symbols(&self) -> &Symbols {
        &self.symbols
    }

    pub fn behaviors(&self) -> &NamedRegistry<BehaviorEntry> {
        &self.behaviors
    }
}
