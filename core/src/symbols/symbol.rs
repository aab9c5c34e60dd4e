use std::cell::Cell;

use super::{EnumId, InputBinding, OutputBinding};
use crate::parameters::Parameters;

/// A named, readable value supplied by the host.
///
/// An input symbol may declare formal parameters. Call sites bind them with
/// a [`ParameterAssignment`](crate::parameters::ParameterAssignment) that
/// writes into the parameter slots before the value is read.
pub struct InputSymbol<T> {
    name: String,
    binding: InputBinding<T>,
    enumeration: Option<EnumId>,
    pub(crate) parameters: Parameters,
    parameters_changed: Option<Box<dyn Fn()>>,
}

impl<T: Copy> InputSymbol<T> {
    pub(crate) fn new(name: &str, binding: InputBinding<T>, enumeration: Option<EnumId>) -> Self {
        Self {
            name: name.to_string(),
            binding,
            enumeration,
            parameters: Parameters::new(),
            parameters_changed: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> T {
        self.binding.get()
    }

    /// The enumeration of an enumerated symbol.
    pub fn enumeration(&self) -> Option<EnumId> {
        self.enumeration
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub(crate) fn set_parameters_changed(&mut self, callback: Box<dyn Fn()>) {
        self.parameters_changed = Some(callback);
    }

    pub(crate) fn notify_parameters_changed(&self) {
        if let Some(callback) = &self.parameters_changed {
            tracing::trace!(symbol = %self.name, "input symbol parameters changed");
            callback();
        }
    }
}

/// A named, writable value owned by the host.
pub struct OutputSymbol<T> {
    name: String,
    binding: OutputBinding<T>,
    enumeration: Option<EnumId>,
    was_set: Cell<bool>,
}

impl<T: Copy> OutputSymbol<T> {
    pub(crate) fn new(name: &str, binding: OutputBinding<T>, enumeration: Option<EnumId>) -> Self {
        Self {
            name: name.to_string(),
            binding,
            enumeration,
            was_set: Cell::new(false),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> T {
        self.binding.get()
    }

    pub fn enumeration(&self) -> Option<EnumId> {
        self.enumeration
    }

    /// Whether an action assigned this symbol since the last reset.
    pub fn active_value_was_set(&self) -> bool {
        self.was_set.get()
    }

    pub(crate) fn set_value(&self, value: T) {
        self.binding.set(value);
        self.was_set.set(true);
    }

    pub(crate) fn reset(&self) {
        self.was_set.set(false);
    }
}
