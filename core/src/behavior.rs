//! Host implemented leaf behaviors.

use std::cell::{Cell, RefCell};
use std::fmt;

use crate::parameters::Parameters;

/// A leaf behavior implemented by the host.
///
/// Basic behaviors read their parameters from the slots registered with
/// [`EnvironmentBuilder`](crate::api::EnvironmentBuilder) and are executed at
/// most once per cycle, when a state of an active option invokes them.
pub trait BasicBehavior {
    fn execute(&mut self);

    /// Called right before [`execute`](Self::execute) when the invoking call
    /// site bound different parameter values than in its previous run.
    fn parameters_changed(&mut self) {}
}

/// Any closure can act as a basic behavior without parameters.
impl<F: FnMut()> BasicBehavior for F {
    fn execute(&mut self) {
        self()
    }
}

/// A registered basic behavior with its formal parameters.
pub struct BehaviorEntry {
    name: String,
    behavior: RefCell<Box<dyn BasicBehavior>>,
    pub(crate) parameters: Parameters,
    last_cycle: Cell<Option<u64>>,
}

impl BehaviorEntry {
    pub(crate) fn new(name: &str, behavior: Box<dyn BasicBehavior>) -> Self {
        Self {
            name: name.to_string(),
            behavior: RefCell::new(behavior),
            parameters: Parameters::new(),
            last_cycle: Cell::new(None),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn executed_in(&self, cycle: u64) -> bool {
        self.last_cycle.get() == Some(cycle)
    }

    pub(crate) fn run(&self, parameters_changed: bool, cycle: u64) {
        self.last_cycle.set(Some(cycle));
        let mut behavior = self.behavior.borrow_mut();
        if parameters_changed {
            tracing::trace!(behavior = %self.name, "basic behavior parameters changed");
            behavior.parameters_changed();
        }
        behavior.execute();
    }

    pub(crate) fn forget(&self) {
        self.last_cycle.set(None);
    }
}

impl fmt::Debug for BehaviorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorEntry")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}
