use std::cell::Cell;

use super::State;
use crate::behavior::BehaviorEntry;
use crate::build::{Builder, Scope, resolve};
use crate::diagnostics::Context;
use crate::errors::{ConstructError, ErrorKind, NameKind};
use crate::parameters::Parameters;
use crate::registry::NamedRegistry;
use crate::runtime::{ExecutionContext, Runtime};
use crate::symbols::Symbols;

/// A named state machine with formal parameters.
#[derive(Debug)]
pub struct OptionNode {
    name: String,
    pub(crate) parameters: Parameters,
    states: NamedRegistry<State>,
    initial_state: usize,
    active_state: Cell<usize>,
    /// State whose actions ran in the last executed cycle.
    executed_state: Cell<usize>,
    activated_at: Cell<u64>,
    time_of_execution: Cell<u64>,
    last_cycle: Cell<Option<u64>>,
}

/// States of an option body as read from the intermediate code.
pub(crate) struct OptionBody {
    pub(crate) states: NamedRegistry<State>,
    pub(crate) initial_state: usize,
}

impl OptionBody {
    /// Reads the state declarations and state bodies of one option.
    pub(crate) fn create(
        b: &mut Builder<'_>,
        symbols: &Symbols,
        behaviors: &NamedRegistry<BehaviorEntry>,
        options: &NamedRegistry<Parameters>,
        parameters: &Parameters,
    ) -> Result<Self, ConstructError> {
        let (count, _) = b.read_count()?;
        let mut declared = NamedRegistry::new();
        for _ in 0..count {
            let name = b.read_string()?;
            if declared.append(name.text, ()).is_err() {
                return Err(ConstructError::new(
                    ErrorKind::Duplicate {
                        kind: NameKind::State,
                        name: name.text.to_string(),
                    },
                    name.span,
                ));
            }
        }
        let initial = b.read_string()?;
        let initial_state = resolve(&declared, NameKind::State, &initial)?;

        let scope = Scope {
            symbols,
            behaviors,
            options,
            parameters,
            states: &declared,
        };
        let mut states = NamedRegistry::new();
        for expected in declared.names() {
            let name = b.read_string()?;
            if name.text != expected {
                return Err(ConstructError::new(
                    ErrorKind::OutOfOrder {
                        kind: NameKind::State,
                        expected: expected.to_string(),
                        found: name.text.to_string(),
                    },
                    name.span,
                ));
            }
            let state = State::create(b, &scope, &name).map_err(|e| {
                e.in_context(Context::InState {
                    name: name.text.to_string(),
                    span: name.span.clone(),
                })
            })?;
            states.append(name.text, state).map_err(|_| {
                ConstructError::new(
                    ErrorKind::Duplicate {
                        kind: NameKind::State,
                        name: name.text.to_string(),
                    },
                    name.span.clone(),
                )
            })?;
        }
        Ok(Self {
            states,
            initial_state,
        })
    }
}

impl OptionNode {
    pub(crate) fn new(name: &str, parameters: Parameters, body: OptionBody) -> Self {
        Self {
            name: name.to_string(),
            parameters,
            states: body.states,
            initial_state: body.initial_state,
            active_state: Cell::new(body.initial_state),
            executed_state: Cell::new(body.initial_state),
            activated_at: Cell::new(0),
            time_of_execution: Cell::new(0),
            last_cycle: Cell::new(None),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn states(&self) -> &NamedRegistry<State> {
        &self.states
    }

    pub fn initial_state(&self) -> &State {
        &self.states[self.initial_state]
    }

    /// The state that will run in the next cycle.
    pub fn active_state(&self) -> &State {
        &self.states[self.active_state.get()]
    }

    pub(crate) fn executed_state(&self) -> &State {
        &self.states[self.executed_state.get()]
    }

    /// Time since the option became active, as of its last execution.
    pub fn time_of_execution(&self) -> u64 {
        self.time_of_execution.get()
    }

    pub fn executed_in(&self, cycle: u64) -> bool {
        self.last_cycle.get() == Some(cycle)
    }

    /// Whether the option ran in `cycle` or the one before and now rests in
    /// a target state.
    pub(crate) fn reached_target_state(&self, cycle: u64) -> bool {
        let recent = matches!(self.last_cycle.get(), Some(last) if last + 1 >= cycle);
        recent && self.active_state().is_target_state()
    }

    /// Forgets all activation so the next execution starts over.
    pub(crate) fn forget(&self) {
        self.last_cycle.set(None);
    }

    /// Runs one cycle of the option and, through its actions, of every
    /// subsequent option.
    pub(crate) fn execute(&self, runtime: Runtime<'_>) {
        let previous = self.last_cycle.get();
        if previous == Some(runtime.cycle) {
            tracing::warn!(option = %self.name, "option executed twice in one cycle");
            return;
        }
        self.last_cycle.set(Some(runtime.cycle));

        if previous.is_none_or(|last| last + 1 != runtime.cycle) {
            tracing::trace!(option = %self.name, "option activated");
            self.active_state.set(self.initial_state);
            self.activated_at.set(runtime.now);
            self.initial_state().reset(runtime.now);
        }
        self.time_of_execution
            .set(runtime.now.saturating_sub(self.activated_at.get()));

        let active = self.active_state.get();
        let state = &self.states[active];
        self.executed_state.set(active);
        state.update_time(runtime.now);

        let cx = ExecutionContext {
            runtime,
            option: self,
            state,
        };
        state.execute_actions(&cx);

        let next = state.next_state(&cx);
        if next != active {
            let next_state = &self.states[next];
            tracing::trace!(
                option = %self.name,
                from = state.name(),
                to = next_state.name(),
                "state transition"
            );
            next_state.reset(runtime.now);
            self.active_state.set(next);
        }
    }
}
