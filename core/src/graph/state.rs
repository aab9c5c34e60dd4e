use std::cell::Cell;

use super::{Action, Statement};
use crate::build::{Builder, Scope};
use crate::errors::{ConstructError, ErrorKind};
use crate::reader::Token;
use crate::runtime::ExecutionContext;

/// A node of an option's state machine.
#[derive(Debug)]
pub struct State {
    name: String,
    target: bool,
    actions: Vec<Action>,
    decision_tree: Statement,
    activated_at: Cell<u64>,
    time_of_execution: Cell<u64>,
}

impl State {
    pub(crate) fn new(name: &str, target: bool, actions: Vec<Action>, decision_tree: Statement) -> Self {
        Self {
            name: name.to_string(),
            target,
            actions,
            decision_tree,
            activated_at: Cell::new(0),
            time_of_execution: Cell::new(0),
        }
    }

    /// Reads the body of the state whose name was just read.
    pub(crate) fn create(
        b: &mut Builder<'_>,
        scope: &Scope<'_>,
        name: &Token<'_>,
    ) -> Result<Self, ConstructError> {
        let flag = b.read_string()?;
        let target = match flag.text {
            "0" => false,
            "1" => true,
            found => {
                return Err(ConstructError::new(
                    ErrorKind::InvalidTargetFlag {
                        found: found.to_string(),
                    },
                    flag.span,
                ));
            }
        };

        let (count, _) = b.read_count()?;
        let mut actions = Vec::new();
        for _ in 0..count {
            actions.push(Action::create(b, scope)?);
        }
        let decision_tree = Statement::create(b, scope)?;

        tracing::debug!(state = name.text, target, actions = actions.len(), "created state");
        Ok(State::new(name.text, target, actions, decision_tree))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_target_state(&self) -> bool {
        self.target
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn decision_tree(&self) -> &Statement {
        &self.decision_tree
    }

    /// The first option this state activates, if any.
    pub fn subsequent_option(&self) -> Option<usize> {
        self.actions.iter().find_map(|action| match action {
            Action::Option { option, .. } => Some(*option),
            _ => None,
        })
    }

    /// Time since the state became active, as of the last update.
    pub fn time_of_execution(&self) -> u64 {
        self.time_of_execution.get()
    }

    pub(crate) fn update_time(&self, now: u64) {
        self.time_of_execution
            .set(now.saturating_sub(self.activated_at.get()));
    }

    pub(crate) fn reset(&self, now: u64) {
        self.activated_at.set(now);
        self.time_of_execution.set(0);
    }

    pub(crate) fn execute_actions(&self, cx: &ExecutionContext<'_>) {
        for action in &self.actions {
            action.execute(cx);
        }
    }

    /// Index of the state the decision tree selects for the next cycle.
    pub(crate) fn next_state(&self, cx: &ExecutionContext<'_>) -> usize {
        self.update_time(cx.runtime.now);
        self.decision_tree.next_state(cx)
    }
}
