//! Depth-first listing of what ran in the last cycle.

use core::fmt;

use super::{Action, OptionNode};
use crate::behavior::BehaviorEntry;
use crate::parameters::ParameterValue;
use crate::registry::NamedRegistry;
use crate::symbols::Symbols;

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveBehavior {
    /// Zero for the root option.
    pub depth: usize,
    pub kind: ActiveBehaviorKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActiveBehaviorKind {
    Option {
        name: String,
        time_of_execution: u64,
        /// The state whose actions ran in the last cycle.
        state: String,
        time_of_state_execution: u64,
        parameters: Vec<(String, ParameterValue)>,
    },
    BasicBehavior {
        name: String,
        parameters: Vec<(String, ParameterValue)>,
    },
    DecimalOutput {
        name: String,
        value: f64,
    },
    BooleanOutput {
        name: String,
        value: bool,
    },
    EnumeratedOutput {
        name: String,
        value: i32,
        element: Option<String>,
    },
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Decimal(value) => write!(f, "{}", value),
            ParameterValue::Boolean(value) => write!(f, "{}", value),
            ParameterValue::Enumerated {
                element: Some(element),
                ..
            } => write!(f, "{}", element),
            ParameterValue::Enumerated { value, .. } => write!(f, "{}", value),
        }
    }
}

fn write_parameters(
    f: &mut fmt::Formatter<'_>,
    parameters: &[(String, ParameterValue)],
) -> fmt::Result {
    for (name, value) in parameters {
        write!(f, " {}={}", name, value)?;
    }
    Ok(())
}

impl fmt::Display for ActiveBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:indent$}", "", indent = self.depth * 2)?;
        match &self.kind {
            ActiveBehaviorKind::Option {
                name,
                time_of_execution,
                state,
                time_of_state_execution,
                parameters,
            } => {
                write!(
                    f,
                    "option {} ({} ms) state {} ({} ms)",
                    name, time_of_execution, state, time_of_state_execution
                )?;
                write_parameters(f, parameters)
            }
            ActiveBehaviorKind::BasicBehavior { name, parameters } => {
                write!(f, "basic behavior {}", name)?;
                write_parameters(f, parameters)
            }
            ActiveBehaviorKind::DecimalOutput { name, value } => write!(f, "{} = {}", name, value),
            ActiveBehaviorKind::BooleanOutput { name, value } => write!(f, "{} = {}", name, value),
            ActiveBehaviorKind::EnumeratedOutput {
                name,
                element: Some(element),
                ..
            } => write!(f, "{} = {}", name, element),
            ActiveBehaviorKind::EnumeratedOutput { name, value, .. } => {
                write!(f, "{} = {}", name, value)
            }
        }
    }
}

struct Walk<'a> {
    symbols: &'a Symbols,
    options: &'a NamedRegistry<OptionNode>,
    behaviors: &'a NamedRegistry<BehaviorEntry>,
    cycle: u64,
    visited: Vec<usize>,
    out: Vec<ActiveBehavior>,
}

impl Walk<'_> {
    fn option(&mut self, index: usize, depth: usize) {
        let (options, behaviors, symbols) = (self.options, self.behaviors, self.symbols);
        let option = &options[index];
        if self.visited.contains(&index) || !option.executed_in(self.cycle) {
            return;
        }
        self.visited.push(index);

        let executed = option.executed_state();
        self.out.push(ActiveBehavior {
            depth,
            kind: ActiveBehaviorKind::Option {
                name: option.name().to_string(),
                time_of_execution: option.time_of_execution(),
                state: executed.name().to_string(),
                time_of_state_execution: executed.time_of_execution(),
                parameters: option.parameters().values(symbols),
            },
        });

        for action in executed.actions() {
            let kind = match action {
                Action::Option { option, .. } => {
                    self.option(*option, depth + 1);
                    continue;
                }
                Action::BasicBehavior { behavior, .. } => {
                    let entry = &behaviors[*behavior];
                    ActiveBehaviorKind::BasicBehavior {
                        name: entry.name().to_string(),
                        parameters: entry.parameters().values(symbols),
                    }
                }
                Action::DecimalOutput { symbol, .. } => {
                    let output = &symbols.decimal_output_symbols()[*symbol];
                    ActiveBehaviorKind::DecimalOutput {
                        name: output.name().to_string(),
                        value: output.value(),
                    }
                }
                Action::BooleanOutput { symbol, .. } => {
                    let output = &symbols.boolean_output_symbols()[*symbol];
                    ActiveBehaviorKind::BooleanOutput {
                        name: output.name().to_string(),
                        value: output.value(),
                    }
                }
                Action::EnumeratedOutput { symbol, expression } => {
                    let output = &symbols.enumerated_output_symbols()[*symbol];
                    let value = output.value();
                    ActiveBehaviorKind::EnumeratedOutput {
                        name: output.name().to_string(),
                        value,
                        element: symbols
                            .element_name(expression.enumeration(), value)
                            .map(str::to_string),
                    }
                }
            };
            self.out.push(ActiveBehavior {
                depth: depth + 1,
                kind,
            });
        }
    }
}

/// Lists the options, basic behaviors and output assignments that ran in
/// `cycle`, starting at `root`.
pub(crate) fn collect_active_behaviors(
    symbols: &Symbols,
    options: &NamedRegistry<OptionNode>,
    behaviors: &NamedRegistry<BehaviorEntry>,
    root: usize,
    cycle: u64,
) -> Vec<ActiveBehavior> {
    let mut walk = Walk {
        symbols,
        options,
        behaviors,
        cycle,
        visited: Vec::new(),
        out: Vec::new(),
    };
    walk.option(root, 0);
    walk.out
}
