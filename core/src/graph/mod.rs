//! The option graph: options, their states, actions and decision trees.

mod action;
mod option;
mod snapshot;
mod state;
mod statement;

pub use action::Action;
pub use option::OptionNode;
pub use snapshot::{ActiveBehavior, ActiveBehaviorKind};
pub use state::State;
pub use statement::Statement;

pub(crate) use option::OptionBody;
pub(crate) use snapshot::collect_active_behaviors;

use crate::api::EngineOptions;
use crate::behavior::BehaviorEntry;
use crate::build::{Builder, resolve};
use crate::diagnostics::Context;
use crate::errors::{ConstructError, ErrorKind, NameKind};
use crate::parameters::{self, Parameters};
use crate::reader::Span;
use crate::registry::NamedRegistry;
use crate::symbols::Symbols;

/// Everything built from one intermediate code file.
#[derive(Debug)]
pub struct OptionGraph {
    options: NamedRegistry<OptionNode>,
    /// Agent name to root option.
    agents: NamedRegistry<usize>,
}

impl OptionGraph {
    pub(crate) fn create(
        source: &str,
        engine_options: &EngineOptions,
        symbols: &Symbols,
        behaviors: &NamedRegistry<BehaviorEntry>,
    ) -> Result<Self, ConstructError> {
        let mut b = Builder::new(source, engine_options);

        let (count, count_span) = b.read_count()?;
        if count == 0 {
            return Err(ConstructError::new(ErrorKind::EmptyGraph, count_span));
        }

        // Headers first, so actions can bind parameters of options whose
        // bodies come later.
        let mut headers: NamedRegistry<Parameters> = NamedRegistry::new();
        let mut header_spans = Vec::new();
        for _ in 0..count {
            let name = b.read_string()?;
            let parameters = parameters::declare(&mut b, symbols, &name)?;
            if headers.append(name.text, parameters).is_err() {
                return Err(ConstructError::new(
                    ErrorKind::Duplicate {
                        kind: NameKind::Option,
                        name: name.text.to_string(),
                    },
                    name.span,
                ));
            }
            header_spans.push(name.span);
        }

        let mut bodies = Vec::new();
        for (expected, header_span) in headers.names().zip(&header_spans) {
            let name = b.read_string()?;
            if name.text != expected {
                return Err(ConstructError::new(
                    ErrorKind::OutOfOrder {
                        kind: NameKind::Option,
                        expected: expected.to_string(),
                        found: name.text.to_string(),
                    },
                    name.span,
                )
                .in_context(Context::DeclaredHere {
                    what: format!("option `{}`", expected),
                    span: header_span.clone(),
                }));
            }
            let parameters = headers.get(expected).ok_or_else(|| {
                ConstructError::new(
                    ErrorKind::Unresolved {
                        kind: NameKind::Option,
                        name: expected.to_string(),
                    },
                    name.span.clone(),
                )
            })?;
            let body = OptionBody::create(&mut b, symbols, behaviors, &headers, parameters)
                .map_err(|e| {
                    e.in_context(Context::InOption {
                        name: name.text.to_string(),
                        span: name.span.clone(),
                    })
                })?;
            tracing::debug!(option = name.text, states = body.states.len(), "created option");
            bodies.push(body);
        }

        let mut agents = NamedRegistry::new();
        let (agent_count, _) = b.read_count()?;
        for _ in 0..agent_count {
            let name = b.read_string()?;
            let root = b.read_string()?;
            let in_agent = |e: ConstructError| {
                e.in_context(Context::InAgent {
                    name: name.text.to_string(),
                    span: name.span.clone(),
                })
            };
            let root = resolve(&headers, NameKind::Option, &root).map_err(in_agent)?;
            if agents.append(name.text, root).is_err() {
                return Err(ConstructError::new(
                    ErrorKind::Duplicate {
                        kind: NameKind::Agent,
                        name: name.text.to_string(),
                    },
                    name.span,
                ));
            }
        }
        b.expect_end()?;

        let mut options = NamedRegistry::new();
        for ((name, parameters), body) in headers.into_entries().zip(bodies) {
            let node = OptionNode::new(&name, parameters, body);
            options.append(&name, node).map_err(|_| {
                ConstructError::new(
                    ErrorKind::Duplicate {
                        kind: NameKind::Option,
                        name: name.clone(),
                    },
                    Span::default(),
                )
            })?;
        }

        tracing::info!(
            options = options.len(),
            agents = agents.len(),
            "created option graph"
        );
        Ok(Self { options, agents })
    }

    pub fn options(&self) -> &NamedRegistry<OptionNode> {
        &self.options
    }

    pub fn agents(&self) -> &NamedRegistry<usize> {
        &self.agents
    }

    /// Root option of the first agent, or the first option without agents.
    pub(crate) fn default_root(&self) -> usize {
        self.agents.get_index(0).copied().unwrap_or(0)
    }

    pub(crate) fn forget_activation(&self) {
        self.options.values().for_each(OptionNode::forget);
    }
}
