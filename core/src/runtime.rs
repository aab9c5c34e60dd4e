//! Per-cycle evaluation context.

use crate::behavior::BehaviorEntry;
use crate::graph::{OptionNode, State};
use crate::registry::NamedRegistry;
use crate::symbols::Symbols;

/// Everything shared by the whole call tree of one engine cycle.
#[derive(Clone, Copy)]
pub(crate) struct Runtime<'a> {
    pub(crate) symbols: &'a Symbols,
    pub(crate) options: &'a NamedRegistry<OptionNode>,
    pub(crate) behaviors: &'a NamedRegistry<BehaviorEntry>,
    /// Clock reading taken once at the start of the cycle.
    pub(crate) now: u64,
    pub(crate) cycle: u64,
}

/// The runtime plus the option and state whose nodes are being evaluated.
#[derive(Clone, Copy)]
pub(crate) struct ExecutionContext<'a> {
    pub(crate) runtime: Runtime<'a>,
    pub(crate) option: &'a OptionNode,
    pub(crate) state: &'a State,
}

impl<'a> ExecutionContext<'a> {
    pub(crate) fn symbols(&self) -> &'a Symbols {
        self.runtime.symbols
    }
}
