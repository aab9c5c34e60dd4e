//! The behavior engine.

use super::{Clock, EngineOptions, Environment, EnvironmentBuilder, Error};
use crate::errors::RegistrationError;
use crate::graph::{ActiveBehavior, OptionGraph, OptionNode, collect_active_behaviors};
use crate::runtime::Runtime;
use crate::symbols::Symbols;

/// The option graph interpreter.
///
/// The engine owns:
/// - the host bindings (symbols and basic behaviors)
/// - the option graph built from intermediate code
/// - the root option driven on every cycle
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use xabsl_core::api::{Clock, Engine, EngineOptions};
///
/// let time = Rc::new(Cell::new(0));
/// let clock = Clock::new({
///     let time = time.clone();
///     move || time.get()
/// });
/// let mut engine = Engine::new(EngineOptions::default(), clock, |_| Ok(())).unwrap();
///
/// // Option `blink` toggles between `on` and `off` every cycle.
/// engine
///     .create_option_graph(
///         "1 blink 0
///          blink 2 on off off
///            on 0 0 t off
///            off 0 0 t on
///          1 robot blink",
///     )
///     .unwrap();
///
/// engine.execute().unwrap();
/// assert_eq!(engine.root_option().unwrap().active_state().name(), "on");
/// time.set(20);
/// engine.execute().unwrap();
/// assert_eq!(engine.root_option().unwrap().active_state().name(), "off");
/// ```
pub struct Engine {
    options: EngineOptions,
    clock: Clock,
    environment: Environment,
    graph: Option<OptionGraph>,
    root: usize,
    selected_agent: Option<usize>,
    cycle: u64,
}

impl Engine {
    /// Create a new engine with a custom environment.
    ///
    /// The initialization closure registers symbols, enumerations and basic
    /// behaviors; the first failed registration is returned.
    pub fn new(
        options: EngineOptions,
        clock: Clock,
        init: impl FnOnce(&mut EnvironmentBuilder) -> Result<(), RegistrationError>,
    ) -> Result<Self, Error> {
        let mut builder = EnvironmentBuilder::new();
        init(&mut builder)?;
        Ok(Self {
            options,
            clock,
            environment: builder.build(),
            graph: None,
            root: 0,
            selected_agent: None,
            cycle: 0,
        })
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn symbols(&self) -> &Symbols {
        &self.environment.symbols
    }

    /// The option graph, once [`create_option_graph`](Self::create_option_graph) succeeded.
    pub fn graph(&self) -> Option<&OptionGraph> {
        self.graph.as_ref()
    }

    /// Number of cycles executed so far.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Builds the option graph from intermediate code.
    ///
    /// On failure the engine is left without a graph and refuses to execute.
    /// On success the root option is the one of the first agent, or the
    /// first option if the code declares no agents.
    pub fn create_option_graph(&mut self, source: &str) -> Result<(), Error> {
        self.graph = None;
        self.selected_agent = None;
        let graph = OptionGraph::create(
            source,
            &self.options,
            &self.environment.symbols,
            &self.environment.behaviors,
        )
        .map_err(|e| {
            tracing::debug!(error = %e, "option graph construction failed");
            Error::construction(&e, source)
        })?;
        self.root = graph.default_root();
        self.selected_agent = (!graph.agents().is_empty()).then_some(0);
        self.graph = Some(graph);
        self.forget_activation();
        Ok(())
    }

    fn graph_or_error(&self) -> Result<&OptionGraph, Error> {
        self.graph
            .as_ref()
            .ok_or_else(|| Error::Api("no option graph has been created".to_string()))
    }

    /// Runs one control cycle: clears the was-set flags of all output symbols,
    /// then executes the root option and everything it activates.
    pub fn execute(&mut self) -> Result<(), Error> {
        let graph = self.graph_or_error()?;
        let cycle = self.cycle + 1;
        let runtime = Runtime {
            symbols: &self.environment.symbols,
            options: graph.options(),
            behaviors: &self.environment.behaviors,
            now: self.clock.now(),
            cycle,
        };
        runtime.symbols.reset_output_symbols();
        graph.options()[self.root].execute(runtime);
        self.cycle = cycle;
        Ok(())
    }

    /// Forgets all activation, so the next cycle starts every option from
    /// its initial state.
    pub fn reset(&mut self) {
        tracing::debug!("engine reset");
        self.forget_activation();
    }

    fn forget_activation(&self) {
        if let Some(graph) = &self.graph {
            graph.forget_activation();
        }
        self.environment
            .behaviors
            .values()
            .for_each(|behavior| behavior.forget());
    }

    /// Selects an agent, making its option the root option.
    pub fn set_selected_agent(&mut self, name: &str) -> Result<(), Error> {
        let graph = self.graph_or_error()?;
        let agent = graph
            .agents()
            .position(name)
            .ok_or_else(|| Error::Api(format!("agent `{}` does not exist", name)))?;
        if self.selected_agent != Some(agent) {
            tracing::debug!(agent = name, "selected agent");
        }
        self.root = graph.agents()[agent];
        self.selected_agent = Some(agent);
        Ok(())
    }

    pub fn selected_agent(&self) -> Option<&str> {
        let graph = self.graph.as_ref()?;
        graph.agents().name(self.selected_agent?)
    }

    /// Makes `name` the root option, regardless of the selected agent.
    pub fn set_root_option(&mut self, name: &str) -> Result<(), Error> {
        let graph = self.graph_or_error()?;
        self.root = graph
            .options()
            .position(name)
            .ok_or_else(|| Error::Api(format!("option `{}` does not exist", name)))?;
        self.selected_agent = None;
        Ok(())
    }

    pub fn root_option(&self) -> Option<&OptionNode> {
        self.graph.as_ref()?.options().get_index(self.root)
    }

    /// Everything that ran in the last cycle, depth first from the root
    /// option.
    pub fn active_behaviors(&self) -> Vec<ActiveBehavior> {
        match &self.graph {
            Some(graph) if self.cycle > 0 => collect_active_behaviors(
                &self.environment.symbols,
                graph.options(),
                &self.environment.behaviors,
                self.root,
                self.cycle,
            ),
            _ => Vec::new(),
        }
    }
}
