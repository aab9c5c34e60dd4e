//! A minimal option around which expressions can be built and evaluated.

use crate::api::EngineOptions;
use crate::behavior::BehaviorEntry;
use crate::build::{Builder, Scope};
use crate::errors::ConstructError;
use crate::expressions::{BooleanExpr, DecimalExpr, EnumeratedExpr};
use crate::graph::{OptionBody, OptionNode, State, Statement};
use crate::parameters::Parameters;
use crate::registry::NamedRegistry;
use crate::runtime::{ExecutionContext, Runtime};
use crate::symbols::{EnumId, Symbols};

pub(crate) struct Fixture {
    pub(crate) symbols: Symbols,
    pub(crate) behaviors: NamedRegistry<BehaviorEntry>,
    headers: NamedRegistry<Parameters>,
    options: NamedRegistry<OptionNode>,
    states: NamedRegistry<()>,
}

impl Fixture {
    pub(crate) fn new(symbols: Symbols) -> Self {
        Self::with_parameters(symbols, Parameters::new())
    }

    /// A fixture whose option declares `parameters`.
    pub(crate) fn with_parameters(symbols: Symbols, parameters: Parameters) -> Self {
        let mut states = NamedRegistry::new();
        states
            .append(
                "idle",
                State::new("idle", false, Vec::new(), Statement::Transition(0)),
            )
            .unwrap();
        let mut options = NamedRegistry::new();
        options
            .append(
                "fixture",
                OptionNode::new(
                    "fixture",
                    parameters,
                    OptionBody {
                        states,
                        initial_state: 0,
                    },
                ),
            )
            .unwrap();
        let mut state_names = NamedRegistry::new();
        state_names.append("idle", ()).unwrap();
        Self {
            symbols,
            behaviors: NamedRegistry::new(),
            headers: NamedRegistry::new(),
            options,
            states: state_names,
        }
    }

    fn option(&self) -> &OptionNode {
        &self.options[0]
    }

    pub(crate) fn scope(&self) -> Scope<'_> {
        Scope {
            symbols: &self.symbols,
            behaviors: &self.behaviors,
            options: &self.headers,
            parameters: &self.option().parameters,
            states: &self.states,
        }
    }

    pub(crate) fn context(&self) -> ExecutionContext<'_> {
        let option = self.option();
        ExecutionContext {
            runtime: Runtime {
                symbols: &self.symbols,
                options: &self.options,
                behaviors: &self.behaviors,
                now: 0,
                cycle: 1,
            },
            option,
            state: option.active_state(),
        }
    }

    fn build<T>(
        &self,
        source: &str,
        create: impl FnOnce(&mut Builder<'_>, &Scope<'_>) -> Result<T, ConstructError>,
    ) -> Result<T, ConstructError> {
        let mut b = Builder::new(source, &EngineOptions::default());
        let built = create(&mut b, &self.scope())?;
        b.expect_end()?;
        Ok(built)
    }

    pub(crate) fn decimal(&self, source: &str) -> Result<DecimalExpr, ConstructError> {
        self.build(source, |b, scope| DecimalExpr::create(b, scope))
    }

    pub(crate) fn boolean(&self, source: &str) -> Result<BooleanExpr, ConstructError> {
        self.build(source, |b, scope| BooleanExpr::create(b, scope))
    }

    pub(crate) fn enumerated(
        &self,
        source: &str,
        enumeration: Option<&str>,
    ) -> Result<EnumeratedExpr, ConstructError> {
        let expected = enumeration
            .map(|name| EnumId(self.symbols.enumerations().position(name).unwrap()));
        self.build(source, |b, scope| EnumeratedExpr::create(b, scope, expected))
    }

    pub(crate) fn eval_decimal(&self, source: &str) -> f64 {
        self.decimal(source).unwrap().value(&self.context())
    }

    pub(crate) fn eval_boolean(&self, source: &str) -> bool {
        self.boolean(source).unwrap().value(&self.context())
    }
}
