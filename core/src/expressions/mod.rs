//! Decimal, boolean and enumerated expressions.
//!
//! Expressions are built once from the intermediate code and evaluated every
//! cycle. Building reports a [`ConstructError`]; evaluating never fails.

mod boolean;
mod decimal;
mod enumerated;
mod operators;

pub use boolean::BooleanExpr;
pub use decimal::DecimalExpr;
pub use enumerated::{EnumeratedExpr, EnumeratedKind};
pub use operators::{ArithmeticOp, RelationalOp};

use crate::build::Builder;
use crate::errors::ConstructError;
use crate::parameters::ParameterAssignment;
use crate::runtime::ExecutionContext;
use crate::symbols::InputSymbol;

/// A ternary expression: only the selected branch is evaluated.
#[derive(Debug)]
pub struct Conditional<E> {
    pub condition: BooleanExpr,
    pub then: E,
    pub otherwise: E,
}

impl<E> Conditional<E> {
    fn create(
        b: &mut Builder<'_>,
        scope: &crate::build::Scope<'_>,
        mut branch: impl FnMut(&mut Builder<'_>) -> Result<E, ConstructError>,
    ) -> Result<Self, ConstructError> {
        let condition = BooleanExpr::create(b, scope)?;
        let then = branch(b)?;
        let otherwise = branch(b)?;
        Ok(Self {
            condition,
            then,
            otherwise,
        })
    }

    fn select(&self, cx: &ExecutionContext<'_>) -> &E {
        if self.condition.value(cx) {
            &self.then
        } else {
            &self.otherwise
        }
    }
}

/// Binds the call site parameters, notifies the symbol if they changed and
/// then reads its value.
fn read_input<T: Copy>(
    symbol: &InputSymbol<T>,
    parameters: &ParameterAssignment,
    cx: &ExecutionContext<'_>,
) -> T {
    if parameters.set(&symbol.parameters, cx) {
        symbol.notify_parameters_changed();
    }
    symbol.value()
}
