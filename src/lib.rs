//! Xabsl - an interpreter for hierarchical state machine behaviors
//!
//! # Overview
//!
//! Agent behavior is written as a hierarchy of *options*. Each option is a
//! state machine whose states run actions and pick their successor with a
//! decision tree. Options are compiled offline into *intermediate code*,
//! which this crate reads at runtime and executes once per control cycle
//! against symbols and basic behaviors provided by the host.
//!
//! # Quick Start
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use xabsl::{Clock, Engine, EngineOptions};
//!
//! let distance = Rc::new(Cell::new(800.0));
//! let speed = Rc::new(Cell::new(0.0));
//!
//! let mut engine = Engine::new(EngineOptions::default(), Clock::system(), |env| {
//!     env.symbols()
//!         .register_decimal_input_symbol("ball.distance", distance.clone())?;
//!     env.symbols()
//!         .register_decimal_output_symbol("walk.speed", speed.clone())
//! })
//! .unwrap();
//!
//! // Walk at full speed while the ball is far away, slow down when close.
//! engine
//!     .create_option_graph(
//!         "1 approach 0
//!          approach 2 far near far
//!            far 0 1 d walk.speed v 300 i < i ball.distance 0 v 500 t near t far
//!            near 1 1 d walk.speed v 100 t near
//!          1 striker approach",
//!     )
//!     .unwrap();
//!
//! engine.execute().unwrap();
//! assert_eq!(speed.get(), 300.0);
//! ```
//!
//! # Host Bindings
//!
//! Everything the intermediate code refers to by name is registered up front
//! through [`EnvironmentBuilder`]:
//!
//! - input symbols, read while evaluating expressions
//! - output symbols, written by state actions
//! - enumerations, typing enumerated symbols and parameters
//! - basic behaviors, the leaves of the option hierarchy
//!
//! A graph referring to an unregistered name is rejected with
//! [`Error::Construction`]; use [`render_error`] to show where.

mod error_renderer;

// Re-export public API from xabsl_core
pub use xabsl_core::api::{
    Clock, Diagnostic, Engine, EngineOptions, Environment, EnvironmentBuilder, Error, RelatedInfo,
    Severity,
};

// Re-export the building blocks hosts interact with
pub use xabsl_core::BasicBehavior;
pub use xabsl_core::errors::RegistrationError;
pub use xabsl_core::graph::{ActiveBehavior, ActiveBehaviorKind, OptionGraph, OptionNode, State};
pub use xabsl_core::parameters::ParameterValue;
pub use xabsl_core::symbols::{self, InputBinding, OutputBinding, Symbols};

pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};
