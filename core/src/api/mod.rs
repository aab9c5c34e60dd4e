//! Public API of the behavior engine.
//!
//! The host registers its symbols and basic behaviors once, builds the option
//! graph from intermediate code and then calls [`Engine::execute`] once per
//! control cycle.
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use xabsl_core::api::{Clock, Engine, EngineOptions};
//! use xabsl_core::symbols::InputBinding;
//!
//! let speed = Rc::new(Cell::new(0.0));
//! let mut engine = Engine::new(EngineOptions::default(), Clock::system(), |env| {
//!     env.symbols()
//!         .register_decimal_input_symbol("ball.distance", InputBinding::function(|| 420.0))?;
//!     env.symbols()
//!         .register_decimal_output_symbol("walk.speed", speed.clone())?;
//!     Ok(())
//! })
//! .unwrap();
//!
//! // One option with one state assigning `ball.distance / 2` to `walk.speed`.
//! let source = "1 approach 0  approach 1 go go go 0 1 d walk.speed d i ball.distance 0 v 2 t go 0";
//! engine.create_option_graph(source).unwrap();
//! engine.execute().unwrap();
//! assert_eq!(speed.get(), 210.0);
//! ```

pub mod clock;
pub mod engine;
pub mod environment;
pub mod error;
pub mod options;

pub use clock::Clock;
pub use engine::Engine;
pub use environment::{Environment, EnvironmentBuilder};
pub use error::{Diagnostic, Error, RelatedInfo, Severity};
pub use options::EngineOptions;
