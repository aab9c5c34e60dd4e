//! Runtime of the Xabsl behavior engine.
//!
//! An option graph is a hierarchy of state machines ("options") compiled
//! offline into a whitespace separated token stream ("intermediate code").
//! This crate builds the graph from that stream against the symbols and
//! basic behaviors registered by the host, and executes it once per control
//! cycle.
//!
//! Start with [`api::Engine`].

pub mod api;
pub mod behavior;
pub mod diagnostics;
pub mod errors;
pub mod expressions;
pub mod graph;
pub mod parameters;
pub mod reader;
pub mod registry;
pub mod symbols;

mod build;
mod runtime;

pub use behavior::BasicBehavior;


#[cfg(test)]
pub(crate) mod fixture;
