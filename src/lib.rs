//! # lsys-turtle
//!
//! Expands an L-System grammar concurrently and replays the result through a 2D
//! turtle, producing an ordered list of line segments for a renderer.
//!
//! Pipeline: [`LSystem`] → [`ExpansionEngine`] (one tokio task per symbol instance,
//! leaves gathered in an [`OutputCollector`]) → [`materialize`] (structural sort by
//! [`PositionCode`]) → [`TurtleInterpreter`] → [`Drawing`].

pub mod collector;
pub mod config;
pub mod drawing;
pub mod engine;
pub mod error;
pub mod grammar;
pub mod instance;
pub mod interpreter;
pub mod materialize;
pub mod turtle;

pub use collector::*;
pub use config::*;
pub use drawing::*;
pub use engine::*;
pub use error::*;
pub use grammar::*;
pub use instance::*;
pub use interpreter::*;
pub use materialize::*;
pub use turtle::*;

use std::sync::Arc;

/// Runs the whole pipeline with the standard turtle symbols, blocking until done.
pub fn generate(system: impl Into<Arc<LSystem>>, config: &TurtleConfig) -> Result<Drawing> {
    let symbols = expand_blocking(system)?.materialize();
    Ok(TurtleInterpreter::standard(config.clone()).build_drawing(&symbols))
}
