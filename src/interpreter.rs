//! Replays a materialized symbol string as pen movements, producing line segments.
//!
//! A [`TurtleInterpreter`] owns the pen's starting pose from [`TurtleConfig`] and a
//! table saying what each character does to the pen. Feed it the string returned
//! by [`crate::materialize`]; it walks the characters once, left to right, and
//! records a [`Command`] for every stroke.

use crate::drawing::{Command, Drawing};
use crate::turtle::{TurtleConfig, TurtleOp, TurtleState};
use log::debug;
use std::collections::HashMap;

/// Interprets an L-System symbol sequence as turtle drawing instructions.
pub struct TurtleInterpreter {
    op_map: HashMap<char, TurtleOp>,
    config: TurtleConfig,
}

impl TurtleInterpreter {
    /// An interpreter whose pen reacts to nothing yet; map characters before drawing.
    pub fn new(config: TurtleConfig) -> Self {
        Self {
            op_map: HashMap::new(),
            config,
        }
    }

    /// Creates an interpreter with the standard `F f + -` symbols registered.
    pub fn standard(config: TurtleConfig) -> Self {
        let mut interpreter = Self::new(config);
        interpreter.populate_standard_symbols();
        interpreter
    }

    /// Swaps in a complete character table, e.g. for an alphabet other than `F f + -`.
    pub fn with_map(mut self, map: HashMap<char, TurtleOp>) -> Self {
        self.op_map = map;
        self
    }

    /// Makes `symbol` perform `op`, overriding any previous meaning.
    pub fn set_op(&mut self, symbol: char, op: TurtleOp) {
        self.op_map.insert(symbol, op);
    }

    /// What the pen does on `symbol`; unmapped characters are [`TurtleOp::Ignore`].
    pub fn op(&self, symbol: char) -> TurtleOp {
        self.op_map.get(&symbol).copied().unwrap_or(TurtleOp::Ignore)
    }

    /// Registers the four standard drawing symbols.
    ///
    /// | Symbol | Operation |
    /// |---|---|
    /// | `F` | [`TurtleOp::Draw`] |
    /// | `f` | [`TurtleOp::Move`] |
    /// | `+` | [`TurtleOp::TurnLeft`] |
    /// | `-` | [`TurtleOp::TurnRight`] |
    pub fn populate_standard_symbols(&mut self) {
        let mappings = [
            ('F', TurtleOp::Draw),
            ('f', TurtleOp::Move),
            ('+', TurtleOp::TurnLeft),
            ('-', TurtleOp::TurnRight),
        ];
        for (symbol, op) in mappings {
            self.set_op(symbol, op);
        }
    }

    pub fn config(&self) -> &TurtleConfig {
        &self.config
    }

    /// Replays `symbols` in order and returns the resulting [`Drawing`].
    ///
    /// The turtle starts at the configured position and heading. One
    /// [`Command`] is emitted per `Draw`, in processing order. Symbols with no
    /// registered mapping are ignored.
    ///
    /// # Push / Pop
    ///
    /// When mapped, `Push` saves position and heading and `Pop` restores them.
    /// Pushes beyond `max_stack_depth` are silently dropped and a `Pop` on an
    /// empty stack does nothing.
    pub fn interpret<I>(&self, symbols: I) -> Drawing
    where
        I: IntoIterator<Item = char>,
    {
        let mut drawing = Drawing::new();
        let mut turtle = TurtleState::new(&self.config);
        let mut stack: Vec<TurtleState> = Vec::new();
        let step = self.config.step_length;
        let angle = self.config.angle_increment;

        for symbol in symbols {
            match self.op(symbol) {
                TurtleOp::Draw => {
                    let from = turtle.position;
                    let to = turtle.advance(step);
                    drawing.add_command(Command::line(from, to, self.config.stroke_width));
                }
                TurtleOp::Move => {
                    turtle.advance(step);
                }
                TurtleOp::TurnLeft => turtle.turn(angle),
                TurtleOp::TurnRight => turtle.turn(-angle),
                TurtleOp::Push => {
                    if stack.len() < self.config.max_stack_depth {
                        stack.push(turtle);
                    }
                }
                TurtleOp::Pop => {
                    if let Some(saved) = stack.pop() {
                        turtle = saved;
                    }
                }
                TurtleOp::Ignore => {}
            }
        }

        debug!("turtle emitted {} commands", drawing.len());
        drawing
    }

    /// Convenience wrapper around [`interpret`](Self::interpret) for a materialized string.
    pub fn build_drawing(&self, symbols: &str) -> Drawing {
        self.interpret(symbols.chars())
    }
}
