//! Turtle state, configuration and operations for 2D line drawing.

use crate::error::Result;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Configuration for turtle interpretation.
///
/// Field aliases accept the key names of the legacy JSON config
/// (`InitialX`, `Orientation`, `Displacement`, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurtleConfig {
    /// Start position, x component.
    #[serde(alias = "InitialX")]
    pub start_x: f64,
    /// Start position, y component.
    #[serde(alias = "InitialY")]
    pub start_y: f64,
    /// Initial heading in radians, measured counter-clockwise from +X.
    #[serde(alias = "Orientation")]
    pub start_heading: f64,
    /// Rotation applied by `+` / `-`, in radians.
    #[serde(alias = "AngleIncrement")]
    pub angle_increment: f64,
    /// Distance covered by `F` and `f`.
    #[serde(alias = "Displacement")]
    pub step_length: f64,
    /// Stroke width stamped on every emitted command.
    #[serde(alias = "LineWidth")]
    pub stroke_width: f64,
    /// Maximum stack depth for push/pop operations.
    pub max_stack_depth: usize,
}

impl Default for TurtleConfig {
    fn default() -> Self {
        Self {
            start_x: 0.0,
            start_y: 0.0,
            start_heading: 0.0,
            angle_increment: 90.0f64.to_radians(),
            step_length: 1.0,
            stroke_width: 1.0,
            max_stack_depth: 1024,
        }
    }
}

impl TurtleConfig {
    /// Parses a JSON turtle configuration. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Start position as a vector.
    pub fn start(&self) -> DVec2 {
        DVec2::new(self.start_x, self.start_y)
    }

    /// Sets the start position.
    pub fn with_start(mut self, x: f64, y: f64) -> Self {
        self.start_x = x;
        self.start_y = y;
        self
    }

    /// Sets the `+` / `-` rotation from degrees.
    pub fn with_angle_degrees(mut self, degrees: f64) -> Self {
        self.angle_increment = degrees.to_radians();
        self
    }

    /// Sets the distance covered by `F` and `f`.
    pub fn with_step_length(mut self, step_length: f64) -> Self {
        self.step_length = step_length;
        self
    }
}

/// The state of the drawing turtle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtleState {
    /// Current position of the pen.
    pub position: DVec2,
    /// Current heading in radians.
    pub heading: f64,
}

impl TurtleState {
    /// Pen pose before the first symbol is read.
    pub fn new(config: &TurtleConfig) -> Self {
        Self {
            position: config.start(),
            heading: config.start_heading,
        }
    }

    /// Unit vector along the current heading.
    pub fn direction(&self) -> DVec2 {
        DVec2::from_angle(self.heading)
    }

    /// Moves `distance` along the heading and returns the new position.
    pub fn advance(&mut self, distance: f64) -> DVec2 {
        self.position += self.direction() * distance;
        self.position
    }

    pub fn turn(&mut self, angle: f64) {
        self.heading += angle;
    }
}

/// Operations that can be performed by the turtle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurtleOp {
    /// Move forward one step, recording a line (`F`).
    Draw,
    /// Move forward one step without drawing (`f`).
    Move,
    /// Rotate by `+angle_increment` (`+`).
    TurnLeft,
    /// Rotate by `-angle_increment` (`-`).
    TurnRight,
    /// Save the turtle state. Not part of the standard symbol set.
    Push,
    /// Restore the most recently pushed state. Not part of the standard symbol set.
    Pop,
    /// No-op: symbol has no registered meaning.
    Ignore,
}
