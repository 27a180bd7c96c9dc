use glam::DVec2;
use serde::{Deserialize, Serialize};

/// The ordered output of a turtle run, ready to be handed to a renderer.
///
/// Command order is drawing order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    pub commands: Vec<Command>,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }

    /// Axis-aligned bounding box `(min, max)` of every endpoint, ignoring stroke width.
    ///
    /// Returns `None` for an empty drawing.
    pub fn bounds(&self) -> Option<(DVec2, DVec2)> {
        let mut points = self.commands.iter().flat_map(|c| [c.start(), c.end()]);
        let first = points.next()?;
        Some(points.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }
}

impl<'a> IntoIterator for &'a Drawing {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

/// A single line segment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
}

impl Command {
    pub fn line(from: DVec2, to: DVec2, stroke_width: f64) -> Self {
        Self {
            x1: from.x,
            y1: from.y,
            x2: to.x,
            y2: to.y,
            stroke_width,
        }
    }

    pub fn start(&self) -> DVec2 {
        DVec2::new(self.x1, self.y1)
    }

    pub fn end(&self) -> DVec2 {
        DVec2::new(self.x2, self.y2)
    }

    pub fn length(&self) -> f64 {
        self.start().distance(self.end())
    }
}
