//! Path data for marker outlines.

use std::fmt;

use crate::decimal::ExactDecimal;
use crate::types::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    MoveTo(Point),
    LineTo(Point),
    Close,
}

/// A polygonal path, built with chained `m`/`l`/`z` calls and printed as the
/// `d` attribute of a `<path>` element.
///
/// ```
/// use tacitsvg::render::PathData;
///
/// let d = PathData::new().m(0, 0).l(10, 5).l(0, 10).z();
/// assert_eq!(d.to_string(), "M 0 0 L 10 5 L 0 10 Z");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathData {
    commands: Vec<Command>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to `(x, y)`
    pub fn m(mut self, x: impl Into<ExactDecimal>, y: impl Into<ExactDecimal>) -> Self {
        self.commands.push(Command::MoveTo(Point::new(x, y)));
        self
    }

    /// Straight segment to `(x, y)`
    pub fn l(mut self, x: impl Into<ExactDecimal>, y: impl Into<ExactDecimal>) -> Self {
        self.commands.push(Command::LineTo(Point::new(x, y)));
        self
    }

    /// Close the current subpath
    pub fn z(mut self) -> Self {
        self.commands.push(Command::Close);
        self
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match command {
                Command::MoveTo(p) => write!(f, "M {} {}", p.x(), p.y())?,
                Command::LineTo(p) => write!(f, "L {} {}", p.x(), p.y())?,
                Command::Close => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}
