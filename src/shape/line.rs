//! Lines are positioned by their endpoints rather than by adjacency.

use crate::graph::ShapeId;
use crate::marker::MarkerGeometry;
use crate::errors::ArithmeticError;
use crate::options::LayoutOptions;
use crate::types::{Point, Port, Size};

use super::ShapeGeometry;

/// Where one end of a line sits
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Endpoint {
    /// A fixed point in explicit space
    Point(Point),
    /// A port on another shape, tracking that shape's resolved position
    Port(ShapeId, Port),
}

impl From<Point> for Endpoint {
    fn from(point: Point) -> Self {
        Endpoint::Point(point)
    }
}

impl From<(ShapeId, Port)> for Endpoint {
    fn from((shape, port): (ShapeId, Port)) -> Self {
        Endpoint::Port(shape, port)
    }
}

/// Direction of a standalone line spanning the whole drawing frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Left edge to right edge through the vertical middle
    Horizontal,
    /// Top edge to bottom edge through the horizontal middle
    Vertical,
    /// Top-left corner to bottom-right corner
    DiagonalDown,
    /// Bottom-left corner to top-right corner
    DiagonalUp,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineRoute {
    Between { start: Endpoint, end: Endpoint },
    Oriented(Orientation),
}

/// Which end of a line a decoration belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineEnd {
    Start,
    End,
}

impl LineEnd {
    fn index(self) -> usize {
        match self {
            LineEnd::Start => 0,
            LineEnd::End => 1,
        }
    }

    /// Attribute naming the marker on this end
    pub fn attribute(self) -> &'static str {
        match self {
            LineEnd::Start => "marker-start",
            LineEnd::End => "marker-end",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    route: LineRoute,
    decorations: [Option<MarkerGeometry>; 2],
}

impl Line {
    pub fn between(start: impl Into<Endpoint>, end: impl Into<Endpoint>) -> Self {
        Self {
            route: LineRoute::Between {
                start: start.into(),
                end: end.into(),
            },
            decorations: [None, None],
        }
    }

    /// Line between two fixed points
    pub fn from_points(start: Point, end: Point) -> Self {
        Self::between(start, end)
    }

    pub fn oriented(orientation: Orientation) -> Self {
        Self {
            route: LineRoute::Oriented(orientation),
            decorations: [None, None],
        }
    }

    pub fn route(&self) -> &LineRoute {
        &self.route
    }

    pub fn decoration(&self, end: LineEnd) -> Option<&MarkerGeometry> {
        self.decorations[end.index()].as_ref()
    }

    /// Attach `marker` to `end`, replacing whatever was there
    pub fn set_decoration(&mut self, end: LineEnd, marker: MarkerGeometry) {
        self.decorations[end.index()] = Some(marker);
    }

    /// Decorations in start, end order
    pub fn decorations(&self) -> impl Iterator<Item = (LineEnd, &MarkerGeometry)> {
        [LineEnd::Start, LineEnd::End]
            .into_iter()
            .filter_map(|end| self.decoration(end).map(|marker| (end, marker)))
    }
}

impl ShapeGeometry for Line {
    fn implicit_size(&self, _options: &LayoutOptions) -> Result<Size, ArithmeticError> {
        Ok(Size::default())
    }

    fn element_name(&self) -> &'static str {
        "line"
    }

    fn participates_in_layout(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::{DecorationType, MarkerContext};

    #[test]
    fn decorations_replace_per_end() {
        let mut line = Line::from_points(Point::new(0, 0), Point::new(10, 0));
        let dot = MarkerGeometry::generate(DecorationType::Dot, MarkerContext::LineEnding, None)
            .unwrap();
        let square =
            MarkerGeometry::generate(DecorationType::Square, MarkerContext::LineEnding, None)
                .unwrap();
        line.set_decoration(LineEnd::End, dot);
        line.set_decoration(LineEnd::End, square.clone());

        let attached: Vec<_> = line.decorations().collect();
        assert_eq!(attached, vec![(LineEnd::End, &square)]);
        assert!(line.decoration(LineEnd::Start).is_none());
    }
}
