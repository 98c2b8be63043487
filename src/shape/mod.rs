//! Shape variants
//!
//! Each variant knows its implicit size and the markup element it becomes.
//! Position, adjacency and explicit geometry live in the owning
//! [`Drawing`](crate::Drawing).

mod circle;
mod line;
mod rectangle;
mod text;

use enum_dispatch::enum_dispatch;

pub use circle::Circle;
pub use line::{Endpoint, Line, LineEnd, LineRoute, Orientation};
pub use rectangle::Rectangle;
pub use text::Text;

use crate::errors::ArithmeticError;
use crate::options::LayoutOptions;
use crate::types::Size;

/// Common behavior for all shape variants
#[enum_dispatch]
pub trait ShapeGeometry {
    /// Size in implicit units, before the drawing ratio is applied
    fn implicit_size(&self, options: &LayoutOptions) -> Result<Size, ArithmeticError>;

    /// Name of the markup element this shape renders as
    fn element_name(&self) -> &'static str;

    /// Whether the shape takes part in adjacency layout and drawing extent
    fn participates_in_layout(&self) -> bool {
        true
    }
}

#[enum_dispatch(ShapeGeometry)]
#[derive(Clone, Debug)]
pub enum ShapeKind {
    Circle(Circle),
    Rectangle(Rectangle),
    Line(Line),
    Text(Text),
}

impl ShapeKind {
    pub fn as_line(&self) -> Option<&Line> {
        match self {
            ShapeKind::Line(line) => Some(line),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            ShapeKind::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Presentation attributes
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Style {
    pub fill: Option<String>,
    pub stroke: Option<String>,
}
