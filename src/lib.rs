//! Declarative 2-D diagram layout.
//!
//! Shapes are placed relative to each other ("right of", "below", ...) in
//! unit-less implicit space. A [`Drawing`] picks one ratio that fits the
//! content into the requested pixel box, resolves every shape's explicit
//! geometry with exact decimal arithmetic, and writes SVG markup.
//!
//! ```
//! use tacitsvg::{Circle, Drawing};
//!
//! let mut drawing = Drawing::new();
//! let left = drawing.add(Circle::new());
//! let right = drawing.add(Circle::new());
//! drawing.set_right_of(right, left)?;
//!
//! let svg = drawing.render_with_dimensions(100, 100)?;
//! assert!(svg.contains(r#"<circle cx="25" cy="50" r="25"/>"#));
//! assert!(svg.contains(r#"<circle cx="75" cy="50" r="25"/>"#));
//! # Ok::<(), tacitsvg::Error>(())
//! ```

pub mod decimal;
pub mod defaults;
pub mod drawing;
pub mod errors;
pub mod graph;
mod layout;
mod log;
pub mod marker;
pub mod options;
pub mod render;
pub mod shape;
pub mod types;

pub use decimal::ExactDecimal;
pub use drawing::{Drawing, ShapeRef};
pub use errors::{ArithmeticError, Error, Result, UnsupportedOperation};
pub use graph::{Axis, Relation, ShapeId};
pub use marker::{DecorationType, GeometryKind, MarkerContext, MarkerGeometry};
pub use options::LayoutOptions;
pub use render::RenderMode;
pub use shape::{
    Circle, Endpoint, Line, LineEnd, Orientation, Rectangle, ShapeGeometry, ShapeKind, Style, Text,
};
pub use types::{Bounds, Measure, Point, Port, Size, Unit};
