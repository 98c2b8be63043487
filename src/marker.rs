//! Line decorations (arrowheads and line endings) and their marker geometry.
//!
//! Every public [`DecorationType`] collapses onto one of six [`GeometryKind`]s;
//! each kind has a closed-form outline parameterized by the marker size, which
//! depends only on the [`MarkerContext`].

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::decimal::ExactDecimal;
use crate::defaults;
use crate::errors::{ArithmeticError, Error, UnsupportedOperation};
use crate::log::debug;
use crate::render::PathData;
use crate::types::{Point, Size};

/// Process-wide id source, so markers never collide within or across documents
static NEXT_MARKER_ID: AtomicU64 = AtomicU64::new(1);

fn next_marker_id() -> u64 {
    NEXT_MARKER_ID.fetch_add(1, Ordering::Relaxed)
}

/// Decoration names accepted on a line end, aliases included
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecorationType {
    Triangle,
    Default,
    Normal,
    Reverse,
    Inverted,
    Box,
    Square,
    Diamond,
    TurnedSquare,
    Dot,
    Disk,
    Circle,
    OpenDot,
    Tee,
    Crow,
    Vee,
}

impl DecorationType {
    /// Map an alias onto the geometry it draws
    pub fn canonical(self) -> Result<GeometryKind, UnsupportedOperation> {
        use DecorationType::*;
        match self {
            Triangle | Default | Normal => Ok(GeometryKind::Triangle),
            Reverse | Inverted => Ok(GeometryKind::Reverse),
            Box | Square => Ok(GeometryKind::Square),
            Diamond | TurnedSquare => Ok(GeometryKind::Diamond),
            Dot | Disk => Ok(GeometryKind::Dot),
            Circle | OpenDot => Ok(GeometryKind::OpenDot),
            Tee | Crow | Vee => Err(UnsupportedOperation::UnsupportedDecoration {
                kind: self.to_string(),
            }),
        }
    }
}

impl fmt::Display for DecorationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use DecorationType::*;
        let name = match self {
            Triangle => "TRIANGLE",
            Default => "DEFAULT",
            Normal => "NORMAL",
            Reverse => "REVERSE",
            Inverted => "INVERTED",
            Box => "BOX",
            Square => "SQUARE",
            Diamond => "DIAMOND",
            TurnedSquare => "TURNED_SQUARE",
            Dot => "DOT",
            Disk => "DISK",
            Circle => "CIRCLE",
            OpenDot => "OPEN_DOT",
            Tee => "TEE",
            Crow => "CROW",
            Vee => "VEE",
        };
        f.write_str(name)
    }
}

/// The distinct outlines behind the decoration aliases
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Triangle,
    Reverse,
    Square,
    Diamond,
    Dot,
    OpenDot,
}

impl GeometryKind {
    /// Name used in generated marker ids
    pub fn name(self) -> &'static str {
        match self {
            GeometryKind::Triangle => "TRIANGLE",
            GeometryKind::Reverse => "REVERSE",
            GeometryKind::Square => "BOX",
            GeometryKind::Diamond => "DIAMOND",
            GeometryKind::Dot => "DOT",
            GeometryKind::OpenDot => "CIRCLE",
        }
    }

    fn is_hollow(self) -> bool {
        self == GeometryKind::OpenDot
    }
}

/// Where a decoration was requested from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkerContext {
    /// `add_line_ending`: small, black, id suffixed with the instance number
    LineEnding,
    /// `add_arrowhead`: larger, red unless colored, id is the bare kind name
    Arrowhead,
}

impl MarkerContext {
    pub fn size(self) -> ExactDecimal {
        match self {
            MarkerContext::LineEnding => ExactDecimal::from(defaults::LINE_ENDING_SIZE),
            MarkerContext::Arrowhead => ExactDecimal::from(defaults::ARROWHEAD_SIZE),
        }
    }

    fn default_fill(self) -> &'static str {
        match self {
            MarkerContext::LineEnding => defaults::LINE_ENDING_FILL,
            MarkerContext::Arrowhead => defaults::ARROWHEAD_FILL,
        }
    }
}

/// Drawing primitive inside a marker
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarkerShape {
    Path(PathData),
    Circle { center: Point, radius: ExactDecimal },
}

/// A fully computed `<marker>` definition
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkerGeometry {
    pub kind: GeometryKind,
    pub context: MarkerContext,
    /// Instance number from the process-wide counter
    pub serial: u64,
    /// View box anchored at the origin
    pub view_box: Size,
    pub marker_size: Size,
    /// Point of the marker placed on the line end
    pub reference: Point,
    pub shape: MarkerShape,
    pub fill: String,
    pub stroke: String,
}

impl MarkerGeometry {
    /// Compute the marker for `decoration` in `context`.
    ///
    /// `fill` overrides the context's default color for solid kinds; hollow
    /// kinds are always white inside.
    pub fn generate(
        decoration: DecorationType,
        context: MarkerContext,
        fill: Option<&str>,
    ) -> Result<Self, Error> {
        let kind = decoration.canonical()?;
        let size = context.size();
        let (view_box, marker_size, reference, shape) = outline(kind, size)?;

        let (fill, stroke) = if kind.is_hollow() {
            (defaults::OPEN_MARKER_FILL.to_string(), defaults::MARKER_STROKE.to_string())
        } else {
            let fill = fill.unwrap_or(context.default_fill()).to_string();
            (fill.clone(), fill)
        };

        let marker = MarkerGeometry {
            kind,
            context,
            serial: next_marker_id(),
            view_box,
            marker_size,
            reference,
            shape,
            fill,
            stroke,
        };
        debug!(id = %marker.id(), %decoration, "generated marker");
        Ok(marker)
    }

    /// Identifier referenced by `url(#...)`
    pub fn id(&self) -> String {
        match self.context {
            MarkerContext::LineEnding => format!("{}-{}", self.kind.name(), self.serial),
            MarkerContext::Arrowhead => self.kind.name().to_string(),
        }
    }
}

/// View box, marker size, reference point and primitive for `kind` at `size`
fn outline(
    kind: GeometryKind,
    size: ExactDecimal,
) -> Result<(Size, Size, Point, MarkerShape), ArithmeticError> {
    let marker_size = Size::new(size, size);
    Ok(match kind {
        GeometryKind::Triangle => {
            let side = ExactDecimal::from(defaults::TRIANGLE_BOX);
            let mid = side.half()?;
            let path = PathData::new().m(0, 0).l(side, mid).l(0, side).z();
            (Size::new(side, side), marker_size, Point::new(side, mid), MarkerShape::Path(path))
        }
        GeometryKind::Reverse => {
            let side = ExactDecimal::from(defaults::TRIANGLE_BOX);
            let mid = side.half()?;
            let path = PathData::new().m(side, 0).l(0, mid).l(side, side).z();
            (
                Size::new(side, side),
                marker_size,
                Point::new(ExactDecimal::ZERO, mid),
                MarkerShape::Path(path),
            )
        }
        GeometryKind::Square => {
            let mid = size.half()?;
            let path = PathData::new().m(0, 0).l(size, 0).l(size, size).l(0, size).z();
            (marker_size, marker_size, Point::new(mid, mid), MarkerShape::Path(path))
        }
        GeometryKind::Diamond => {
            // a square of side `size` turned 45 degrees spans its diagonal
            let root_two = ExactDecimal::from(2).sqrt(defaults::MARKER_SCALE)?;
            let diagonal = size.mul(&root_two)?;
            let mid = diagonal.half()?;
            let path = PathData::new()
                .m(mid, 0)
                .l(diagonal, mid)
                .l(mid, diagonal)
                .l(0, mid)
                .z();
            let bounds = Size::new(diagonal, diagonal);
            (bounds, bounds, Point::new(mid, mid), MarkerShape::Path(path))
        }
        GeometryKind::Dot | GeometryKind::OpenDot => {
            let radius = size.half()?;
            let center = Point::new(radius, radius);
            (
                marker_size,
                marker_size,
                center,
                MarkerShape::Circle { center, radius },
            )
        }
    })
}
