//! Implicit-to-explicit resolution.
//!
//! A [`Layout`] is the memoized result of one resolution pass over a drawing:
//! the drawing ratio, the frame, and the explicit bounds of every shape, filled
//! in lazily as they are requested. A layout is tagged with the generation of
//! the drawing it was computed from and is thrown away as soon as the drawing
//! changes.

use std::cell::RefCell;

use crate::decimal::ExactDecimal;
use crate::drawing::ShapeNode;
use crate::errors::{Result, UnsupportedOperation};
use crate::graph::{Axis, ConstraintGraph, ShapeId};
use crate::log::{debug, trace};
use crate::options::LayoutOptions;
use crate::shape::{Endpoint, LineRoute, Orientation, ShapeGeometry, ShapeKind};
use crate::types::{Bounds, Point, Size, Span};

/// Implicit-to-explicit multiplier, kept as an exact fraction so that
/// `value * num / den` is only truncated once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Ratio {
    num: ExactDecimal,
    den: ExactDecimal,
}

impl Ratio {
    pub const ONE: Ratio = Ratio {
        num: ExactDecimal::ONE,
        den: ExactDecimal::ONE,
    };

    /// `num / den`; `den` must be positive
    fn new(num: ExactDecimal, den: ExactDecimal) -> Self {
        Ratio { num, den }
    }

    fn is_below(&self, other: &Ratio) -> Result<bool> {
        Ok(self.num.mul(&other.den)? < other.num.mul(&self.den)?)
    }

    fn min(self, other: Ratio) -> Result<Ratio> {
        Ok(if other.is_below(&self)? { other } else { self })
    }

    /// `value * ratio` truncated to `scale` digits
    pub fn apply(&self, value: ExactDecimal, scale: u32) -> Result<ExactDecimal> {
        Ok(value.mul(&self.num)?.div(&self.den, scale)?)
    }

    pub fn value(&self, scale: u32) -> Result<ExactDecimal> {
        Ok(self.num.div(&self.den, scale)?)
    }
}

impl Default for Ratio {
    fn default() -> Self {
        Ratio::ONE
    }
}

/// Per-shape resolution state
#[derive(Clone, Copy, Debug)]
enum Slot {
    Unresolved,
    Pending,
    Done(Bounds),
}

/// Implicit interval `[lo, hi]` of a shape along one axis
#[derive(Clone, Copy, Debug)]
struct Interval {
    lo: Span,
    hi: Span,
}

/// Everything a resolution pass needs from the drawing
pub(crate) struct LayoutInput<'a> {
    pub nodes: &'a [ShapeNode],
    pub graph: &'a ConstraintGraph,
    pub participants: Vec<ShapeId>,
    pub dimensions: [Option<ExactDecimal>; 2],
    pub options: &'a LayoutOptions,
    pub generation: u64,
}

/// A resolution pass; the default value belongs to no generation and is
/// always recomputed.
#[derive(Debug, Default)]
pub(crate) struct Layout {
    pub generation: Option<u64>,
    pub ratio: Ratio,
    /// Explicit size of the drawing's frame
    pub frame: Size,
    /// Implicit extent of the participating content
    pub implicit_extent: Size,
    /// Whether any explicit dimension was set when this layout was computed
    pub dimensioned: bool,
    sizes: Vec<Size>,
    centers: Vec<[Span; 2]>,
    offset: [ExactDecimal; 2],
    scale: u32,
    slots: RefCell<Vec<Slot>>,
}

impl Layout {
    pub fn compute(input: LayoutInput<'_>) -> Result<Self> {
        let LayoutInput {
            nodes,
            graph,
            participants,
            dimensions,
            options,
            generation,
        } = input;
        let scale = options.resolution_scale;

        let sizes = nodes
            .iter()
            .map(|node| node.kind.implicit_size(options))
            .collect::<std::result::Result<Vec<Size>, _>>()?;
        let centers = graph.resolve(&sizes)?;

        let intervals = |axis: Axis| -> Result<Vec<Interval>> {
            participants
                .iter()
                .map(|id| -> Result<Interval> {
                    let center = centers[id.index()][axis_index(axis)];
                    let half = Span::implicit(axis.extent(&sizes[id.index()]).half()?);
                    Ok(Interval {
                        lo: center.checked_sub(&half)?,
                        hi: center.checked_add(&half)?,
                    })
                })
                .collect()
        };
        let per_axis = [intervals(Axis::Horizontal)?, intervals(Axis::Vertical)?];

        let implicit_extent = Size::new(extent_of(&per_axis[0])?, extent_of(&per_axis[1])?);

        let mut ratio: Option<Ratio> = None;
        for axis in Axis::ALL {
            if let Some(dimension) = dimensions[axis_index(axis)] {
                let candidate = fit_axis(&per_axis[axis_index(axis)], dimension, axis)?;
                trace!(%axis, %dimension, ?candidate, "axis ratio");
                ratio = Some(match ratio {
                    Some(current) => current.min(candidate)?,
                    None => candidate,
                });
            }
        }
        let dimensioned = ratio.is_some();
        let ratio = ratio.unwrap_or(Ratio::ONE);

        let explicit = |span: Span| -> Result<ExactDecimal> {
            Ok(ratio.apply(span.implicit, scale)?.checked_add(&span.explicit)?)
        };

        let mut frame = [ExactDecimal::ZERO; 2];
        let mut offset = [ExactDecimal::ZERO; 2];
        for axis in Axis::ALL {
            let i = axis_index(axis);
            let (content, middle) = match content_bounds(&per_axis[i], &explicit)? {
                Some((lo, hi)) => {
                    let extent = explicit(hi)?.checked_sub(&explicit(lo)?)?;
                    (extent, explicit(lo.middle(&hi)?)?)
                }
                None => (ratio.apply(ExactDecimal::ONE, scale)?, ExactDecimal::ZERO),
            };
            frame[i] = dimensions[i].unwrap_or(content);
            offset[i] = frame[i].half()?.checked_sub(&middle)?;
        }

        debug!(
            generation,
            ratio = ?ratio,
            width = %frame[0],
            height = %frame[1],
            "resolved drawing"
        );

        Ok(Layout {
            generation: Some(generation),
            ratio,
            frame: Size::new(frame[0], frame[1]),
            implicit_extent,
            dimensioned,
            slots: RefCell::new(vec![Slot::Unresolved; nodes.len()]),
            sizes,
            centers,
            offset,
            scale,
        })
    }

    pub fn implicit_size(&self, id: ShapeId) -> Size {
        self.sizes[id.index()]
    }

    /// Implicit center, ignoring explicit gaps
    pub fn implicit_center(&self, id: ShapeId) -> Point {
        let [x, y] = self.centers[id.index()];
        Point::new(x.implicit, y.implicit)
    }

    /// Explicit bounding box of `id`, resolving it (and whatever it refers to)
    /// on first use.
    pub fn bounds(&self, nodes: &[ShapeNode], id: ShapeId) -> Result<Bounds> {
        let node = nodes
            .get(id.index())
            .ok_or(UnsupportedOperation::UnknownShape { id: id.index() })?;
        if matches!(node.kind, ShapeKind::Text(_)) && !self.dimensioned {
            return Err(UnsupportedOperation::TextWithoutDimensions.into());
        }

        let slot = self.slots.borrow()[id.index()];
        match slot {
            Slot::Done(bounds) => return Ok(bounds),
            Slot::Pending => return Err(UnsupportedOperation::ConstraintCycle.into()),
            Slot::Unresolved => {}
        }
        self.slots.borrow_mut()[id.index()] = Slot::Pending;

        let resolved = self.resolve(nodes, id, node);
        let mut slots = self.slots.borrow_mut();
        match resolved {
            Ok(bounds) => {
                trace!(%id, x = %bounds.x, y = %bounds.y, "resolved shape");
                slots[id.index()] = Slot::Done(bounds);
                Ok(bounds)
            }
            Err(err) => {
                slots[id.index()] = Slot::Unresolved;
                Err(err)
            }
        }
    }

    fn resolve(&self, nodes: &[ShapeNode], id: ShapeId, node: &ShapeNode) -> Result<Bounds> {
        if let ShapeKind::Line(line) = &node.kind {
            let (start, end) = self.line_endpoints(nodes, line.route())?;
            return Ok(Bounds::spanning(&start, &end)?);
        }

        let implicit = self.sizes[id.index()];
        let size = Size::new(
            self.ratio.apply(implicit.width, self.scale)?,
            self.ratio.apply(implicit.height, self.scale)?,
        );
        let center = match node.parent {
            Some(parent) => self.bounds(nodes, parent)?.center()?,
            None => {
                let [x, y] = self.centers[id.index()];
                Point::new(self.place(x, 0)?, self.place(y, 1)?)
            }
        };
        Ok(Bounds::centered(&center, size)?)
    }

    /// Explicit coordinate of an implicit center along axis `i`
    fn place(&self, span: Span, i: usize) -> Result<ExactDecimal> {
        Ok(self
            .ratio
            .apply(span.implicit, self.scale)?
            .checked_add(&span.explicit)?
            .checked_add(&self.offset[i])?)
    }

    /// Resolved start and end points of a line
    pub fn line_endpoints(&self, nodes: &[ShapeNode], route: &LineRoute) -> Result<(Point, Point)> {
        match route {
            LineRoute::Between { start, end } => Ok((
                self.endpoint(nodes, start)?,
                self.endpoint(nodes, end)?,
            )),
            LineRoute::Oriented(orientation) => {
                let (w, h) = (self.frame.width, self.frame.height);
                let zero = ExactDecimal::ZERO;
                Ok(match orientation {
                    Orientation::Horizontal => {
                        let y = h.half()?;
                        (Point::new(zero, y), Point::new(w, y))
                    }
                    Orientation::Vertical => {
                        let x = w.half()?;
                        (Point::new(x, zero), Point::new(x, h))
                    }
                    Orientation::DiagonalDown => (Point::new(zero, zero), Point::new(w, h)),
                    Orientation::DiagonalUp => (Point::new(zero, h), Point::new(w, zero)),
                })
            }
        }
    }

    fn endpoint(&self, nodes: &[ShapeNode], endpoint: &Endpoint) -> Result<Point> {
        match *endpoint {
            Endpoint::Point(point) => Ok(point),
            Endpoint::Port(shape, port) => Ok(self.bounds(nodes, shape)?.port(port)?),
        }
    }
}

fn axis_index(axis: Axis) -> usize {
    match axis {
        Axis::Horizontal => 0,
        Axis::Vertical => 1,
    }
}

/// Implicit bounding extent, 1 when there is nothing to measure
fn extent_of(intervals: &[Interval]) -> Result<ExactDecimal> {
    let lo = intervals.iter().map(|i| i.lo.implicit).min();
    let hi = intervals.iter().map(|i| i.hi.implicit).max();
    Ok(match (lo, hi) {
        (Some(lo), Some(hi)) if hi > lo => hi.checked_sub(&lo)?,
        _ => ExactDecimal::ONE,
    })
}

/// Largest ratio that keeps every pair of intervals within `dimension`.
///
/// Without explicit gaps this is `dimension / implicit extent`.
fn fit_axis(intervals: &[Interval], dimension: ExactDecimal, axis: Axis) -> Result<Ratio> {
    let mut best: Option<Ratio> = None;
    for outer in intervals {
        for inner in intervals {
            let implicit = outer.hi.implicit.checked_sub(&inner.lo.implicit)?;
            let explicit = outer.hi.explicit.checked_sub(&inner.lo.explicit)?;
            if !implicit.is_positive() {
                if explicit > dimension {
                    return Err(UnsupportedOperation::GapsExceedDimensions { axis }.into());
                }
                continue;
            }
            let candidate = Ratio::new(dimension.checked_sub(&explicit)?, implicit);
            best = Some(match best {
                Some(current) => current.min(candidate)?,
                None => candidate,
            });
        }
    }

    let ratio = best.unwrap_or(Ratio::new(dimension, ExactDecimal::ONE));
    if !ratio.num.is_positive() {
        return Err(UnsupportedOperation::GapsExceedDimensions { axis }.into());
    }
    Ok(ratio)
}

/// Spans of the lowest and highest explicit edges among `intervals`
fn content_bounds(
    intervals: &[Interval],
    explicit: &impl Fn(Span) -> Result<ExactDecimal>,
) -> Result<Option<(Span, Span)>> {
    let mut lowest: Option<(ExactDecimal, Span)> = None;
    let mut highest: Option<(ExactDecimal, Span)> = None;
    for interval in intervals {
        let lo = explicit(interval.lo)?;
        if lowest.is_none_or(|(value, _)| lo < value) {
            lowest = Some((lo, interval.lo));
        }
        let hi = explicit(interval.hi)?;
        if highest.is_none_or(|(value, _)| hi > value) {
            highest = Some((hi, interval.hi));
        }
    }
    Ok(lowest.zip(highest).map(|((_, lo), (_, hi))| (lo, hi)))
}
