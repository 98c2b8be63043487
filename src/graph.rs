//! Relative-position constraint graph.
//!
//! Shapes are nodes addressed by [`ShapeId`]. Each node holds at most one
//! anchor per axis: "I am right of / left of `target`" on the horizontal axis,
//! "I am above / below `target`" on the vertical one. Implicit positions are
//! derived from the anchors on demand; the graph itself never stores
//! coordinates, so it stays valid no matter when shapes join a drawing or when
//! the drawing's dimensions change.

use std::fmt;

use crate::decimal::ExactDecimal;
use crate::errors::{Result, UnsupportedOperation};
use crate::types::{Measure, Size, Span};

/// Handle to a shape stored in a [`Drawing`](crate::Drawing)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub(crate) usize);

impl ShapeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

    fn index(self) -> usize {
        match self {
            Axis::Horizontal => 0,
            Axis::Vertical => 1,
        }
    }

    pub fn other(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Extent of `size` along this axis
    pub fn extent(self, size: &Size) -> ExactDecimal {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => write!(f, "horizontal"),
            Axis::Vertical => write!(f, "vertical"),
        }
    }
}

/// Direction of an adjacency edge, read as "source is <relation> target"
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Relation {
    RightOf,
    LeftOf,
    Above,
    Below,
}

impl Relation {
    pub fn axis(self) -> Axis {
        match self {
            Relation::RightOf | Relation::LeftOf => Axis::Horizontal,
            Relation::Above | Relation::Below => Axis::Vertical,
        }
    }

    /// Whether the source sits at a larger coordinate than its target (y grows downward)
    fn is_forward(self) -> bool {
        matches!(self, Relation::RightOf | Relation::Below)
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::RightOf => write!(f, "right of"),
            Relation::LeftOf => write!(f, "left of"),
            Relation::Above => write!(f, "above"),
            Relation::Below => write!(f, "below"),
        }
    }
}

/// One adjacency edge
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    pub relation: Relation,
    pub target: ShapeId,
    pub gap: Measure,
}

#[derive(Clone, Copy, Debug)]
enum Visit {
    Pending,
    Done(Span),
}

/// Anchors per node, indexed by [`ShapeId`]
#[derive(Clone, Debug, Default)]
pub struct ConstraintGraph {
    anchors: Vec<[Option<Anchor>; 2]>,
}

impl ConstraintGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self) -> ShapeId {
        self.anchors.push([None, None]);
        ShapeId(self.anchors.len() - 1)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        id.0 < self.anchors.len()
    }

    pub fn anchor(&self, id: ShapeId, axis: Axis) -> Option<&Anchor> {
        self.anchors.get(id.0).and_then(|slots| slots[axis.index()].as_ref())
    }

    /// Record "`source` is `relation` `target`", replacing any anchor `source`
    /// already had on that axis.
    ///
    /// The graph is left untouched when the call fails.
    pub fn set(
        &mut self,
        source: ShapeId,
        relation: Relation,
        target: ShapeId,
        gap: Measure,
    ) -> Result<()> {
        if source == target {
            return Err(UnsupportedOperation::SelfAdjacency { relation }.into());
        }
        for id in [source, target] {
            if !self.contains(id) {
                return Err(UnsupportedOperation::UnknownShape { id: id.0 }.into());
            }
        }

        let axis = relation.axis();
        let reversed = self
            .anchor(target, axis)
            .is_some_and(|anchor| anchor.target == source);
        if reversed {
            crate::log::trace!(%source, %target, "replacing reverse anchor");
            self.anchors[target.0][axis.index()] = None;
        } else if self.reaches(target, source, axis) {
            return Err(UnsupportedOperation::ConstraintCycle.into());
        }

        self.anchors[source.0][axis.index()] = Some(Anchor {
            relation,
            target,
            gap,
        });
        Ok(())
    }

    /// Follow same-axis anchors from `from`, looking for `to`
    fn reaches(&self, from: ShapeId, to: ShapeId, axis: Axis) -> bool {
        let mut current = from;
        for _ in 0..self.anchors.len() {
            match self.anchor(current, axis) {
                Some(anchor) if anchor.target == to => return true,
                Some(anchor) => current = anchor.target,
                None => return false,
            }
        }
        false
    }

    /// Implicit center of every node as `[horizontal, vertical]` spans.
    ///
    /// `sizes[i]` is node `i`'s implicit size. A node anchored on one axis only
    /// shares its target's coordinate on the other axis; unanchored nodes sit at
    /// the origin.
    pub fn resolve(&self, sizes: &[Size]) -> Result<Vec<[Span; 2]>> {
        let mut visits: Vec<[Option<Visit>; 2]> = vec![[None, None]; self.anchors.len()];
        let mut centers = Vec::with_capacity(self.anchors.len());
        for index in 0..self.anchors.len() {
            let id = ShapeId(index);
            centers.push([
                self.place(id, Axis::Horizontal, sizes, &mut visits)?,
                self.place(id, Axis::Vertical, sizes, &mut visits)?,
            ]);
        }
        Ok(centers)
    }

    fn place(
        &self,
        id: ShapeId,
        axis: Axis,
        sizes: &[Size],
        visits: &mut [[Option<Visit>; 2]],
    ) -> Result<Span> {
        match visits[id.0][axis.index()] {
            Some(Visit::Done(span)) => return Ok(span),
            Some(Visit::Pending) => return Err(UnsupportedOperation::ConstraintCycle.into()),
            None => {}
        }
        visits[id.0][axis.index()] = Some(Visit::Pending);

        let span = if let Some(anchor) = self.anchor(id, axis) {
            let base = self.place(anchor.target, axis, sizes, visits)?;
            let extent = |node: ShapeId| {
                sizes
                    .get(node.0)
                    .map(|size| axis.extent(size))
                    .unwrap_or(ExactDecimal::ONE)
            };
            let clearance = extent(id).checked_add(&extent(anchor.target))?.half()?;
            let delta = Span::default().shifted(clearance, anchor.gap)?;
            if anchor.relation.is_forward() {
                base.checked_add(&delta)?
            } else {
                base.checked_sub(&delta)?
            }
        } else if let Some(anchor) = self.anchor(id, axis.other()) {
            self.place(anchor.target, axis, sizes, visits)?
        } else {
            Span::default()
        };

        visits[id.0][axis.index()] = Some(Visit::Done(span));
        Ok(span)
    }
}
