//! The drawing: shape arena, constraint graph, dimensions and the cached layout.

use std::cell::{Ref, RefCell};

use crate::decimal::ExactDecimal;
use crate::errors::{Result, UnsupportedOperation};
use crate::graph::{Axis, ConstraintGraph, Relation, ShapeId};
use crate::layout::{Layout, LayoutInput};
use crate::log::{debug, trace};
use crate::marker::{DecorationType, MarkerContext, MarkerGeometry};
use crate::options::LayoutOptions;
use crate::render::{self, RenderMode};
use crate::shape::{LineEnd, ShapeGeometry, ShapeKind, Style, Text};
use crate::types::{Measure, Point, Port};

/// One shape in the arena
#[derive(Clone, Debug)]
pub(crate) struct ShapeNode {
    pub kind: ShapeKind,
    pub style: Style,
    /// Text label centered on this shape
    pub label: Option<ShapeId>,
    /// Shape this node is a label of
    pub parent: Option<ShapeId>,
}

impl ShapeNode {
    fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            style: Style::default(),
            label: None,
            parent: None,
        }
    }
}

/// Root container of a diagram.
///
/// Shapes live in an arena owned by the drawing and are addressed by
/// [`ShapeId`]. Constraints, dimensions and decorations can be declared in any
/// order; explicit geometry is resolved on the first read after a change and
/// cached until the next one.
///
/// ```
/// use tacitsvg::{Circle, Drawing};
///
/// let mut drawing = Drawing::new();
/// let a = drawing.add(Circle::new());
/// let b = drawing.add(Circle::new());
/// drawing.set_right_of(b, a)?;
/// drawing.set_explicit_dimensions(100, 50)?;
///
/// let b = drawing.shape(b)?;
/// assert_eq!(b.explicit_x()?, 50);
/// assert_eq!(b.explicit_width()?, 50);
/// # Ok::<(), tacitsvg::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct Drawing {
    nodes: Vec<ShapeNode>,
    graph: ConstraintGraph,
    /// Top-level shapes in insertion order
    order: Vec<ShapeId>,
    dimensions: [Option<ExactDecimal>; 2],
    options: LayoutOptions,
    generation: u64,
    layout: RefCell<Layout>,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: LayoutOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    fn invalidate(&mut self) {
        self.generation += 1;
        trace!(generation = self.generation, "layout invalidated");
    }

    fn node(&self, id: ShapeId) -> Result<&ShapeNode> {
        self.nodes
            .get(id.index())
            .ok_or_else(|| UnsupportedOperation::UnknownShape { id: id.index() }.into())
    }

    fn node_mut(&mut self, id: ShapeId) -> Result<&mut ShapeNode> {
        self.nodes
            .get_mut(id.index())
            .ok_or_else(|| UnsupportedOperation::UnknownShape { id: id.index() }.into())
    }

    // ========================================================================
    // Shapes
    // ========================================================================

    /// Put a shape in the arena without adding it to the drawing's content.
    ///
    /// The shape can take part in constraints right away and be added later
    /// with [`add_shape`](Self::add_shape).
    pub fn create(&mut self, kind: impl Into<ShapeKind>) -> ShapeId {
        let id = self.graph.add_node();
        self.nodes.push(ShapeNode::new(kind.into()));
        self.invalidate();
        id
    }

    /// Add a created shape to the drawing's content; adding it again is a no-op
    pub fn add_shape(&mut self, id: ShapeId) -> Result<()> {
        self.node(id)?;
        if !self.order.contains(&id) {
            self.order.push(id);
            self.invalidate();
        }
        Ok(())
    }

    /// [`create`](Self::create) and [`add_shape`](Self::add_shape) in one step
    pub fn add(&mut self, kind: impl Into<ShapeKind>) -> ShapeId {
        let id = self.create(kind);
        self.order.push(id);
        id
    }

    /// Top-level shapes in insertion order
    pub fn shapes(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.order.iter().copied()
    }

    pub fn kind(&self, id: ShapeId) -> Result<&ShapeKind> {
        Ok(&self.node(id)?.kind)
    }

    /// Read access to one shape's geometry
    pub fn shape(&self, id: ShapeId) -> Result<ShapeRef<'_>> {
        self.node(id)?;
        Ok(ShapeRef { drawing: self, id })
    }

    pub fn set_fill(&mut self, id: ShapeId, fill: impl Into<String>) -> Result<()> {
        self.node_mut(id)?.style.fill = Some(fill.into());
        self.invalidate();
        Ok(())
    }

    pub fn set_stroke(&mut self, id: ShapeId, stroke: impl Into<String>) -> Result<()> {
        self.node_mut(id)?.style.stroke = Some(stroke.into());
        self.invalidate();
        Ok(())
    }

    /// Attach a text label centered on `parent`, replacing any previous label
    pub fn add_text(&mut self, parent: ShapeId, content: impl Into<String>) -> Result<ShapeId> {
        self.node(parent)?;
        let label = self.create(Text::new(content));
        self.nodes[label.index()].parent = Some(parent);
        self.nodes[parent.index()].label = Some(label);
        Ok(label)
    }

    // ========================================================================
    // Constraints
    // ========================================================================

    /// Record "`source` is `relation` `target`" separated by `gap`
    pub fn constrain(
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
            if !self.node(id)?.kind.participates_in_layout() {
                return Err(UnsupportedOperation::LineConstraint.into());
            }
        }
        self.graph.set(source, relation, target, gap)?;
        debug!(%source, %relation, %target, %gap, "constraint added");
        self.invalidate();
        Ok(())
    }

    pub fn set_right_of(&mut self, source: ShapeId, target: ShapeId) -> Result<()> {
        self.constrain(source, Relation::RightOf, target, Measure::default())
    }

    pub fn set_right_of_with_gap(
        &mut self,
        source: ShapeId,
        target: ShapeId,
        gap: Measure,
    ) -> Result<()> {
        self.constrain(source, Relation::RightOf, target, gap)
    }

    pub fn set_left_of(&mut self, source: ShapeId, target: ShapeId) -> Result<()> {
        self.constrain(source, Relation::LeftOf, target, Measure::default())
    }

    pub fn set_left_of_with_gap(
        &mut self,
        source: ShapeId,
        target: ShapeId,
        gap: Measure,
    ) -> Result<()> {
        self.constrain(source, Relation::LeftOf, target, gap)
    }

    pub fn set_above(&mut self, source: ShapeId, target: ShapeId) -> Result<()> {
        self.constrain(source, Relation::Above, target, Measure::default())
    }

    pub fn set_above_with_gap(
        &mut self,
        source: ShapeId,
        target: ShapeId,
        gap: Measure,
    ) -> Result<()> {
        self.constrain(source, Relation::Above, target, gap)
    }

    pub fn set_below(&mut self, source: ShapeId, target: ShapeId) -> Result<()> {
        self.constrain(source, Relation::Below, target, Measure::default())
    }

    pub fn set_below_with_gap(
        &mut self,
        source: ShapeId,
        target: ShapeId,
        gap: Measure,
    ) -> Result<()> {
        self.constrain(source, Relation::Below, target, gap)
    }

    // ========================================================================
    // Decorations
    // ========================================================================

    fn decorate(&mut self, line: ShapeId, end: LineEnd, marker: MarkerGeometry) -> Result<()> {
        let ShapeKind::Line(shape) = &mut self.node_mut(line)?.kind else {
            return Err(UnsupportedOperation::NotALine.into());
        };
        shape.set_decoration(end, marker);
        self.invalidate();
        Ok(())
    }

    /// Attach a line-ending marker to one end of `line`
    pub fn add_line_ending(
        &mut self,
        line: ShapeId,
        end: LineEnd,
        decoration: DecorationType,
    ) -> Result<()> {
        if !matches!(self.node(line)?.kind, ShapeKind::Line(_)) {
            return Err(UnsupportedOperation::NotALine.into());
        }
        let marker = MarkerGeometry::generate(decoration, MarkerContext::LineEnding, None)?;
        self.decorate(line, end, marker)
    }

    /// Attach an arrowhead to the end of `line`, filled with the configured
    /// arrowhead color
    pub fn add_arrowhead(&mut self, line: ShapeId, decoration: DecorationType) -> Result<()> {
        let fill = self.options.arrowhead_fill.clone();
        self.add_arrowhead_with_fill(line, decoration, &fill)
    }

    pub fn add_arrowhead_with_fill(
        &mut self,
        line: ShapeId,
        decoration: DecorationType,
        fill: &str,
    ) -> Result<()> {
        if !matches!(self.node(line)?.kind, ShapeKind::Line(_)) {
            return Err(UnsupportedOperation::NotALine.into());
        }
        let marker = MarkerGeometry::generate(decoration, MarkerContext::Arrowhead, Some(fill))?;
        self.decorate(line, LineEnd::End, marker)
    }

    // ========================================================================
    // Dimensions
    // ========================================================================

    fn set_dimension(&mut self, axis: Axis, value: ExactDecimal) -> Result<()> {
        if !value.is_positive() {
            return Err(UnsupportedOperation::NonPositiveDimension { axis }.into());
        }
        let slot = match axis {
            Axis::Horizontal => &mut self.dimensions[0],
            Axis::Vertical => &mut self.dimensions[1],
        };
        *slot = Some(value);
        debug!(%axis, %value, "explicit dimension set");
        self.invalidate();
        Ok(())
    }

    pub fn set_explicit_width(&mut self, width: impl Into<ExactDecimal>) -> Result<()> {
        self.set_dimension(Axis::Horizontal, width.into())
    }

    pub fn set_explicit_height(&mut self, height: impl Into<ExactDecimal>) -> Result<()> {
        self.set_dimension(Axis::Vertical, height.into())
    }

    /// Set both dimensions; neither changes if either is invalid
    pub fn set_explicit_dimensions(
        &mut self,
        width: impl Into<ExactDecimal>,
        height: impl Into<ExactDecimal>,
    ) -> Result<()> {
        let (width, height) = (width.into(), height.into());
        if !width.is_positive() {
            return Err(UnsupportedOperation::NonPositiveDimension {
                axis: Axis::Horizontal,
            }
            .into());
        }
        self.set_dimension(Axis::Vertical, height)?;
        self.set_dimension(Axis::Horizontal, width)
    }

    /// The width set by the caller, if any
    pub fn requested_width(&self) -> Option<ExactDecimal> {
        self.dimensions[0]
    }

    /// The height set by the caller, if any
    pub fn requested_height(&self) -> Option<ExactDecimal> {
        self.dimensions[1]
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Shapes that take space in the drawing: top-level, not lines, not labels
    fn participants(&self) -> Vec<ShapeId> {
        self.order
            .iter()
            .copied()
            .filter(|id| {
                let node = &self.nodes[id.index()];
                node.parent.is_none() && node.kind.participates_in_layout()
            })
            .collect()
    }

    /// The layout for the current generation, computed on demand
    pub(crate) fn layout(&self) -> Result<Ref<'_, Layout>> {
        let current = self.layout.borrow().generation == Some(self.generation);
        if !current {
            let layout = Layout::compute(LayoutInput {
                nodes: &self.nodes,
                graph: &self.graph,
                participants: self.participants(),
                dimensions: self.dimensions,
                options: &self.options,
                generation: self.generation,
            })?;
            *self.layout.borrow_mut() = layout;
        }
        Ok(self.layout.borrow())
    }

    pub(crate) fn nodes(&self) -> &[ShapeNode] {
        &self.nodes
    }

    /// Explicit width of the drawing's frame
    pub fn explicit_width(&self) -> Result<ExactDecimal> {
        Ok(self.layout()?.frame.width)
    }

    /// Explicit height of the drawing's frame
    pub fn explicit_height(&self) -> Result<ExactDecimal> {
        Ok(self.layout()?.frame.height)
    }

    /// Implicit width of the content, 1 for an empty drawing
    pub fn implicit_width(&self) -> Result<ExactDecimal> {
        Ok(self.layout()?.implicit_extent.width)
    }

    /// Implicit height of the content, 1 for an empty drawing
    pub fn implicit_height(&self) -> Result<ExactDecimal> {
        Ok(self.layout()?.implicit_extent.height)
    }

    /// Explicit units per implicit unit, truncated to the resolution scale
    pub fn ratio(&self) -> Result<ExactDecimal> {
        let layout = self.layout()?;
        layout.ratio.value(self.options.resolution_scale)
    }

    // ========================================================================
    // Output
    // ========================================================================

    /// Markup at the drawing's current size, `'`-quoted
    pub fn render(&self) -> Result<String> {
        render::render(self, RenderMode::Natural)
    }

    /// Fix both dimensions, then produce `"`-quoted markup
    pub fn render_with_dimensions(
        &mut self,
        width: impl Into<ExactDecimal>,
        height: impl Into<ExactDecimal>,
    ) -> Result<String> {
        self.set_explicit_dimensions(width, height)?;
        render::render(self, RenderMode::Dimensioned)
    }
}

/// A shape viewed through its drawing
#[derive(Clone, Copy, Debug)]
pub struct ShapeRef<'a> {
    drawing: &'a Drawing,
    id: ShapeId,
}

impl<'a> ShapeRef<'a> {
    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> &'a ShapeKind {
        &self.drawing.nodes[self.id.index()].kind
    }

    pub fn style(&self) -> &'a Style {
        &self.drawing.nodes[self.id.index()].style
    }

    pub fn label(&self) -> Option<ShapeId> {
        self.drawing.nodes[self.id.index()].label
    }

    fn bounds(&self) -> Result<crate::types::Bounds> {
        let layout = self.drawing.layout()?;
        layout.bounds(&self.drawing.nodes, self.id)
    }

    pub fn implicit_width(&self) -> Result<ExactDecimal> {
        Ok(self.drawing.layout()?.implicit_size(self.id).width)
    }

    pub fn implicit_height(&self) -> Result<ExactDecimal> {
        Ok(self.drawing.layout()?.implicit_size(self.id).height)
    }

    pub fn implicit_x_center(&self) -> Result<ExactDecimal> {
        Ok(self.drawing.layout()?.implicit_center(self.id).x())
    }

    pub fn implicit_y_center(&self) -> Result<ExactDecimal> {
        Ok(self.drawing.layout()?.implicit_center(self.id).y())
    }

    pub fn explicit_width(&self) -> Result<ExactDecimal> {
        Ok(self.bounds()?.width)
    }

    pub fn explicit_height(&self) -> Result<ExactDecimal> {
        Ok(self.bounds()?.height)
    }

    /// Left edge
    pub fn explicit_x(&self) -> Result<ExactDecimal> {
        Ok(self.bounds()?.x)
    }

    /// Top edge
    pub fn explicit_y(&self) -> Result<ExactDecimal> {
        Ok(self.bounds()?.y)
    }

    pub fn explicit_center(&self) -> Result<Point> {
        Ok(self.bounds()?.center()?)
    }

    pub fn port(&self, port: Port) -> Result<Point> {
        Ok(self.bounds()?.port(port)?)
    }

    pub fn left_port(&self) -> Result<Point> {
        self.port(Port::Left)
    }

    pub fn right_port(&self) -> Result<Point> {
        self.port(Port::Right)
    }

    pub fn top_port(&self) -> Result<Point> {
        self.port(Port::Top)
    }

    pub fn bottom_port(&self) -> Result<Point> {
        self.port(Port::Bottom)
    }

    /// Resolved endpoints, for lines only
    pub fn line_endpoints(&self) -> Result<(Point, Point)> {
        let ShapeKind::Line(line) = self.kind() else {
            return Err(UnsupportedOperation::NotALine.into());
        };
        let layout = self.drawing.layout()?;
        layout.line_endpoints(&self.drawing.nodes, line.route())
    }
}
