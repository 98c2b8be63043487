//! Markup output
//!
//! - `path`: path data for marker outlines
//! - `markup`: `svg` crate element nodes, the quote-aware writer and escaping
//!
//! [`render`] walks a resolved drawing and emits one element per shape, with
//! a `<defs>` block for line decorations first.

mod markup;
mod path;

pub use markup::{Element, Quote, SvgWriter, escape};
pub use path::PathData;

use crate::drawing::{Drawing, ShapeNode};
use crate::errors::Result;
use crate::graph::ShapeId;
use crate::layout::Layout;
use crate::log::debug;
use crate::marker::{MarkerGeometry, MarkerShape};
use crate::shape::{ShapeGeometry, ShapeKind, Text};

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// The two output flavors
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// `'`-quoted; root size only for dimensions the drawing has; rectangles
    /// are drawn around their center and translated into place
    Natural,
    /// `"`-quoted; root always sized; rectangles placed by their corner
    Dimensioned,
}

impl RenderMode {
    pub fn quote(self) -> Quote {
        match self {
            RenderMode::Natural => Quote::Single,
            RenderMode::Dimensioned => Quote::Double,
        }
    }
}

pub(crate) fn render(drawing: &Drawing, mode: RenderMode) -> Result<String> {
    let layout = drawing.layout()?;
    let nodes = drawing.nodes();
    let frame = layout.frame;

    let (width, height) = match mode {
        RenderMode::Natural => (
            drawing.requested_width().map(|_| frame.width),
            drawing.requested_height().map(|_| frame.height),
        ),
        RenderMode::Dimensioned => (Some(frame.width), Some(frame.height)),
    };

    let mut writer = SvgWriter::new(mode.quote());
    writer.open(
        &Element::new("svg")
            .attr("xmlns", SVG_NAMESPACE)
            .attr_opt("width", width)
            .attr_opt("height", height)
            .attr("viewBox", format!("0 0 {} {}", frame.width, frame.height)),
    );

    let markers: Vec<&MarkerGeometry> = drawing
        .shapes()
        .filter_map(|id| nodes[id.index()].kind.as_line())
        .flat_map(|line| line.decorations().map(|(_, marker)| marker))
        .collect();
    if !markers.is_empty() {
        writer.open(&Element::new("defs"));
        for marker in &markers {
            write_marker(&mut writer, marker);
        }
        writer.close("defs");
    }

    let renderer = ShapeRenderer {
        drawing,
        nodes,
        layout: &layout,
        mode,
    };
    for id in drawing.shapes() {
        renderer.write(&mut writer, id)?;
        if let Some(label) = nodes[id.index()].label {
            renderer.write(&mut writer, label)?;
        }
    }

    writer.close("svg");
    debug!(?mode, markers = markers.len(), "rendered drawing");
    Ok(writer.finish())
}

fn write_marker(writer: &mut SvgWriter, marker: &MarkerGeometry) {
    writer.open(
        &Element::new("marker")
            .attr("id", marker.id())
            .attr(
                "viewBox",
                format!("0 0 {} {}", marker.view_box.width, marker.view_box.height),
            )
            .attr("refX", marker.reference.x())
            .attr("refY", marker.reference.y())
            .attr("markerWidth", marker.marker_size.width)
            .attr("markerHeight", marker.marker_size.height)
            .attr("orient", "auto"),
    );
    let primitive = match &marker.shape {
        MarkerShape::Path(path) => Element::new("path").attr("d", path),
        MarkerShape::Circle { center, radius } => Element::new("circle")
            .attr("cx", center.x())
            .attr("cy", center.y())
            .attr("r", radius),
    };
    writer.leaf(
        &primitive
            .attr("fill", &marker.fill)
            .attr("stroke", &marker.stroke),
    );
    writer.close("marker");
}

struct ShapeRenderer<'a> {
    drawing: &'a Drawing,
    nodes: &'a [ShapeNode],
    layout: &'a Layout,
    mode: RenderMode,
}

impl ShapeRenderer<'_> {
    fn write(&self, writer: &mut SvgWriter, id: ShapeId) -> Result<()> {
        let node = &self.nodes[id.index()];
        let fill = node.style.fill.as_deref();
        let stroke = node.style.stroke.as_deref();

        if node.kind.as_text().is_some_and(Text::is_empty) {
            return Ok(());
        }
        let element = Element::new(node.kind.element_name());

        let element = match &node.kind {
            ShapeKind::Circle(_) => {
                let bounds = self.layout.bounds(self.nodes, id)?;
                let center = bounds.center()?;
                element
                    .attr("cx", center.x())
                    .attr("cy", center.y())
                    .attr("r", bounds.width.half()?)
            }
            ShapeKind::Rectangle(_) => {
                let bounds = self.layout.bounds(self.nodes, id)?;
                match self.mode {
                    RenderMode::Dimensioned => element
                        .attr("x", bounds.x)
                        .attr("y", bounds.y)
                        .attr("width", bounds.width)
                        .attr("height", bounds.height),
                    RenderMode::Natural => {
                        let center = bounds.center()?;
                        element
                            .attr("x", bounds.width.half()?.negate())
                            .attr("y", bounds.height.half()?.negate())
                            .attr("width", bounds.width)
                            .attr("height", bounds.height)
                            .attr(
                                "transform",
                                format!("translate({} {})", center.x(), center.y()),
                            )
                    }
                }
            }
            ShapeKind::Line(line) => {
                let (start, end) = self.layout.line_endpoints(self.nodes, line.route())?;
                let stroke = stroke.unwrap_or(&self.drawing.options().line_stroke);
                let mut element = element
                    .attr("x1", start.x())
                    .attr("y1", start.y())
                    .attr("x2", end.x())
                    .attr("y2", end.y())
                    .attr_opt("fill", fill)
                    .attr("stroke", stroke);
                for (line_end, marker) in line.decorations() {
                    element = element.attr(line_end.attribute(), format!("url(#{})", marker.id()));
                }
                writer.leaf(&element);
                return Ok(());
            }
            ShapeKind::Text(text) => {
                let bounds = self.layout.bounds(self.nodes, id)?;
                let center = bounds.center()?;
                let element = element
                    .attr("x", center.x())
                    .attr("y", center.y())
                    .attr("text-anchor", "middle")
                    .attr("dominant-baseline", "middle")
                    .attr("font-size", bounds.height)
                    .attr_opt("fill", fill)
                    .attr_opt("stroke", stroke)
                    .with_content(text.content().unwrap_or_default());
                writer.leaf(&element);
                return Ok(());
            }
        };

        writer.leaf(&element.attr_opt("fill", fill).attr_opt("stroke", stroke));
        Ok(())
    }
}
