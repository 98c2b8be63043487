//! Markup writer
//!
//! Elements and their attributes are held in `svg` crate nodes. Serialization
//! is done here: one element per line, two spaces of indentation per nesting
//! level, attributes in a fixed order and quoted with a single configurable
//! delimiter.

use std::fmt::Display;

use svg::Node;
use svg::node::element::Element as SvgElement;

/// Attribute delimiter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quote {
    Single,
    Double,
}

impl Quote {
    pub fn char(self) -> char {
        match self {
            Quote::Single => '\'',
            Quote::Double => '"',
        }
    }

    fn entity(self) -> &'static str {
        match self {
            Quote::Single => "&apos;",
            Quote::Double => "&quot;",
        }
    }
}

/// Escape markup-significant characters plus the active quote
pub fn escape(s: &str, quote: Quote) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            c if c == quote.char() => result.push_str(quote.entity()),
            c => result.push(c),
        }
    }
    result
}

/// Output position of known attributes; anything else follows, by name.
const ATTRIBUTE_ORDER: &[&str] = &[
    "xmlns",
    "id",
    "x",
    "y",
    "x1",
    "y1",
    "x2",
    "y2",
    "cx",
    "cy",
    "r",
    "d",
    "width",
    "height",
    "viewBox",
    "refX",
    "refY",
    "markerWidth",
    "markerHeight",
    "orient",
    "text-anchor",
    "dominant-baseline",
    "font-size",
    "transform",
    "fill",
    "stroke",
    "marker-start",
    "marker-end",
];

fn attribute_rank(name: &str) -> usize {
    ATTRIBUTE_ORDER
        .iter()
        .position(|known| *known == name)
        .unwrap_or(ATTRIBUTE_ORDER.len())
}

/// An element with its attributes and optional text content, not yet written
#[derive(Debug)]
pub struct Element {
    node: SvgElement,
    content: Option<String>,
}

impl Element {
    pub fn new(name: &str) -> Self {
        Self {
            node: SvgElement::new(name),
            content: None,
        }
    }

    pub fn attr(mut self, name: &str, value: impl Display) -> Self {
        self.node.assign(name, value.to_string());
        self
    }

    /// Add the attribute only when `value` is present
    pub fn attr_opt(self, name: &str, value: Option<impl Display>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Character data written between the tags
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn name(&self) -> &str {
        self.node.get_name()
    }

    /// Attributes in output order
    pub fn attributes(&self) -> Vec<(String, String)> {
        let mut attributes: Vec<(String, String)> = self
            .node
            .get_attributes()
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        attributes.sort_by(|(a, _), (b, _)| {
            attribute_rank(a)
                .cmp(&attribute_rank(b))
                .then_with(|| a.cmp(b))
        });
        attributes
    }
}

#[derive(Debug)]
pub struct SvgWriter {
    out: String,
    quote: Quote,
    depth: usize,
}

impl SvgWriter {
    pub fn new(quote: Quote) -> Self {
        Self {
            out: String::new(),
            quote,
            depth: 0,
        }
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
    }

    fn start_tag(&mut self, element: &Element) {
        self.indent();
        self.out.push('<');
        self.out.push_str(element.name());
        let q = self.quote.char();
        for (name, value) in element.attributes() {
            self.out.push(' ');
            self.out.push_str(&name);
            self.out.push('=');
            self.out.push(q);
            self.out.push_str(&escape(&value, self.quote));
            self.out.push(q);
        }
    }

    /// `<name ...>` on its own line; children follow one level deeper
    pub fn open(&mut self, element: &Element) {
        self.start_tag(element);
        self.out.push_str(">\n");
        self.depth += 1;
    }

    pub fn close(&mut self, name: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push_str(">\n");
    }

    /// A leaf element: self-closing, or `<name ...>content</name>` when it
    /// carries text
    pub fn leaf(&mut self, element: &Element) {
        self.start_tag(element);
        match &element.content {
            Some(content) => {
                self.out.push('>');
                self.out.push_str(&escape(content, self.quote));
                self.out.push_str("</");
                self.out.push_str(element.name());
                self.out.push_str(">\n");
            }
            None => self.out.push_str("/>\n"),
        }
    }

    pub fn finish(self) -> String {
        self.out
    }
}
