//! Layout and rendering options

use crate::decimal::{ExactDecimal, MAX_SCALE};
use crate::defaults;

/// Tunables for a [`Drawing`](crate::Drawing); `Default` mirrors [`defaults`].
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutOptions {
    /// Fractional digits kept for explicit geometry
    pub resolution_scale: u32,
    /// Implicit width per text character
    pub text_char_width: ExactDecimal,
    /// Stroke color of lines without an explicit stroke
    pub line_stroke: String,
    /// Fill of arrowheads added without a color
    pub arrowhead_fill: String,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            resolution_scale: defaults::RESOLUTION_SCALE,
            text_char_width: defaults::TEXT_CHAR_WIDTH,
            line_stroke: defaults::LINE_STROKE.to_string(),
            arrowhead_fill: defaults::ARROWHEAD_FILL.to_string(),
        }
    }
}

impl LayoutOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamped to the 28 digits an [`ExactDecimal`] can hold
    pub fn with_resolution_scale(mut self, scale: u32) -> Self {
        self.resolution_scale = scale.min(MAX_SCALE);
        self
    }

    pub fn with_text_char_width(mut self, width: ExactDecimal) -> Self {
        self.text_char_width = width;
        self
    }

    pub fn with_line_stroke(mut self, stroke: impl Into<String>) -> Self {
        self.line_stroke = stroke.into();
        self
    }

    pub fn with_arrowhead_fill(mut self, fill: impl Into<String>) -> Self {
        self.arrowhead_fill = fill.into();
        self
    }
}
