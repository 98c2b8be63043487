//! Default sizes and settings

use crate::decimal::ExactDecimal;

/// Fractional digits kept when implicit values are scaled into explicit space
pub const RESOLUTION_SCALE: u32 = 20;

/// Fractional digits kept for marker geometry involving irrational factors
pub const MARKER_SCALE: u32 = 6;

/// Implicit width of one text character, as a fraction of the line height
pub const TEXT_CHAR_WIDTH: ExactDecimal = ExactDecimal::new(6, 1);

/// Marker side for the legacy arrowhead decoration
pub const ARROWHEAD_SIZE: i64 = 6;

/// Marker side for endpoint line endings
pub const LINE_ENDING_SIZE: i64 = 4;

/// View box side of the triangular markers
pub const TRIANGLE_BOX: i64 = 10;

pub const LINE_STROKE: &str = "black";
pub const LINE_ENDING_FILL: &str = "black";
pub const ARROWHEAD_FILL: &str = "red";
pub const OPEN_MARKER_FILL: &str = "white";
pub const MARKER_STROKE: &str = "black";
