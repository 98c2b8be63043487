use crate::decimal::ExactDecimal;
use crate::errors::ArithmeticError;
use crate::options::LayoutOptions;
use crate::types::Size;

use super::ShapeGeometry;

/// A circle; its implicit width and height are always equal
#[derive(Clone, Debug, PartialEq)]
pub struct Circle {
    diameter: ExactDecimal,
}

impl Circle {
    pub fn new() -> Self {
        Self {
            diameter: ExactDecimal::ONE,
        }
    }

    pub fn with_diameter(diameter: impl Into<ExactDecimal>) -> Self {
        Self {
            diameter: diameter.into(),
        }
    }

    pub fn diameter(&self) -> ExactDecimal {
        self.diameter
    }
}

impl Default for Circle {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeGeometry for Circle {
    fn implicit_size(&self, _options: &LayoutOptions) -> Result<Size, ArithmeticError> {
        Ok(Size::new(self.diameter, self.diameter))
    }

    fn element_name(&self) -> &'static str {
        "circle"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diameter_keeps_symmetry() {
        let circle = Circle::with_diameter(3);
        let size = circle.implicit_size(&LayoutOptions::default()).unwrap();
        assert_eq!(size.width, size.height);
        assert_eq!(size.width, 3);
    }
}
