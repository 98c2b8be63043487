use crate::decimal::ExactDecimal;
use crate::errors::ArithmeticError;
use crate::options::LayoutOptions;
use crate::types::Size;

use super::ShapeGeometry;

/// A rectangle one implicit unit tall and `aspect_ratio` units wide
#[derive(Clone, Debug, PartialEq)]
pub struct Rectangle {
    aspect_ratio: ExactDecimal,
}

impl Rectangle {
    pub fn new() -> Self {
        Self {
            aspect_ratio: ExactDecimal::ONE,
        }
    }

    /// `aspect_ratio` is width / height
    pub fn with_aspect_ratio(aspect_ratio: impl Into<ExactDecimal>) -> Self {
        Self {
            aspect_ratio: aspect_ratio.into(),
        }
    }

    pub fn aspect_ratio(&self) -> ExactDecimal {
        self.aspect_ratio
    }
}

impl Default for Rectangle {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeGeometry for Rectangle {
    fn implicit_size(&self, _options: &LayoutOptions) -> Result<Size, ArithmeticError> {
        Ok(Size::new(self.aspect_ratio, ExactDecimal::ONE))
    }

    fn element_name(&self) -> &'static str {
        "rect"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_is_fixed() {
        let rect = Rectangle::with_aspect_ratio(ExactDecimal::create("2.5").unwrap());
        let size = rect.implicit_size(&LayoutOptions::default()).unwrap();
        assert_eq!(size.height, 1);
        assert_eq!(size.width, ExactDecimal::create("2.5").unwrap());
    }
}
