use crate::decimal::ExactDecimal;
use crate::errors::ArithmeticError;
use crate::options::LayoutOptions;
use crate::types::Size;

use super::ShapeGeometry;

/// A single line of text, one implicit unit tall
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Text {
    content: Option<String>,
    width: Option<ExactDecimal>,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            width: None,
        }
    }

    /// Text with no payload; it never renders
    pub fn empty() -> Self {
        Self::default()
    }

    /// Replace the character-count width estimate
    pub fn with_implicit_width(mut self, width: impl Into<ExactDecimal>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.content.as_deref().is_none_or(str::is_empty)
    }
}

impl ShapeGeometry for Text {
    fn implicit_size(&self, options: &LayoutOptions) -> Result<Size, ArithmeticError> {
        let width = match self.width {
            Some(width) => width,
            None => {
                let chars = self.content.as_deref().map_or(0, |s| s.chars().count());
                options.text_char_width.mul(&ExactDecimal::from(chars))?
            }
        };
        Ok(Size::new(width, ExactDecimal::ONE))
    }

    fn element_name(&self) -> &'static str {
        "text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_tracks_character_count() {
        let options = LayoutOptions::default();
        let size = Text::new("Hello").implicit_size(&options).unwrap();
        assert_eq!(size.width, 3);
        assert_eq!(size.height, 1);
    }

    #[test]
    fn explicit_override_wins() {
        let text = Text::new("Hello").with_implicit_width(2);
        assert_eq!(text.implicit_size(&LayoutOptions::default()).unwrap().width, 2);
    }

    #[test]
    fn emptiness() {
        assert!(Text::empty().is_empty());
        assert!(Text::new("").is_empty());
        assert!(!Text::new(" ").is_empty());
        assert_eq!(
            Text::empty().implicit_size(&LayoutOptions::default()).unwrap().width,
            ExactDecimal::ZERO
        );
    }

    #[test]
    fn oversized_width_estimate_is_an_error() {
        let options =
            LayoutOptions::default().with_text_char_width(ExactDecimal::create("5e28").unwrap());
        assert_eq!(
            Text::new("ab").implicit_size(&options),
            Err(ArithmeticError::Overflow)
        );
    }
}
