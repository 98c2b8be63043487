//! Error types with diagnostic codes using miette
//!
//! Every failure in this crate is a contract violation surfaced synchronously to
//! the caller; nothing here is transient or worth retrying.

use miette::Diagnostic;
use thiserror::Error;

use crate::graph::{Axis, Relation};

// ============================================================================
// Arithmetic Errors
// ============================================================================

/// Errors raised by [`ExactDecimal`](crate::ExactDecimal) operations
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("division by zero")]
    #[diagnostic(code(tacitsvg::arithmetic::division_by_zero))]
    DivisionByZero,

    #[error("decimal overflow")]
    #[diagnostic(
        code(tacitsvg::arithmetic::overflow),
        help("values are limited to a 96-bit mantissa with at most 28 fractional digits")
    )]
    Overflow,

    #[error("invalid decimal literal: {literal:?}")]
    #[diagnostic(code(tacitsvg::arithmetic::invalid_literal))]
    InvalidLiteral { literal: String },

    #[error("square root of a negative value")]
    #[diagnostic(code(tacitsvg::arithmetic::negative_root))]
    NegativeRoot,

    #[error("scale {scale} is out of range")]
    #[diagnostic(
        code(tacitsvg::arithmetic::scale_out_of_range),
        help("request at most 28 fractional digits")
    )]
    ScaleOutOfRange { scale: u32 },
}

// ============================================================================
// Usage Errors
// ============================================================================

/// Usage errors: the call is rejected, the drawing is left untouched
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum UnsupportedOperation {
    #[error("a shape cannot be {relation} itself")]
    #[diagnostic(code(tacitsvg::unsupported::self_adjacency))]
    SelfAdjacency { relation: Relation },

    #[error("cannot resolve text geometry without explicit dimensions")]
    #[diagnostic(
        code(tacitsvg::unsupported::text_without_dimensions),
        help("set the drawing's explicit width or height, or render with dimensions")
    )]
    TextWithoutDimensions,

    #[error("unsupported decoration type: {kind}")]
    #[diagnostic(code(tacitsvg::unsupported::decoration))]
    UnsupportedDecoration { kind: String },

    #[error("adjacency constraints form a cycle")]
    #[diagnostic(code(tacitsvg::unsupported::constraint_cycle))]
    ConstraintCycle,

    #[error("lines are positioned by their endpoints and cannot carry adjacency constraints")]
    #[diagnostic(code(tacitsvg::unsupported::line_constraint))]
    LineConstraint,

    #[error("decorations can only be attached to lines")]
    #[diagnostic(code(tacitsvg::unsupported::not_a_line))]
    NotALine,

    #[error("shape #{id} does not belong to this drawing")]
    #[diagnostic(code(tacitsvg::unsupported::unknown_shape))]
    UnknownShape { id: usize },

    #[error("explicit {axis} dimension must be positive")]
    #[diagnostic(code(tacitsvg::unsupported::non_positive_dimension))]
    NonPositiveDimension { axis: Axis },

    #[error("explicit gaps leave no room for shapes along the {axis} axis")]
    #[diagnostic(code(tacitsvg::unsupported::gaps_exceed_dimensions))]
    GapsExceedDimensions { axis: Axis },
}

// ============================================================================
// Crate Error
// ============================================================================

/// Any error produced by this crate
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Arithmetic(#[from] ArithmeticError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Unsupported(#[from] UnsupportedOperation),
}

impl Error {
    /// True for usage errors (self-adjacency, text without dimensions, ...)
    pub fn is_unsupported_operation(&self) -> bool {
        matches!(self, Error::Unsupported(_))
    }

    /// True for errors raised by decimal arithmetic
    pub fn is_arithmetic(&self) -> bool {
        matches!(self, Error::Arithmetic(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories() {
        let err: Error = UnsupportedOperation::ConstraintCycle.into();
        assert!(err.is_unsupported_operation());
        assert!(!err.is_arithmetic());

        let err: Error = ArithmeticError::DivisionByZero.into();
        assert!(err.is_arithmetic());
    }

    #[test]
    fn messages() {
        let err = UnsupportedOperation::SelfAdjacency {
            relation: Relation::RightOf,
        };
        assert_eq!(err.to_string(), "a shape cannot be right of itself");
        assert_eq!(
            UnsupportedOperation::TextWithoutDimensions.to_string(),
            "cannot resolve text geometry without explicit dimensions"
        );
    }
}
