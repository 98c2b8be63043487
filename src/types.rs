//! Strongly-typed geometric primitives.
//!
//! Everything is expressed in [`ExactDecimal`]; implicit (unit-less) and
//! explicit (pixel) quantities are distinguished by [`Measure`]'s unit tag.

use std::cmp::Ordering;
use std::fmt;

use crate::decimal::ExactDecimal;
use crate::errors::ArithmeticError;

/// Which coordinate space a [`Measure`] lives in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Unit {
    /// Relative units, before the drawing's ratio is applied
    #[default]
    Implicit,
    /// Resolved pixel units
    Explicit,
}

/// A numeric quantity tagged with its unit.
///
/// Equality and ordering look at the numeric value only.
#[derive(Clone, Copy, Debug, Default)]
pub struct Measure {
    value: ExactDecimal,
    unit: Unit,
}

impl Measure {
    pub fn implicit(value: impl Into<ExactDecimal>) -> Self {
        Measure {
            value: value.into(),
            unit: Unit::Implicit,
        }
    }

    pub fn explicit(value: impl Into<ExactDecimal>) -> Self {
        Measure {
            value: value.into(),
            unit: Unit::Explicit,
        }
    }

    pub fn value(&self) -> ExactDecimal {
        self.value
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn is_implicit(&self) -> bool {
        self.unit == Unit::Implicit
    }
}

impl PartialEq for Measure {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Measure {}

impl PartialOrd for Measure {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Measure {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Unit::Implicit => write!(f, "{}u", self.value),
            Unit::Explicit => write!(f, "{}px", self.value),
        }
    }
}

/// Immutable point in explicit space
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Point {
    x: ExactDecimal,
    y: ExactDecimal,
}

impl Point {
    pub fn new(x: impl Into<ExactDecimal>, y: impl Into<ExactDecimal>) -> Self {
        Point {
            x: x.into(),
            y: y.into(),
        }
    }

    pub fn x(&self) -> ExactDecimal {
        self.x
    }

    pub fn y(&self) -> ExactDecimal {
        self.y
    }

    /// Calculate the midpoint between two points
    pub fn midpoint(&self, other: &Point) -> Result<Point, ArithmeticError> {
        Ok(Point {
            x: self.x.checked_add(&other.x)?.half()?,
            y: self.y.checked_add(&other.y)?.half()?,
        })
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Size {
    pub width: ExactDecimal,
    pub height: ExactDecimal,
}

impl Size {
    pub fn new(width: impl Into<ExactDecimal>, height: impl Into<ExactDecimal>) -> Self {
        Size {
            width: width.into(),
            height: height.into(),
        }
    }

    /// The 1×1 size every shape starts with
    pub fn unit() -> Self {
        Size::new(ExactDecimal::ONE, ExactDecimal::ONE)
    }
}

/// Named anchor on a shape's bounding box
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Port {
    Left,
    Right,
    Top,
    Bottom,
}

/// Explicit bounding box: top-left corner plus size
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub x: ExactDecimal,
    pub y: ExactDecimal,
    pub width: ExactDecimal,
    pub height: ExactDecimal,
}

impl Bounds {
    /// Smallest box containing both points
    pub fn spanning(a: &Point, b: &Point) -> Result<Self, ArithmeticError> {
        let x = a.x().min(b.x());
        let y = a.y().min(b.y());
        Ok(Bounds {
            x,
            y,
            width: a.x().max(b.x()).checked_sub(&x)?,
            height: a.y().max(b.y()).checked_sub(&y)?,
        })
    }

    /// Box of `size` centered on `center`
    pub fn centered(center: &Point, size: Size) -> Result<Self, ArithmeticError> {
        Ok(Bounds {
            x: center.x().checked_sub(&size.width.half()?)?,
            y: center.y().checked_sub(&size.height.half()?)?,
            width: size.width,
            height: size.height,
        })
    }

    pub fn right(&self) -> Result<ExactDecimal, ArithmeticError> {
        self.x.checked_add(&self.width)
    }

    pub fn bottom(&self) -> Result<ExactDecimal, ArithmeticError> {
        self.y.checked_add(&self.height)
    }

    pub fn center(&self) -> Result<Point, ArithmeticError> {
        Ok(Point::new(
            self.x.checked_add(&self.width.half()?)?,
            self.y.checked_add(&self.height.half()?)?,
        ))
    }

    /// Midpoint of the named edge
    pub fn port(&self, port: Port) -> Result<Point, ArithmeticError> {
        let center = self.center()?;
        Ok(match port {
            Port::Left => Point::new(self.x, center.y()),
            Port::Right => Point::new(self.right()?, center.y()),
            Port::Top => Point::new(center.x(), self.y),
            Port::Bottom => Point::new(center.x(), self.bottom()?),
        })
    }
}

/// A coordinate that is linear in the drawing ratio:
/// `explicit value = implicit * ratio + explicit`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Span {
    pub implicit: ExactDecimal,
    pub explicit: ExactDecimal,
}

impl Span {
    pub fn implicit(value: ExactDecimal) -> Self {
        Span {
            implicit: value,
            explicit: ExactDecimal::ZERO,
        }
    }

    /// Shift by a gap measure, routing it to the matching part
    pub fn shifted(self, offset: ExactDecimal, gap: Measure) -> Result<Self, ArithmeticError> {
        let implicit = self.implicit.checked_add(&offset)?;
        Ok(match gap.unit() {
            Unit::Implicit => Span {
                implicit: implicit.checked_add(&gap.value())?,
                explicit: self.explicit,
            },
            Unit::Explicit => Span {
                implicit,
                explicit: self.explicit.checked_add(&gap.value())?,
            },
        })
    }

    pub fn checked_add(&self, rhs: &Span) -> Result<Span, ArithmeticError> {
        Ok(Span {
            implicit: self.implicit.checked_add(&rhs.implicit)?,
            explicit: self.explicit.checked_add(&rhs.explicit)?,
        })
    }

    pub fn checked_sub(&self, rhs: &Span) -> Result<Span, ArithmeticError> {
        Ok(Span {
            implicit: self.implicit.checked_sub(&rhs.implicit)?,
            explicit: self.explicit.checked_sub(&rhs.explicit)?,
        })
    }

    /// Midpoint of two spans, part by part
    pub fn middle(&self, other: &Span) -> Result<Span, ArithmeticError> {
        Ok(Span {
            implicit: self.implicit.checked_add(&other.implicit)?.half()?,
            explicit: self.explicit.checked_add(&other.explicit)?.half()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> ExactDecimal {
        ExactDecimal::create(s).unwrap()
    }

    #[test]
    fn measures_compare_by_value() {
        assert_eq!(Measure::implicit(d("1.00")), Measure::implicit(1));
        assert_eq!(Measure::explicit(d("2.0")), Measure::implicit(2));
        assert!(Measure::explicit(1) < Measure::explicit(d("1.5")));
        assert_eq!(Measure::default().value(), ExactDecimal::ZERO);
        assert!(Measure::default().is_implicit());
    }

    #[test]
    fn point_midpoint() {
        let p1 = Point::new(0, 0);
        let p2 = Point::new(4, 7);
        let mid = p1.midpoint(&p2).unwrap();
        assert_eq!(mid.x(), 2);
        assert_eq!(mid.y(), d("3.5"));
    }

    #[test]
    fn bounds_ports() {
        let b = Bounds {
            x: d("10"),
            y: d("20"),
            width: d("30"),
            height: d("40"),
        };
        assert_eq!(b.port(Port::Left).unwrap(), Point::new(10, 40));
        assert_eq!(b.port(Port::Right).unwrap(), Point::new(40, 40));
        assert_eq!(b.port(Port::Top).unwrap(), Point::new(25, 20));
        assert_eq!(b.port(Port::Bottom).unwrap(), Point::new(25, 60));
    }

    #[test]
    fn bounds_spanning_orders_corners() {
        let b = Bounds::spanning(&Point::new(8, 1), &Point::new(2, 5)).unwrap();
        assert_eq!(b.x, 2);
        assert_eq!(b.y, 1);
        assert_eq!(b.width, 6);
        assert_eq!(b.height, 4);
    }

    #[test]
    fn span_routes_gaps_by_unit() {
        let base = Span::implicit(d("1"));
        let implicit = base.shifted(d("0.5"), Measure::implicit(d("0.25"))).unwrap();
        assert_eq!(implicit.implicit, d("1.75"));
        assert_eq!(implicit.explicit, 0);

        let explicit = base.shifted(d("0.5"), Measure::explicit(10)).unwrap();
        assert_eq!(explicit.implicit, d("1.5"));
        assert_eq!(explicit.explicit, 10);
    }

    #[test]
    fn oversized_gaps_overflow_as_errors() {
        let base = Span::implicit(d("1"));
        let shifted = base.shifted(d("0.5"), Measure::explicit(d("5e28"))).unwrap();
        assert_eq!(
            shifted.checked_add(&shifted),
            Err(ArithmeticError::Overflow)
        );
        let far = Point::new(d("-5e28"), 0);
        assert_eq!(
            Bounds::spanning(&far, &Point::new(d("5e28"), 0)),
            Err(ArithmeticError::Overflow)
        );
    }
}
