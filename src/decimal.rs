//! Exact decimal arithmetic backing all geometry.
//!
//! `ExactDecimal` wraps `rust_decimal::Decimal` and adds the operations layout
//! needs: scale-explicit truncating division, exact multiplication that refuses
//! to round, and integer powers. Addition and subtraction are exact by
//! construction; anything that cannot be represented without losing digits is
//! reported as [`ArithmeticError::Overflow`].

use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::errors::ArithmeticError;

/// Largest number of fractional digits a value can carry
pub const MAX_SCALE: u32 = 28;

/// Extra digits carried by iterative operations before the final truncation
const GUARD_DIGITS: u32 = 4;

/// An exact signed decimal with value-based equality (`1.00 == 1`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ExactDecimal(Decimal);

impl ExactDecimal {
    pub const ZERO: ExactDecimal = ExactDecimal(Decimal::ZERO);
    pub const ONE: ExactDecimal = ExactDecimal(Decimal::ONE);

    /// `mantissa * 10^-scale` for constants; `scale` must not exceed 28.
    pub const fn new(mantissa: i64, scale: u32) -> Self {
        let magnitude = mantissa.unsigned_abs();
        ExactDecimal(Decimal::from_parts(
            magnitude as u32,
            (magnitude >> 32) as u32,
            0,
            mantissa < 0,
            scale,
        ))
    }

    /// Parse a literal such as `"0.66"`, `"-12"` or `"1e-25"`.
    pub fn create(literal: &str) -> Result<Self, ArithmeticError> {
        let trimmed = literal.trim();
        let parsed = if trimmed.contains(['e', 'E']) {
            Decimal::from_scientific(trimmed)
        } else {
            Decimal::from_str(trimmed)
        };
        parsed.map(ExactDecimal).map_err(|_| ArithmeticError::InvalidLiteral {
            literal: literal.to_string(),
        })
    }

    /// Build `mantissa * 10^-scale`.
    pub fn from_parts(mantissa: i64, scale: u32) -> Result<Self, ArithmeticError> {
        check_scale(scale)?;
        Decimal::try_from_i128_with_scale(i128::from(mantissa), scale)
            .map(ExactDecimal)
            .map_err(|_| ArithmeticError::Overflow)
    }

    /// Number of fractional digits in the current representation
    pub fn scale(&self) -> u32 {
        self.0.scale()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        !self.0.is_zero() && self.0.is_sign_positive()
    }

    pub fn is_negative(&self) -> bool {
        !self.0.is_zero() && self.0.is_sign_negative()
    }

    pub fn abs(&self) -> Self {
        ExactDecimal(self.0.abs())
    }

    pub fn negate(&self) -> Self {
        ExactDecimal(-self.0)
    }

    pub fn checked_add(&self, other: &Self) -> Result<Self, ArithmeticError> {
        self.0
            .checked_add(other.0)
            .map(ExactDecimal)
            .ok_or(ArithmeticError::Overflow)
    }

    pub fn checked_sub(&self, other: &Self) -> Result<Self, ArithmeticError> {
        self.0
            .checked_sub(other.0)
            .map(ExactDecimal)
            .ok_or(ArithmeticError::Overflow)
    }

    /// Exact product. Fails instead of rounding when the result needs more than
    /// 28 fractional digits or a wider mantissa.
    pub fn mul(&self, other: &Self) -> Result<Self, ArithmeticError> {
        let (a, b) = (self.0.normalize(), other.0.normalize());
        let mantissa = a
            .mantissa()
            .checked_mul(b.mantissa())
            .ok_or(ArithmeticError::Overflow)?;
        from_mantissa(mantissa, a.scale() + b.scale())
    }

    /// Half of this value, exact.
    pub fn half(&self) -> Result<Self, ArithmeticError> {
        self.mul(&ExactDecimal::new(5, 1))
    }

    /// Quotient truncated toward zero at `scale` fractional digits.
    pub fn div(&self, divisor: &Self, scale: u32) -> Result<Self, ArithmeticError> {
        let division = Division::new(self, divisor, scale)?;
        division.quotient(scale)
    }

    /// Quotient truncated at `scale` together with the exact remainder, so that
    /// `quotient * divisor + remainder == self`.
    ///
    /// Fails with [`ArithmeticError::Overflow`] when the remainder needs more
    /// than 28 fractional digits, even if the quotient alone would fit.
    pub fn divide_with_remainder(
        &self,
        divisor: &Self,
        scale: u32,
    ) -> Result<(Self, Self), ArithmeticError> {
        let division = Division::new(self, divisor, scale)?;
        Ok((division.quotient(scale)?, division.remainder()?))
    }

    /// Integer power truncated at `scale`; negative exponents divide.
    ///
    /// Intermediate products keep `scale` plus a few guard digits.
    pub fn pow(&self, exponent: i32, scale: u32) -> Result<Self, ArithmeticError> {
        check_scale(scale)?;
        let working = (scale + GUARD_DIGITS).min(MAX_SCALE);
        let mut result = ExactDecimal::ONE;
        let mut base = *self;
        let mut remaining = exponent.unsigned_abs();
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.mul_truncated(&base, working)?;
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.mul_truncated(&base, working)?;
            }
        }
        if exponent < 0 {
            ExactDecimal::ONE.div(&result, scale)
        } else {
            Ok(result.truncate(scale))
        }
    }

    /// Square root truncated at `scale` (Newton iteration with guard digits).
    pub fn sqrt(&self, scale: u32) -> Result<Self, ArithmeticError> {
        check_scale(scale)?;
        if self.is_negative() {
            return Err(ArithmeticError::NegativeRoot);
        }
        if self.is_zero() {
            return Ok(ExactDecimal::ZERO);
        }

        let working = (scale + GUARD_DIGITS).min(MAX_SCALE);
        let two = ExactDecimal::from(2);
        let mut estimate = (*self).max(ExactDecimal::ONE);
        for _ in 0..256 {
            let quotient = self.div(&estimate, working)?;
            let next = estimate.checked_add(&quotient)?.div(&two, working)?;
            if next >= estimate {
                break;
            }
            estimate = next;
        }

        // root <= self / root  <=>  root * root <= self, for roots at `scale`
        let fits = |root: &ExactDecimal| -> Result<bool, ArithmeticError> {
            Ok(root.is_zero() || *root <= self.div(root, scale)?)
        };
        let ulp = ExactDecimal::from_parts(1, scale)?;
        let mut root = estimate.truncate(scale);
        while !fits(&root)? {
            root = root.checked_sub(&ulp)?;
        }
        loop {
            let bumped = root.checked_add(&ulp)?;
            if !fits(&bumped)? {
                break;
            }
            root = bumped;
        }
        Ok(root)
    }

    /// Product truncated at `scale`.
    fn mul_truncated(&self, other: &Self, scale: u32) -> Result<Self, ArithmeticError> {
        self.0
            .checked_mul(other.0)
            .map(|product| ExactDecimal(product).truncate(scale))
            .ok_or(ArithmeticError::Overflow)
    }

    /// Drop digits beyond `scale` without rounding.
    pub fn truncate(&self, scale: u32) -> Self {
        ExactDecimal(self.0.round_dp_with_strategy(scale, RoundingStrategy::ToZero))
    }

    /// Drop the fractional part without rounding.
    pub fn trunc_decimals(&self) -> Self {
        ExactDecimal(self.0.trunc())
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

fn check_scale(scale: u32) -> Result<(), ArithmeticError> {
    if scale > MAX_SCALE {
        Err(ArithmeticError::ScaleOutOfRange { scale })
    } else {
        Ok(())
    }
}

/// Integer long division of two decimals' mantissas
struct Division {
    quotient: u128,
    remainder: u128,
    remainder_scale: u32,
    negative_quotient: bool,
    negative_remainder: bool,
}

impl Division {
    fn new(dividend: &ExactDecimal, divisor: &ExactDecimal, scale: u32) -> Result<Self, ArithmeticError> {
        check_scale(scale)?;
        if divisor.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }

        let (a, b) = (dividend.0.normalize(), divisor.0.normalize());
        let numerator = a.mantissa().unsigned_abs();
        let denominator = b.mantissa().unsigned_abs();
        // a / b * 10^scale = numerator * 10^shift / denominator
        let shift = i64::from(b.scale()) - i64::from(a.scale()) + i64::from(scale);

        let (quotient, remainder) = if shift >= 0 {
            long_division(numerator, denominator, shift as u32)?
        } else {
            match pow10(shift.unsigned_abs() as u32).and_then(|p| denominator.checked_mul(p)) {
                Some(wide) => (numerator / wide, numerator % wide),
                None => (0, numerator),
            }
        };

        Ok(Division {
            quotient,
            remainder,
            remainder_scale: a.scale() + shift.max(0) as u32,
            negative_quotient: a.is_sign_negative() != b.is_sign_negative(),
            negative_remainder: a.is_sign_negative(),
        })
    }

    fn quotient(&self, scale: u32) -> Result<ExactDecimal, ArithmeticError> {
        from_mantissa(signed(self.quotient, self.negative_quotient)?, scale)
    }

    fn remainder(&self) -> Result<ExactDecimal, ArithmeticError> {
        from_mantissa(
            signed(self.remainder, self.negative_remainder)?,
            self.remainder_scale,
        )
    }
}

fn pow10(exponent: u32) -> Option<u128> {
    10u128.checked_pow(exponent)
}

/// `floor(numerator * 10^shift / denominator)` and its remainder, one digit at a time.
fn long_division(
    numerator: u128,
    denominator: u128,
    shift: u32,
) -> Result<(u128, u128), ArithmeticError> {
    let mut quotient = numerator / denominator;
    let mut remainder = numerator % denominator;
    for _ in 0..shift {
        let widened = remainder * 10;
        quotient = quotient
            .checked_mul(10)
            .and_then(|q| q.checked_add(widened / denominator))
            .ok_or(ArithmeticError::Overflow)?;
        remainder = widened % denominator;
    }
    Ok((quotient, remainder))
}

fn signed(magnitude: u128, negative: bool) -> Result<i128, ArithmeticError> {
    let value = i128::try_from(magnitude).map_err(|_| ArithmeticError::Overflow)?;
    Ok(if negative { -value } else { value })
}

/// Build a decimal, shedding trailing zeros when the scale is too large.
fn from_mantissa(mut mantissa: i128, mut scale: u32) -> Result<ExactDecimal, ArithmeticError> {
    while scale > MAX_SCALE && mantissa % 10 == 0 {
        mantissa /= 10;
        scale -= 1;
    }
    if scale > MAX_SCALE {
        return Err(ArithmeticError::Overflow);
    }
    Decimal::try_from_i128_with_scale(mantissa, scale)
        .map(ExactDecimal)
        .map_err(|_| ArithmeticError::Overflow)
}

impl FromStr for ExactDecimal {
    type Err = ArithmeticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExactDecimal::create(s)
    }
}

impl From<i64> for ExactDecimal {
    fn from(value: i64) -> Self {
        ExactDecimal(Decimal::from(value))
    }
}

impl From<i32> for ExactDecimal {
    fn from(value: i32) -> Self {
        ExactDecimal(Decimal::from(value))
    }
}

impl From<u32> for ExactDecimal {
    fn from(value: u32) -> Self {
        ExactDecimal(Decimal::from(value))
    }
}

impl From<usize> for ExactDecimal {
    fn from(value: usize) -> Self {
        ExactDecimal(Decimal::from(value))
    }
}

impl From<Decimal> for ExactDecimal {
    fn from(value: Decimal) -> Self {
        ExactDecimal(value)
    }
}

impl Neg for ExactDecimal {
    type Output = ExactDecimal;
    fn neg(self) -> ExactDecimal {
        self.negate()
    }
}

impl PartialEq<i64> for ExactDecimal {
    fn eq(&self, other: &i64) -> bool {
        self.0 == Decimal::from(*other)
    }
}

impl PartialOrd<i64> for ExactDecimal {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        self.0.partial_cmp(&Decimal::from(*other))
    }
}

/// Normalized form: no trailing zeros, no exponent.
impl fmt::Display for ExactDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_zero() {
            return f.write_str("0");
        }
        write!(f, "{}", self.0.normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> ExactDecimal {
        ExactDecimal::create(s).unwrap()
    }

    #[test]
    fn equality_ignores_representation() {
        assert_eq!(d("1.00"), d("1"));
        assert_eq!(d("1e2"), d("100"));
        assert_eq!(d("0.5000"), d("5e-1"));
        assert!(d("0.66") < d("0.67"));
        assert!(d("-1") <= d("-1.0"));
    }

    #[test]
    fn hash_follows_value() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(d("2.50"));
        assert!(set.contains(&d("2.5")));
    }

    #[test]
    fn display_round_trips_tiny_values() {
        for literal in ["1e-25", "0.000123", "-42.5", "123456789.987654321", "0"] {
            let value = d(literal);
            assert_eq!(d(&value.to_string()), value, "literal {literal}");
        }
        assert_eq!(d("1.500").to_string(), "1.5");
        assert_eq!(d("1e-25").to_string(), "0.0000000000000000000000001");
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            ExactDecimal::create("twelve"),
            Err(ArithmeticError::InvalidLiteral { .. })
        ));
    }

    #[test]
    fn division_truncates_at_scale() {
        assert_eq!(d("2").div(&d("3"), 2).unwrap(), d("0.66"));
        assert_eq!(d("-2").div(&d("3"), 2).unwrap(), d("-0.66"));
        assert_eq!(d("100").div(&d("3"), 0).unwrap(), d("33"));
        assert_eq!(d("1").div(&d("8"), 10).unwrap(), d("0.125"));
        assert_eq!(d("150").div(&d("3"), 20).unwrap(), d("50"));
    }

    #[test]
    fn division_by_zero_fails() {
        assert_eq!(
            d("1").div(&ExactDecimal::ZERO, 4),
            Err(ArithmeticError::DivisionByZero)
        );
    }

    #[test]
    fn remainder_recombines() {
        let cases = [("2", "3", 2), ("-7", "2", 0), ("10.5", "0.4", 3), ("1e-25", "3", 28)];
        for (a, b, scale) in cases {
            let (dividend, divisor) = (d(a), d(b));
            let (q, r) = dividend.divide_with_remainder(&divisor, scale).unwrap();
            assert_eq!(q.mul(&divisor).unwrap().checked_add(&r).unwrap(), dividend, "{a} / {b}");
        }
    }

    #[test]
    fn fractional_divisor_at_full_scale() {
        assert_eq!(
            d("1").div(&d("0.3"), 28).unwrap(),
            d("3.3333333333333333333333333333")
        );
        assert_eq!(
            d("1").divide_with_remainder(&d("0.3"), 28),
            Err(ArithmeticError::Overflow)
        );
        let (q, r) = d("1").divide_with_remainder(&d("0.3"), 27).unwrap();
        assert_eq!(q.mul(&d("0.3")).unwrap().checked_add(&r).unwrap(), d("1"));
    }

    #[test]
    fn constants_match_parsed_literals() {
        assert_eq!(ExactDecimal::new(6, 1), d("0.6"));
        assert_eq!(ExactDecimal::new(-125, 2), d("-1.25"));
        assert_eq!(ExactDecimal::new(i64::MAX, 0), ExactDecimal::from(i64::MAX));
        assert_eq!(ExactDecimal::new(i64::MIN, 3), d("-9223372036854775.808"));
    }

    #[test]
    fn sums_overflow_as_errors() {
        let huge = d("5e28");
        assert_eq!(huge.checked_add(&huge), Err(ArithmeticError::Overflow));
        assert_eq!(huge.negate().checked_sub(&huge), Err(ArithmeticError::Overflow));
    }

    #[test]
    fn scale_is_bounded() {
        assert_eq!(
            d("1").div(&d("3"), 29),
            Err(ArithmeticError::ScaleOutOfRange { scale: 29 })
        );
    }

    #[test]
    fn multiplication_is_exact() {
        assert_eq!(d("1.5").mul(&d("1.5")).unwrap(), d("2.25"));
        assert_eq!(d("0.1").mul(&d("3")).unwrap(), d("0.3"));
        assert_eq!(d("7").half().unwrap(), d("3.5"));
    }

    #[test]
    fn powers() {
        assert_eq!(d("2").pow(10, 0).unwrap(), d("1024"));
        assert_eq!(d("2").pow(-2, 4).unwrap(), d("0.25"));
        assert_eq!(d("3").pow(-1, 3).unwrap(), d("0.333"));
        assert_eq!(d("5").pow(0, 0).unwrap(), ExactDecimal::ONE);
        assert_eq!(d("1.5").pow(3, 2).unwrap(), d("3.37"));
        assert_eq!(d("1.5").pow(-2, 10).unwrap(), d("0.4444444444"));
    }

    #[test]
    fn fractional_powers_truncate_instead_of_failing() {
        assert_eq!(d("0.1234567").pow(5, 10).unwrap(), d("0.0000286796"));
    }

    #[test]
    fn square_roots() {
        assert_eq!(d("2").sqrt(6).unwrap(), d("1.414213"));
        assert_eq!(d("16").sqrt(4).unwrap(), d("4"));
        assert_eq!(d("-1").sqrt(4), Err(ArithmeticError::NegativeRoot));
        assert_eq!(d("2").sqrt(20).unwrap(), d("1.4142135623730950488"));
        assert_eq!(d("1e-4").sqrt(2).unwrap(), d("0.01"));
        assert_eq!(d("1e-6").sqrt(2).unwrap(), ExactDecimal::ZERO);
    }

    #[test]
    fn truncation_never_rounds() {
        assert_eq!(d("1.999").truncate(2), d("1.99"));
        assert_eq!(d("-1.999").trunc_decimals(), d("-1"));
        assert_eq!(d("-3.25").abs(), d("3.25"));
        assert_eq!(d("3.25").negate(), d("-3.25"));
    }
}
