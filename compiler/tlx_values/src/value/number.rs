//! The numeric tower.
//!
//! A `Number` is either exact (an arbitrary-precision rational) or an
//! inexact `Real` approximation. The logical kind (Natural, Integer,
//! Rational, Real) is derived from the representation, never stored, so a
//! rational that reduces to `n/1` always reports as an integer kind.
//!
//! Once any operand of a binary operation is `Real`, the result is `Real`
//! even when the mathematical result happens to be exact.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};

use crate::errors::{division_by_zero, type_mismatch, undefined_operation, EvalError};

/// Exponents larger than this are approximated instead of expanded exactly.
const MAX_EXACT_EXPONENT: usize = 4096;

/// Logical numeric kind, derived from a value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NumberKind {
    /// Integer `>= 0`.
    Natural,
    /// Negative integer.
    Integer,
    /// Exact non-integer ratio.
    Rational,
    /// Floating approximation.
    Real,
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NumberKind::Natural => "Natural",
            NumberKind::Integer => "Integer",
            NumberKind::Rational => "Rational",
            NumberKind::Real => "Real",
        })
    }
}

#[derive(Clone, Debug)]
enum Repr {
    Exact(BigRational),
    Real(f64),
}

/// A numeric value.
#[derive(Clone, Debug)]
pub struct Number(Repr);

impl Number {
    /// An exact integer.
    pub fn int(n: i64) -> Self {
        Number(Repr::Exact(BigRational::from_integer(BigInt::from(n))))
    }

    /// An exact value from an arbitrary-precision integer.
    pub fn from_bigint(n: BigInt) -> Self {
        Number(Repr::Exact(BigRational::from_integer(n)))
    }

    /// An exact value.
    pub fn exact(r: BigRational) -> Self {
        Number(Repr::Exact(r))
    }

    /// An inexact approximation.
    pub fn real(f: f64) -> Self {
        Number(Repr::Real(f))
    }

    /// The exact ratio `numer / denom`, reduced.
    ///
    /// `new_rational(10, 4)` is the Rational `5/2`; `new_rational(10, 2)` is
    /// the Natural `5`.
    pub fn new_rational(numer: i64, denom: i64) -> Result<Self, EvalError> {
        if denom == 0 {
            return Err(division_by_zero());
        }
        Ok(Number(Repr::Exact(BigRational::new(
            BigInt::from(numer),
            BigInt::from(denom),
        ))))
    }

    /// Parse an exact literal: `42`, `-7`, `2.5` (as `5/2`) or `1/3`.
    pub fn parse_literal(text: &str) -> Result<Self, EvalError> {
        let invalid = || EvalError::new(format!("invalid numeric literal `{text}`"));

        if let Some((numer, denom)) = text.split_once('/') {
            let numer: BigInt = numer.parse().map_err(|_| invalid())?;
            let denom: BigInt = denom.parse().map_err(|_| invalid())?;
            if denom.is_zero() {
                return Err(division_by_zero());
            }
            return Ok(Number::exact(BigRational::new(numer, denom)));
        }

        if let Some((whole, frac)) = text.split_once('.') {
            if frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            let numer: BigInt = format!("{whole}{frac}").parse().map_err(|_| invalid())?;
            let denom = num_traits::pow(BigInt::from(10), frac.len());
            return Ok(Number::exact(BigRational::new(numer, denom)));
        }

        text.parse::<BigInt>()
            .map(Number::from_bigint)
            .map_err(|_| invalid())
    }

    pub fn kind(&self) -> NumberKind {
        match &self.0 {
            Repr::Exact(r) if !r.is_integer() => NumberKind::Rational,
            Repr::Exact(r) if r.is_negative() => NumberKind::Integer,
            Repr::Exact(_) => NumberKind::Natural,
            Repr::Real(_) => NumberKind::Real,
        }
    }

    pub fn is_real(&self) -> bool {
        matches!(self.0, Repr::Real(_))
    }

    pub fn is_zero(&self) -> bool {
        match &self.0 {
            Repr::Exact(r) => r.is_zero(),
            Repr::Real(f) => *f == 0.0,
        }
    }

    pub fn is_negative(&self) -> bool {
        match &self.0 {
            Repr::Exact(r) => r.is_negative(),
            Repr::Real(f) => *f < 0.0,
        }
    }

    /// Whether the value is a whole number, whatever its kind.
    pub fn is_integral(&self) -> bool {
        match &self.0 {
            Repr::Exact(r) => r.is_integer(),
            Repr::Real(f) => f.is_finite() && f.fract() == 0.0,
        }
    }

    pub fn to_f64(&self) -> f64 {
        match &self.0 {
            Repr::Exact(r) => r.to_f64().unwrap_or(f64::NAN),
            Repr::Real(f) => *f,
        }
    }

    /// The value as an `i64`, if it is integral and in range.
    pub fn to_i64(&self) -> Option<i64> {
        self.to_bigint().and_then(|n| n.to_i64())
    }

    /// The value as an arbitrary-precision integer, if it is integral.
    pub fn to_bigint(&self) -> Option<BigInt> {
        match &self.0 {
            Repr::Exact(r) if r.is_integer() => Some(r.to_integer()),
            Repr::Real(f) if self.is_integral() => BigRational::from_float(*f).map(|r| r.to_integer()),
            _ => None,
        }
    }

    /// Exact view of the value; finite reals convert without loss.
    fn exact_view(&self) -> Option<Cow<'_, BigRational>> {
        match &self.0 {
            Repr::Exact(r) => Some(Cow::Borrowed(r)),
            Repr::Real(f) => BigRational::from_float(*f).map(Cow::Owned),
        }
    }

    /// Text that is equal for numerically equal values.
    ///
    /// Used as the hashing key, so `5` and `5.0` deduplicate.
    pub fn canonical_text(&self) -> String {
        match self.exact_view() {
            Some(r) => render_exact(&r),
            None => self.to_string(),
        }
    }

    /// Apply a binary operation, contaminating to `Real` when either side is.
    fn combine(
        &self,
        other: &Number,
        exact: impl FnOnce(&BigRational, &BigRational) -> BigRational,
        real: impl FnOnce(f64, f64) -> f64,
    ) -> Number {
        match (&self.0, &other.0) {
            (Repr::Exact(a), Repr::Exact(b)) => Number(Repr::Exact(exact(a, b))),
            _ => Number(Repr::Real(real(self.to_f64(), other.to_f64()))),
        }
    }

    pub fn add(&self, other: &Number) -> Number {
        self.combine(other, |a, b| a + b, |a, b| a + b)
    }

    pub fn sub(&self, other: &Number) -> Number {
        self.combine(other, |a, b| a - b, |a, b| a - b)
    }

    pub fn mul(&self, other: &Number) -> Number {
        self.combine(other, |a, b| a * b, |a, b| a * b)
    }

    pub fn div(&self, other: &Number) -> Result<Number, EvalError> {
        if other.is_zero() {
            return Err(division_by_zero());
        }
        Ok(self.combine(other, |a, b| a / b, |a, b| a / b))
    }

    /// Floored modulus: the result has the sign of the divisor.
    pub fn modulo(&self, other: &Number) -> Result<Number, EvalError> {
        self.integer_op(other, "%", |a, b| a.mod_floor(b))
    }

    /// Floored integer division.
    pub fn int_div(&self, other: &Number) -> Result<Number, EvalError> {
        self.integer_op(other, "\\div", |a, b| a.div_floor(b))
    }

    fn integer_op(
        &self,
        other: &Number,
        op: &str,
        f: impl FnOnce(&BigInt, &BigInt) -> BigInt,
    ) -> Result<Number, EvalError> {
        let a = self.integral_operand(op)?;
        let b = other.integral_operand(op)?;
        if b.is_zero() {
            return Err(division_by_zero());
        }
        let result = f(&a, &b);
        if self.is_real() || other.is_real() {
            Ok(Number::real(result.to_f64().unwrap_or(f64::NAN)))
        } else {
            Ok(Number::from_bigint(result))
        }
    }

    fn integral_operand(&self, op: &str) -> Result<BigInt, EvalError> {
        self.to_bigint()
            .ok_or_else(|| type_mismatch(format!("an integer operand for `{op}`"), self.kind().to_string()))
    }

    #[must_use]
    pub fn neg(&self) -> Number {
        match &self.0 {
            Repr::Exact(r) => Number(Repr::Exact(-r)),
            Repr::Real(f) => Number(Repr::Real(-f)),
        }
    }

    #[must_use]
    pub fn abs(&self) -> Number {
        match &self.0 {
            Repr::Exact(r) => Number(Repr::Exact(r.abs())),
            Repr::Real(f) => Number(Repr::Real(f.abs())),
        }
    }

    /// Exponentiation.
    ///
    /// Integer exponents are exact. For a rational exponent `p/q` the result
    /// is `base^p` followed by an exact `q`-th root of numerator and
    /// denominator; when either root is not exact the result is the `Real`
    /// approximation. `0 ^ 0` is undefined and `0` to a negative power
    /// divides by zero.
    pub fn pow(&self, exponent: &Number) -> Result<Number, EvalError> {
        if self.is_zero() {
            if exponent.is_zero() {
                return Err(undefined_operation("0 ^ 0"));
            }
            if exponent.is_negative() {
                return Err(division_by_zero());
            }
        }

        let (Repr::Exact(base), Repr::Exact(exp)) = (&self.0, &exponent.0) else {
            return real_pow(self.to_f64(), exponent.to_f64());
        };

        let Some(raised) = exact_powi(base, exp.numer()) else {
            return real_pow(self.to_f64(), exponent.to_f64());
        };
        if exp.is_integer() {
            return Ok(Number::exact(raised));
        }

        let Some(degree) = exp.denom().to_u32() else {
            return real_pow(self.to_f64(), exponent.to_f64());
        };
        if raised.is_negative() && degree % 2 == 0 {
            return Err(undefined_operation(format!(
                "even root of negative number {}",
                render_exact(&raised)
            )));
        }

        match (
            exact_root(raised.numer(), degree),
            exact_root(raised.denom(), degree),
        ) {
            (Some(n), Some(d)) => Ok(Number::exact(BigRational::new(n, d))),
            _ => {
                let magnitude = raised.abs().to_f64().unwrap_or(f64::NAN);
                let root = magnitude.powf(1.0 / f64::from(degree));
                Ok(Number::real(if raised.is_negative() { -root } else { root }))
            }
        }
    }
}

fn real_pow(base: f64, exponent: f64) -> Result<Number, EvalError> {
    let result = base.powf(exponent);
    if result.is_nan() {
        return Err(undefined_operation(format!("{base} ^ {exponent}")));
    }
    Ok(Number::real(result))
}

/// `base ^ exp` for an integer exponent, or `None` if it is too large.
fn exact_powi(base: &BigRational, exp: &BigInt) -> Option<BigRational> {
    let magnitude = exp.magnitude().to_usize()?;
    if magnitude > MAX_EXACT_EXPONENT {
        return None;
    }
    let raised = num_traits::pow(base.clone(), magnitude);
    Some(if exp.is_negative() {
        raised.recip()
    } else {
        raised
    })
}

/// The exact `degree`-th root of `n`, keeping its sign.
fn exact_root(n: &BigInt, degree: u32) -> Option<BigInt> {
    let magnitude: &BigUint = n.magnitude();
    let root = magnitude.nth_root(degree);
    let usize_degree = usize::try_from(degree).ok()?;
    if num_traits::pow(root.clone(), usize_degree) != *magnitude {
        return None;
    }
    let root = BigInt::from(root);
    Some(if n.is_negative() { -root } else { root })
}

fn render_exact(r: &BigRational) -> String {
    if r.is_integer() {
        r.numer().to_string()
    } else {
        format!("{}/{}", r.numer(), r.denom())
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Number {
    /// Compares mathematical values across kinds.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.exact_view(), other.exact_view()) {
            (Some(a), Some(b)) => Some(a.as_ref().cmp(b.as_ref())),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Exact(r) => f.write_str(&render_exact(r)),
            Repr::Real(x) => write!(f, "{x}"),
        }
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::int(n)
    }
}

#[cfg(test)]
mod tests;
