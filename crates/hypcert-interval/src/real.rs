use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use hypcert_core::errors::{ErrorInfo, HvError};
use rug::float::{Constant, ParseIncomplete, Round, Special};
use rug::Float;
use serde::{Deserialize, Serialize};

use crate::precision::Precision;

/// Radix of the serialized endpoints; binary significands print exactly in hex.
const REPR_RADIX: i32 = 16;

fn interval_error(code: &str, message: impl Into<String>) -> HvError {
    HvError::Serde(ErrorInfo::new(code, message.into()))
}

fn parse_endpoint(text: &str, radix: i32) -> Result<ParseIncomplete, HvError> {
    Float::parse_radix(text, radix).map_err(|err| {
        HvError::Serde(
            ErrorInfo::new("interval-parse", format!("cannot parse endpoint: {err}"))
                .with_context("endpoint", text),
        )
    })
}

#[derive(Serialize, Deserialize)]
struct IntervalRepr {
    lo: String,
    hi: String,
    precision: Precision,
}

/// Closed real interval `[lo, hi]` whose endpoints are rounded outward.
///
/// Endpoints are MPFR floats carrying exactly `precision` significand bits and
/// may be infinite. Operations whose result cannot be bounded (a division by an
/// interval containing zero, an undefined corner product) return
/// [`Interval::entire`], which is still an enclosure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "IntervalRepr", into = "IntervalRepr")]
pub struct Interval {
    lo: Float,
    hi: Float,
    precision: Precision,
}

impl TryFrom<IntervalRepr> for Interval {
    type Error = HvError;

    fn try_from(repr: IntervalRepr) -> Result<Self, Self::Error> {
        Interval::parse_radix(&repr.lo, &repr.hi, REPR_RADIX, repr.precision)
    }
}

impl From<Interval> for IntervalRepr {
    fn from(interval: Interval) -> Self {
        Self {
            lo: interval.lo.to_string_radix(REPR_RADIX, None),
            hi: interval.hi.to_string_radix(REPR_RADIX, None),
            precision: interval.precision,
        }
    }
}

fn lesser(a: Float, b: Float) -> Float {
    if b < a {
        b
    } else {
        a
    }
}

fn greater(a: Float, b: Float) -> Float {
    if b > a {
        b
    } else {
        a
    }
}

fn product(a: &Float, b: &Float, precision: Precision, round: Round) -> Float {
    // 0 · ∞ = 0 keeps point zero coefficients exact against unbounded enclosures
    if a.is_zero() || b.is_zero() {
        return Float::new(precision.bits());
    }
    Float::with_val_round(precision.bits(), a * b, round).0
}

fn quotient(a: &Float, b: &Float, precision: Precision, round: Round) -> Float {
    Float::with_val_round(precision.bits(), a / b, round).0
}

fn is_positive(x: &Float) -> bool {
    x.cmp0() == Some(Ordering::Greater)
}

impl Interval {
    /// Builds `[lo, hi]`, rounding both endpoints outward to `precision`.
    pub fn new(lo: f64, hi: f64, precision: Precision) -> Result<Self, HvError> {
        Self::validated(
            Float::with_val(53, lo),
            Float::with_val(53, hi),
            precision,
        )
    }

    /// Encloses the decimal endpoints `lo` and `hi`, each rounded outward.
    ///
    /// Unlike [`Interval::new`] the endpoints are not first rounded to binary64,
    /// so enclosures finer than 53 bits can be supplied as text.
    pub fn parse(lo: &str, hi: &str, precision: Precision) -> Result<Self, HvError> {
        Self::parse_radix(lo, hi, 10, precision)
    }

    fn parse_radix(lo: &str, hi: &str, radix: i32, precision: Precision) -> Result<Self, HvError> {
        let lo = precision.round_down(parse_endpoint(lo, radix)?);
        let hi = precision.round_up(parse_endpoint(hi, radix)?);
        Self::validated(lo, hi, precision)
    }

    fn validated(lo: Float, hi: Float, precision: Precision) -> Result<Self, HvError> {
        if lo.is_nan() || hi.is_nan() {
            return Err(interval_error("interval-nan", "interval endpoints must not be NaN"));
        }
        if lo > hi {
            return Err(interval_error(
                "interval-inverted",
                format!("lower endpoint {lo} exceeds upper endpoint {hi}"),
            ));
        }
        Ok(Self {
            lo: precision.round_down(&lo),
            hi: precision.round_up(&hi),
            precision,
        })
    }

    /// Smallest interval of the given precision containing `x`.
    pub fn point(x: f64, precision: Precision) -> Self {
        if x.is_nan() {
            return Self::entire(precision);
        }
        Self {
            lo: precision.round_down(x),
            hi: precision.round_up(x),
            precision,
        }
    }

    /// Encloses an integer; exact whenever the integer fits the precision.
    pub fn from_int(k: i64, precision: Precision) -> Self {
        Self {
            lo: precision.round_down(k),
            hi: precision.round_up(k),
            precision,
        }
    }

    /// The whole real line.
    pub fn entire(precision: Precision) -> Self {
        Self {
            lo: Float::with_val(precision.bits(), Special::NegInfinity),
            hi: Float::with_val(precision.bits(), Special::Infinity),
            precision,
        }
    }

    /// Enclosure of π, one ulp wide.
    pub fn pi(precision: Precision) -> Self {
        Self {
            lo: precision.round_down(Constant::Pi),
            hi: precision.round_up(Constant::Pi),
            precision,
        }
    }

    /// Assembles already rounded endpoints; a NaN endpoint widens to the whole line.
    pub(crate) fn from_parts(lo: Float, hi: Float, precision: Precision) -> Self {
        if lo.is_nan() || hi.is_nan() {
            return Self::entire(precision);
        }
        Self { lo, hi, precision }
    }

    fn hull(lower: [Float; 4], upper: [Float; 4], precision: Precision) -> Self {
        if lower.iter().chain(upper.iter()).any(Float::is_nan) {
            return Self::entire(precision);
        }
        let [a, b, c, d] = lower;
        let lo = lesser(lesser(a, b), lesser(c, d));
        let [a, b, c, d] = upper;
        let hi = greater(greater(a, b), greater(c, d));
        Self { lo, hi, precision }
    }

    fn product_hull(&self, lo: &Float, hi: &Float, precision: Precision) -> Self {
        let corners = [
            (&self.lo, lo),
            (&self.lo, hi),
            (&self.hi, lo),
            (&self.hi, hi),
        ];
        Self::hull(
            corners.map(|(a, b)| product(a, b, precision, Round::Down)),
            corners.map(|(a, b)| product(a, b, precision, Round::Up)),
            precision,
        )
    }

    /// Exact lower endpoint.
    pub fn inf(&self) -> &Float {
        &self.lo
    }

    /// Exact upper endpoint.
    pub fn sup(&self) -> &Float {
        &self.hi
    }

    /// Lower endpoint as binary64, rounded down.
    pub fn lo(&self) -> f64 {
        self.lo.to_f64_round(Round::Down)
    }

    /// Upper endpoint as binary64, rounded up.
    pub fn hi(&self) -> f64 {
        self.hi.to_f64_round(Round::Up)
    }

    /// Working precision of the interval.
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Re-rounds the endpoints outward to another precision.
    pub fn with_precision(&self, precision: Precision) -> Self {
        Self {
            lo: precision.round_down(&self.lo),
            hi: precision.round_up(&self.hi),
            precision,
        }
    }

    /// Width `hi - lo`, rounded up.
    pub fn width(&self) -> f64 {
        self.precision
            .round_up(&self.hi - &self.lo)
            .to_f64_round(Round::Up)
    }

    /// Midpoint, not an enclosure.
    pub fn midpoint(&self) -> f64 {
        let (lo, hi) = (self.lo(), self.hi());
        if lo.is_infinite() || hi.is_infinite() {
            return if lo == hi { lo } else { 0.0 };
        }
        lo + (hi - lo) / 2.0
    }

    pub(crate) fn mag_float(&self) -> Float {
        greater(self.lo.clone().abs(), self.hi.clone().abs())
    }

    /// Largest absolute value attained on the interval, rounded up.
    pub fn mag(&self) -> f64 {
        self.mag_float().to_f64_round(Round::Up)
    }

    /// Whether `x` lies in the interval.
    pub fn contains(&self, x: f64) -> bool {
        self.lo <= x && self.hi >= x
    }

    /// Whether every point of `other` lies in the interval.
    pub fn encloses(&self, other: &Interval) -> bool {
        self.lo <= other.lo && other.hi <= self.hi
    }

    /// Whether zero lies in the interval.
    pub fn contains_zero(&self) -> bool {
        self.lo.cmp0() != Some(Ordering::Greater) && self.hi.cmp0() != Some(Ordering::Less)
    }

    /// Whether every point of the interval is strictly greater than zero.
    pub fn is_strictly_positive(&self) -> bool {
        is_positive(&self.lo)
    }

    /// Multiplies by an integer coefficient without rounding the coefficient.
    pub fn scale(&self, k: i64) -> Self {
        if k == 0 {
            return Self::from_int(0, self.precision);
        }
        // 64 bits hold every i64 exactly
        let factor = Float::with_val(64, k);
        self.product_hull(&factor, &factor, self.precision)
    }

    /// `x / 2`, exact up to the precision rounding.
    pub fn half(&self) -> Self {
        let two = Float::with_val(2, 2);
        Self::from_parts(
            quotient(&self.lo, &two, self.precision, Round::Down),
            quotient(&self.hi, &two, self.precision, Round::Up),
            self.precision,
        )
    }

    /// Tight enclosure of `x²`.
    pub fn sqr(&self) -> Self {
        let precision = self.precision;
        if self.contains_zero() {
            let hi = greater(
                precision.round_up(&self.lo * &self.lo),
                precision.round_up(&self.hi * &self.hi),
            );
            return Self::from_parts(Float::new(precision.bits()), hi, precision);
        }
        let (near, far) = if is_positive(&self.lo) {
            (&self.lo, &self.hi)
        } else {
            (&self.hi, &self.lo)
        };
        Self::from_parts(
            precision.round_down(near * near),
            precision.round_up(far * far),
            precision,
        )
    }

    /// Square root over the non-negative part of the interval.
    pub fn sqrt(&self) -> Self {
        let precision = self.precision;
        let root = |x: &Float, round: Round| {
            if is_positive(x) {
                Float::with_val_round(precision.bits(), x.sqrt_ref(), round).0
            } else {
                Float::new(precision.bits())
            }
        };
        Self::from_parts(
            root(&self.lo, Round::Down),
            root(&self.hi, Round::Up),
            precision,
        )
    }

    /// Natural logarithm; the lower endpoint is `-∞` when the interval reaches zero.
    pub fn ln(&self) -> Self {
        let precision = self.precision;
        if !is_positive(&self.hi) {
            return Self::entire(precision);
        }
        let lo = if is_positive(&self.lo) {
            precision.round_down(self.lo.ln_ref())
        } else {
            Float::with_val(precision.bits(), Special::NegInfinity)
        };
        Self::from_parts(lo, precision.round_up(self.hi.ln_ref()), precision)
    }

    /// Hull of `atan2(y, x)` over four `(y, x)` corners, a signed zero `y` read as `+0`.
    pub(crate) fn atan2_hull(corners: [(&Float, &Float); 4], precision: Precision) -> Self {
        let positive_zero = Float::new(precision.bits());
        let corners = corners.map(|(y, x)| (if y.is_zero() { &positive_zero } else { y }, x));
        let angle = |(y, x): (&Float, &Float), round: Round| {
            Float::with_val_round(precision.bits(), y.atan2_ref(x), round).0
        };
        Self::hull(
            corners.map(|corner| angle(corner, Round::Down)),
            corners.map(|corner| angle(corner, Round::Up)),
            precision,
        )
    }
}

impl Add<&Interval> for &Interval {
    type Output = Interval;

    fn add(self, rhs: &Interval) -> Interval {
        let precision = self.precision.coarser(rhs.precision);
        Interval::from_parts(
            precision.round_down(&self.lo + &rhs.lo),
            precision.round_up(&self.hi + &rhs.hi),
            precision,
        )
    }
}

impl Sub<&Interval> for &Interval {
    type Output = Interval;

    fn sub(self, rhs: &Interval) -> Interval {
        let precision = self.precision.coarser(rhs.precision);
        Interval::from_parts(
            precision.round_down(&self.lo - &rhs.hi),
            precision.round_up(&self.hi - &rhs.lo),
            precision,
        )
    }
}

impl Mul<&Interval> for &Interval {
    type Output = Interval;

    fn mul(self, rhs: &Interval) -> Interval {
        let precision = self.precision.coarser(rhs.precision);
        self.product_hull(&rhs.lo, &rhs.hi, precision)
    }
}

impl Div<&Interval> for &Interval {
    type Output = Interval;

    fn div(self, rhs: &Interval) -> Interval {
        let precision = self.precision.coarser(rhs.precision);
        if rhs.contains_zero() {
            return Interval::entire(precision);
        }
        let corners = [
            (&self.lo, &rhs.lo),
            (&self.lo, &rhs.hi),
            (&self.hi, &rhs.lo),
            (&self.hi, &rhs.hi),
        ];
        Interval::hull(
            corners.map(|(a, b)| quotient(a, b, precision, Round::Down)),
            corners.map(|(a, b)| quotient(a, b, precision, Round::Up)),
            precision,
        )
    }
}

impl Neg for &Interval {
    type Output = Interval;

    fn neg(self) -> Interval {
        Interval {
            lo: -self.hi.clone(),
            hi: -self.lo.clone(),
            precision: self.precision,
        }
    }
}

forward_owned_ops!(Interval);

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}
