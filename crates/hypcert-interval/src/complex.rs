use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use hypcert_core::errors::HvError;
use rug::float::Round;
use serde::{Deserialize, Serialize};

use crate::precision::Precision;
use crate::real::Interval;

/// Rectangular enclosure `re + im·i` of a complex number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexInterval {
    re: Interval,
    im: Interval,
}

impl ComplexInterval {
    /// Pairs a real and an imaginary enclosure.
    pub fn new(re: Interval, im: Interval) -> Self {
        Self { re, im }
    }

    /// Builds the box `[re_lo, re_hi] + [im_lo, im_hi]·i`.
    pub fn from_bounds(
        re: (f64, f64),
        im: (f64, f64),
        precision: Precision,
    ) -> Result<Self, HvError> {
        Ok(Self::new(
            Interval::new(re.0, re.1, precision)?,
            Interval::new(im.0, im.1, precision)?,
        ))
    }

    /// Smallest box of the given precision containing `re + im·i`.
    pub fn point(re: f64, im: f64, precision: Precision) -> Self {
        Self::new(Interval::point(re, precision), Interval::point(im, precision))
    }

    /// Encloses the Gaussian integer `k`.
    pub fn from_int(k: i64, precision: Precision) -> Self {
        Self::new(Interval::from_int(k, precision), Interval::from_int(0, precision))
    }

    /// Exact zero.
    pub fn zero(precision: Precision) -> Self {
        Self::from_int(0, precision)
    }

    /// Exact one.
    pub fn one(precision: Precision) -> Self {
        Self::from_int(1, precision)
    }

    /// Enclosure of `2πi`.
    pub fn two_pi_i(precision: Precision) -> Self {
        Self::new(
            Interval::from_int(0, precision),
            Interval::pi(precision).scale(2),
        )
    }

    /// Real part.
    pub fn re(&self) -> &Interval {
        &self.re
    }

    /// Imaginary part.
    pub fn im(&self) -> &Interval {
        &self.im
    }

    /// The coarser precision of the two parts.
    pub fn precision(&self) -> Precision {
        self.re.precision().coarser(self.im.precision())
    }

    /// Re-rounds both parts outward to `precision`.
    pub fn with_precision(&self, precision: Precision) -> Self {
        Self::new(
            self.re.with_precision(precision),
            self.im.with_precision(precision),
        )
    }

    /// Centre of the box, not an enclosure.
    pub fn midpoint(&self) -> (f64, f64) {
        (self.re.midpoint(), self.im.midpoint())
    }

    /// Whether `re + im·i` lies in the box.
    pub fn contains(&self, re: f64, im: f64) -> bool {
        self.re.contains(re) && self.im.contains(im)
    }

    /// Whether the box contains the origin.
    pub fn contains_zero(&self) -> bool {
        self.re.contains_zero() && self.im.contains_zero()
    }

    /// Multiplies by an integer coefficient.
    pub fn scale(&self, k: i64) -> Self {
        Self::new(self.re.scale(k), self.im.scale(k))
    }

    /// `|c + di|²`.
    pub fn norm_sqr(&self) -> Interval {
        self.re.sqr() + self.im.sqr()
    }

    /// Enclosure of the modulus.
    pub fn abs(&self) -> Interval {
        self.norm_sqr().sqrt()
    }

    /// `1 / (c + di) = (c − di) / (c² + d²)`.
    pub fn recip(&self) -> Self {
        let denom = self.norm_sqr();
        Self::new(&self.re / &denom, -&self.im / &denom)
    }

    /// Principal argument, `Arg z ∈ (−π, π]`.
    pub fn arg(&self) -> Interval {
        let precision = self.precision();
        let pi = Interval::pi(precision);
        let full_turn = Interval::from_parts(-pi.sup().clone(), pi.sup().clone(), precision);
        if self.contains_zero() {
            return full_turn;
        }
        // the box meets the cut from below: values near both −π and π
        let below_cut = self.re.inf().cmp0() == Some(Ordering::Less)
            && self.im.inf().cmp0() == Some(Ordering::Less)
            && self.im.sup().cmp0() != Some(Ordering::Less);
        if below_cut {
            return full_turn;
        }
        // arg is continuous on the box, so its extremes sit at the corners
        let (re, im) = (&self.re, &self.im);
        Interval::atan2_hull(
            [
                (im.inf(), re.inf()),
                (im.inf(), re.sup()),
                (im.sup(), re.inf()),
                (im.sup(), re.sup()),
            ],
            precision,
        )
    }

    /// Principal branch `log z = ln|z| + i·Arg z`.
    ///
    /// The real part is unbounded below when the box reaches the origin.
    pub fn log(&self) -> Self {
        Self::new(self.norm_sqr().ln().half(), self.arg())
    }

    /// Upper bound on `|w − target|` over every `w` in the box.
    ///
    /// Returns `+∞` when the bound cannot be established.
    pub fn distance_bound(&self, target: &ComplexInterval) -> f64 {
        let diff = self - target;
        let precision = diff.precision();
        let re = diff.re.mag_float();
        let im = diff.im.mag_float();
        let re_sq = precision.round_up(&re * &re);
        let im_sq = precision.round_up(&im * &im);
        let sum = precision.round_up(&re_sq + &im_sq);
        let bound = precision.round_up(sum.sqrt_ref()).to_f64_round(Round::Up);
        if bound.is_nan() {
            f64::INFINITY
        } else {
            bound
        }
    }

    /// Whether every point of the box lies strictly within `tolerance` of every
    /// point of `target`.
    pub fn is_within(&self, target: &ComplexInterval, tolerance: f64) -> bool {
        self.distance_bound(target) < tolerance
    }
}

impl Add<&ComplexInterval> for &ComplexInterval {
    type Output = ComplexInterval;

    fn add(self, rhs: &ComplexInterval) -> ComplexInterval {
        ComplexInterval::new(&self.re + &rhs.re, &self.im + &rhs.im)
    }
}

impl Sub<&ComplexInterval> for &ComplexInterval {
    type Output = ComplexInterval;

    fn sub(self, rhs: &ComplexInterval) -> ComplexInterval {
        ComplexInterval::new(&self.re - &rhs.re, &self.im - &rhs.im)
    }
}

impl Mul<&ComplexInterval> for &ComplexInterval {
    type Output = ComplexInterval;

    fn mul(self, rhs: &ComplexInterval) -> ComplexInterval {
        ComplexInterval::new(
            &self.re * &rhs.re - &self.im * &rhs.im,
            &self.re * &rhs.im + &self.im * &rhs.re,
        )
    }
}

impl Div<&ComplexInterval> for &ComplexInterval {
    type Output = ComplexInterval;

    fn div(self, rhs: &ComplexInterval) -> ComplexInterval {
        let denom = rhs.norm_sqr();
        ComplexInterval::new(
            (&self.re * &rhs.re + &self.im * &rhs.im) / &denom,
            (&self.im * &rhs.re - &self.re * &rhs.im) / &denom,
        )
    }
}

impl Neg for &ComplexInterval {
    type Output = ComplexInterval;

    fn neg(self) -> ComplexInterval {
        ComplexInterval::new(-&self.re, -&self.im)
    }
}

forward_owned_ops!(ComplexInterval);

impl fmt::Display for ComplexInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}*I", self.re, self.im)
    }
}
