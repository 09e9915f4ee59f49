use std::cmp::Ordering;

use hypcert_core::errors::{ErrorInfo, HvError};
use rug::float::{self, Round};
use rug::ops::AssignRound;
use rug::Float;
use serde::{Deserialize, Serialize};

/// Smallest supported working precision, in significand bits.
pub const MIN_PRECISION_BITS: u32 = 2;

/// Significand bits of binary64, the default working precision.
pub const DOUBLE_PRECISION_BITS: u32 = 53;

/// Largest working precision the MPFR backend accepts.
pub fn max_precision_bits() -> u32 {
    float::prec_max()
}

/// Working precision of an interval field, in significand bits.
///
/// Precision is a plain value carried by every [`crate::Interval`]; there is no
/// process-wide setting. Combining intervals of different precision yields the
/// coarser of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Precision(u32);

impl Precision {
    /// Validates and wraps a bit count.
    pub fn new(bits: u32) -> Result<Self, HvError> {
        let max = max_precision_bits();
        if !(MIN_PRECISION_BITS..=max).contains(&bits) {
            return Err(HvError::Precision(
                ErrorInfo::new(
                    "precision-out-of-range",
                    format!("working precision of {bits} bits is not supported"),
                )
                .with_context("bits", bits)
                .with_context("min", MIN_PRECISION_BITS)
                .with_context("max", max),
            ));
        }
        Ok(Self(bits))
    }

    /// Same precision as binary64.
    pub const fn double() -> Self {
        Self(DOUBLE_PRECISION_BITS)
    }

    /// Number of significand bits.
    pub fn bits(self) -> u32 {
        self.0
    }

    /// The coarser of two precisions.
    pub fn coarser(self, other: Self) -> Self {
        self.min(other)
    }

    /// `value` rounded towards `-∞` to this precision.
    pub(crate) fn round_down<T>(self, value: T) -> Float
    where
        Float: AssignRound<T, Round = Round, Ordering = Ordering>,
    {
        Float::with_val_round(self.0, value, Round::Down).0
    }

    /// `value` rounded towards `+∞` to this precision.
    pub(crate) fn round_up<T>(self, value: T) -> Float
    where
        Float: AssignRound<T, Round = Round, Ordering = Ordering>,
    {
        Float::with_val_round(self.0, value, Round::Up).0
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::double()
    }
}

impl TryFrom<u32> for Precision {
    type Error = HvError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        Self::new(bits)
    }
}

impl From<Precision> for u32 {
    fn from(precision: Precision) -> Self {
        precision.0
    }
}
