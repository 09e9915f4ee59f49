use std::f64::consts::PI;

use hypcert_core::errors::{ErrorInfo, HvError};
use serde::{Deserialize, Serialize};

/// Tolerance policy for the logarithmic gluing equations.
///
/// The rectangular equations are already certified, so each logarithmic sum
/// can only be off by an integer multiple of `2πi`. Any tolerance below `π`
/// separates the expected multiple from its neighbours.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GluingPolicy {
    /// Strict upper bound on the worst-case distance of each sum from its target.
    #[serde(default = "GluingPolicy::default_tolerance")]
    pub tolerance: f64,
}

impl GluingPolicy {
    const fn default_tolerance() -> f64 {
        0.1
    }

    /// Policy with a custom tolerance.
    pub fn with_tolerance(tolerance: f64) -> Result<Self, HvError> {
        let policy = Self { tolerance };
        policy.validate()?;
        Ok(policy)
    }

    /// Rejects tolerances that cannot separate multiples of `2πi`.
    pub fn validate(&self) -> Result<(), HvError> {
        if !(self.tolerance > 0.0 && self.tolerance < PI) {
            return Err(HvError::Policy(
                ErrorInfo::new(
                    "tolerance-out-of-range",
                    format!("tolerance {} must lie in (0, π)", self.tolerance),
                )
                .with_context("tolerance", self.tolerance),
            ));
        }
        Ok(())
    }
}

impl Default for GluingPolicy {
    fn default() -> Self {
        Self {
            tolerance: Self::default_tolerance(),
        }
    }
}
