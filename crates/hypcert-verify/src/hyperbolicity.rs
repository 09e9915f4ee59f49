use hypcert_core::errors::HvError;
use hypcert_interval::{ComplexInterval, Precision};
use serde::Serialize;
use tracing::{debug, info};

use crate::gluing::LogarithmicGluingVerifier;
use crate::policy::GluingPolicy;
use crate::solver::ShapeSolver;
use crate::triangulation::Triangulation;
use crate::LOG_TARGET;

/// Outcome of [`HyperbolicityVerifier::verify`].
///
/// Shapes are present exactly when the result is certified; they then enclose
/// the shapes of a genuine complete hyperbolic structure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationResult {
    certified: bool,
    shapes: Vec<ComplexInterval>,
}

impl VerificationResult {
    fn certified(shapes: Vec<ComplexInterval>) -> Self {
        Self {
            certified: true,
            shapes,
        }
    }

    /// The negative result `(false, [])`.
    pub fn uncertified() -> Self {
        Self {
            certified: false,
            shapes: Vec::new(),
        }
    }

    /// Whether hyperbolicity was certified.
    pub fn is_certified(&self) -> bool {
        self.certified
    }

    /// Certified shape enclosures; empty when uncertified.
    pub fn shapes(&self) -> &[ComplexInterval] {
        &self.shapes
    }

    /// `(certified, shapes)`.
    pub fn into_parts(self) -> (bool, Vec<ComplexInterval>) {
        (self.certified, self.shapes)
    }
}

/// Certifies hyperbolicity by combining a [`ShapeSolver`] with the
/// [`LogarithmicGluingVerifier`].
#[derive(Debug, Clone, Default)]
pub struct HyperbolicityVerifier {
    gluing: LogarithmicGluingVerifier,
}

impl HyperbolicityVerifier {
    /// Verifier applying the given tolerance policy.
    pub fn new(policy: GluingPolicy) -> Result<Self, HvError> {
        Ok(Self {
            gluing: LogarithmicGluingVerifier::new(policy)?,
        })
    }

    /// The underlying gluing verifier.
    pub fn gluing(&self) -> &LogarithmicGluingVerifier {
        &self.gluing
    }

    /// Requests shapes at `precision` and certifies them.
    ///
    /// Solver failure and failed checks both yield `(false, [])`; only
    /// structural defects in the inputs surface as errors. No retry is
    /// attempted; callers may try again at a higher precision.
    pub fn verify<S>(
        &self,
        manifold: &Triangulation,
        solver: &S,
        precision: Precision,
    ) -> Result<VerificationResult, HvError>
    where
        S: ShapeSolver + ?Sized,
    {
        manifold.validate()?;
        let shapes = match solver.certified_shapes(manifold, precision) {
            Ok(shapes) => shapes,
            Err(err) if err.is_solver_failure() => {
                info!(
                    target: LOG_TARGET,
                    manifold = %manifold.name,
                    bits = precision.bits(),
                    reason = %err,
                    "could not certify solution to rectangular gluing equations"
                );
                return Ok(VerificationResult::uncertified());
            }
            Err(err) => return Err(err),
        };

        if !self.gluing.verify_triangulation(manifold, &shapes)? {
            return Ok(VerificationResult::uncertified());
        }
        debug!(
            target: LOG_TARGET,
            manifold = %manifold.name,
            cusps = manifold.num_cusps(),
            bits = precision.bits(),
            "hyperbolicity certified"
        );
        Ok(VerificationResult::certified(shapes))
    }
}

/// [`HyperbolicityVerifier::verify`] with the default policy.
pub fn verify_hyperbolicity<S>(
    manifold: &Triangulation,
    solver: &S,
    precision: Precision,
) -> Result<VerificationResult, HvError>
where
    S: ShapeSolver + ?Sized,
{
    HyperbolicityVerifier::default().verify(manifold, solver, precision)
}
