use std::collections::BTreeMap;

use hypcert_core::errors::{ErrorInfo, HvError};
use hypcert_core::provenance::{CertificateProvenance, SchemaVersion};
use hypcert_interval::{ComplexInterval, Precision};
use tracing::{debug, info};

use crate::policy::GluingPolicy;
use crate::report::{CheckKind, GluingCheck, GluingReport};
use crate::triangulation::{
    check_structure, structure_error, CuspRecord, GluingEquation, Triangulation,
};
use crate::LOG_TARGET;

/// Principal logarithms `[log z0, log z0', log z0'', log z1, …]`.
///
/// `z' = 1/(1 − z)` and `z'' = (z − 1)/z`; the latter is evaluated as
/// `1 − 1/z`, which names the same number with a tighter enclosure.
pub fn shape_logarithms(shapes: &[ComplexInterval]) -> Vec<ComplexInterval> {
    shapes
        .iter()
        .flat_map(|z| {
            let one = ComplexInterval::one(z.precision());
            let z_prime = (&one - z).recip();
            let z_double_prime = &one - &z.recip();
            [z.log(), z_prime.log(), z_double_prime.log()]
        })
        .collect()
}

fn evaluate_lhs(
    equation: &GluingEquation,
    logs: &[ComplexInterval],
    precision: Precision,
) -> ComplexInterval {
    equation
        .coefficients()
        .iter()
        .zip(logs)
        .filter(|(coefficient, _)| **coefficient != 0)
        .fold(ComplexInterval::zero(precision), |acc, (&coefficient, log)| {
            acc + log.scale(coefficient)
        })
}

#[derive(Debug, Default)]
struct Evaluation {
    certified: bool,
    precision: Precision,
    checks: Vec<GluingCheck>,
}

impl Evaluation {
    fn record(&mut self, check: GluingCheck) -> bool {
        let pass = check.pass;
        if pass {
            debug!(target: LOG_TARGET, kind = ?check.kind, metric = ?check.metric, "check passed");
        } else {
            info!(target: LOG_TARGET, kind = ?check.kind, "{}", check.failure_message());
        }
        self.checks.push(check);
        pass
    }
}

/// Verifies positive orientation and the logarithmic gluing equations for
/// shape enclosures that already contain a solution of the rectangular
/// equations.
///
/// Since such a solution satisfies every logarithmic equation up to an integer
/// multiple of `2πi`, it suffices to show that each sum lies within the policy
/// tolerance of its expected multiple.
#[derive(Debug, Clone, Default)]
pub struct LogarithmicGluingVerifier {
    policy: GluingPolicy,
}

impl LogarithmicGluingVerifier {
    /// Verifier applying the given policy.
    pub fn new(policy: GluingPolicy) -> Result<Self, HvError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    /// Policy in force.
    pub fn policy(&self) -> &GluingPolicy {
        &self.policy
    }

    /// Returns `Ok(true)` when every shape is positively oriented and every
    /// equation sums to its target, `Ok(false)` at the first failed check, and
    /// an error when the inputs are structurally inconsistent.
    pub fn verify(
        &self,
        num_tetrahedra: usize,
        cusps: &[CuspRecord],
        equations: &[GluingEquation],
        shapes: &[ComplexInterval],
    ) -> Result<bool, HvError> {
        Ok(self
            .evaluate(num_tetrahedra, cusps, equations, shapes)?
            .certified)
    }

    /// [`Self::verify`] over a [`Triangulation`].
    pub fn verify_triangulation(
        &self,
        triangulation: &Triangulation,
        shapes: &[ComplexInterval],
    ) -> Result<bool, HvError> {
        self.verify(
            triangulation.num_tetrahedra,
            &triangulation.cusps,
            &triangulation.equations,
            shapes,
        )
    }

    /// Runs the same checks and records each of them.
    pub fn verify_with_report(
        &self,
        triangulation: &Triangulation,
        shapes: &[ComplexInterval],
    ) -> Result<GluingReport, HvError> {
        let evaluation = self.evaluate(
            triangulation.num_tetrahedra,
            &triangulation.cusps,
            &triangulation.equations,
            shapes,
        )?;
        let provenance = CertificateProvenance {
            schema_version: SchemaVersion::new(1, 0, 0),
            triangulation: triangulation.name.clone(),
            triangulation_hash: triangulation.canonical_hash()?,
            precision_bits: evaluation.precision.bits(),
            tolerance: self.policy.tolerance,
            tool_versions: BTreeMap::from([(
                env!("CARGO_PKG_NAME").to_string(),
                env!("CARGO_PKG_VERSION").to_string(),
            )]),
        };
        GluingReport::new(evaluation.certified, evaluation.checks, provenance)
    }

    fn compare(
        &self,
        kind: CheckKind,
        row: usize,
        lhs: &ComplexInterval,
        target: &ComplexInterval,
    ) -> GluingCheck {
        let distance = lhs.distance_bound(target);
        GluingCheck::equation(kind, row, distance, distance < self.policy.tolerance)
    }

    fn evaluate(
        &self,
        num_tetrahedra: usize,
        cusps: &[CuspRecord],
        equations: &[GluingEquation],
        shapes: &[ComplexInterval],
    ) -> Result<Evaluation, HvError> {
        check_structure(num_tetrahedra, cusps, equations)?;
        if shapes.len() != num_tetrahedra {
            return Err(HvError::Structure(
                ErrorInfo::new(
                    "shape-count-mismatch",
                    format!(
                        "expected {num_tetrahedra} shapes, found {}",
                        shapes.len()
                    ),
                )
                .with_context("expected", num_tetrahedra)
                .with_context("found", shapes.len()),
            ));
        }

        let precision = shapes
            .iter()
            .map(ComplexInterval::precision)
            .min()
            .unwrap_or_default();
        let mut evaluation = Evaluation {
            precision,
            ..Evaluation::default()
        };

        for (tetrahedron, shape) in shapes.iter().enumerate() {
            let im = shape.im();
            let check =
                GluingCheck::orientation(tetrahedron, im.lo(), im.is_strictly_positive());
            if !evaluation.record(check) {
                return Ok(evaluation);
            }
        }

        let logs = shape_logarithms(shapes);
        let two_pi_i = ComplexInterval::two_pi_i(precision);
        let mut rows = equations.iter().enumerate();
        let mut next_row = || {
            rows.next().ok_or_else(|| {
                structure_error("equation-list-exhausted", "ran out of gluing equations")
            })
        };

        for edge in 0..num_tetrahedra {
            let (row, equation) = next_row()?;
            let lhs = evaluate_lhs(equation, &logs, precision);
            if !evaluation.record(self.compare(CheckKind::Edge { edge }, row, &lhs, &two_pi_i)) {
                return Ok(evaluation);
            }
        }

        for (cusp, record) in cusps.iter().enumerate() {
            let target = record.status.target(precision);
            for equation_index in 0..record.status.equation_count() {
                let (row, equation) = next_row()?;
                let lhs = evaluate_lhs(equation, &logs, precision);
                let kind = CheckKind::Cusp {
                    cusp,
                    equation: equation_index,
                };
                if !evaluation.record(self.compare(kind, row, &lhs, &target)) {
                    return Ok(evaluation);
                }
            }
        }

        evaluation.certified = true;
        Ok(evaluation)
    }
}
