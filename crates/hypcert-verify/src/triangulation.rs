use std::fs;
use std::path::Path;

use hypcert_core::errors::{ErrorInfo, HvError};
use hypcert_interval::{ComplexInterval, Precision};
use serde::{Deserialize, Serialize};

use crate::hash::stable_hash_string;
use crate::serde::from_json_slice;

pub(crate) fn structure_error(code: &str, message: impl Into<String>) -> HvError {
    HvError::Structure(ErrorInfo::new(code, message.into()))
}

/// Completion status of one cusp.
///
/// The status decides how many logarithmic equations the cusp contributes and
/// which multiple of `2πi` they must sum to; the equation cursor of the
/// verifier relies on both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CuspStatus {
    /// Unfilled cusp: meridian and longitude equations, each summing to `0`.
    Complete,
    /// Dehn-filled cusp: one equation for the filling curve, summing to `2πi`.
    Filled {
        /// Meridian coefficient of the filling slope.
        meridian: i64,
        /// Longitude coefficient of the filling slope.
        longitude: i64,
    },
}

impl CuspStatus {
    /// Number of logarithmic equations contributed by the cusp.
    pub fn equation_count(&self) -> usize {
        match self {
            CuspStatus::Complete => 2,
            CuspStatus::Filled { .. } => 1,
        }
    }

    /// Value each of the cusp's equations must sum to.
    pub fn target(&self, precision: Precision) -> ComplexInterval {
        match self {
            CuspStatus::Complete => ComplexInterval::zero(precision),
            CuspStatus::Filled { .. } => ComplexInterval::two_pi_i(precision),
        }
    }

    /// Whether the cusp is left unfilled.
    pub fn is_complete(&self) -> bool {
        matches!(self, CuspStatus::Complete)
    }
}

/// Per-cusp metadata supplied by the triangulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuspRecord {
    /// Completion status.
    pub status: CuspStatus,
}

impl CuspRecord {
    /// An unfilled cusp.
    pub fn complete() -> Self {
        Self {
            status: CuspStatus::Complete,
        }
    }

    /// A cusp filled along `meridian·μ + longitude·λ`.
    pub fn filled(meridian: i64, longitude: i64) -> Self {
        Self {
            status: CuspStatus::Filled {
                meridian,
                longitude,
            },
        }
    }
}

/// Integer coefficients of one logarithmic gluing equation.
///
/// Column `3t + k` multiplies `log z_t`, `log z_t'`, `log z_t''` for
/// `k = 0, 1, 2` respectively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GluingEquation(Vec<i64>);

impl GluingEquation {
    /// Wraps a coefficient row.
    pub fn new(coefficients: Vec<i64>) -> Self {
        Self(coefficients)
    }

    /// Coefficients in column order.
    pub fn coefficients(&self) -> &[i64] {
        &self.0
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<i64>> for GluingEquation {
    fn from(coefficients: Vec<i64>) -> Self {
        Self::new(coefficients)
    }
}

/// Combinatorial gluing data of an ideal triangulation.
///
/// Equations are ordered as the edge equations (one per tetrahedron) followed
/// by the cusp equations, cusp by cusp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triangulation {
    /// Human readable name, e.g. a census label.
    #[serde(default)]
    pub name: String,
    /// Number of ideal tetrahedra.
    pub num_tetrahedra: usize,
    /// Cusp records in cusp order.
    pub cusps: Vec<CuspRecord>,
    /// Gluing equations, edges first.
    pub equations: Vec<GluingEquation>,
}

fn layout_overflow(num_tetrahedra: usize, cusps: usize) -> HvError {
    HvError::Structure(
        ErrorInfo::new(
            "equation-count-overflow",
            format!("{num_tetrahedra} tetrahedra overflow the gluing equation layout"),
        )
        .with_context("tetrahedra", num_tetrahedra)
        .with_context("cusps", cusps),
    )
}

/// Number of equations implied by the tetrahedron and cusp counts.
pub fn expected_equation_count(
    num_tetrahedra: usize,
    cusps: &[CuspRecord],
) -> Result<usize, HvError> {
    cusps
        .iter()
        .try_fold(num_tetrahedra, |total, cusp| {
            total.checked_add(cusp.status.equation_count())
        })
        .ok_or_else(|| layout_overflow(num_tetrahedra, cusps.len()))
}

/// Checks the structural invariants tying counts, cusps and equation rows together.
pub fn check_structure(
    num_tetrahedra: usize,
    cusps: &[CuspRecord],
    equations: &[GluingEquation],
) -> Result<(), HvError> {
    if num_tetrahedra == 0 {
        return Err(structure_error(
            "empty-triangulation",
            "a triangulation needs at least one tetrahedron",
        ));
    }
    let expected = expected_equation_count(num_tetrahedra, cusps)?;
    if equations.len() != expected {
        return Err(HvError::Structure(
            ErrorInfo::new(
                "equation-count-mismatch",
                format!(
                    "expected {expected} gluing equations, found {}",
                    equations.len()
                ),
            )
            .with_context("expected", expected)
            .with_context("found", equations.len())
            .with_context("tetrahedra", num_tetrahedra)
            .with_context("cusps", cusps.len())
            .with_hint("complete cusps contribute two equations, filled cusps one"),
        ));
    }
    let width = num_tetrahedra
        .checked_mul(3)
        .ok_or_else(|| layout_overflow(num_tetrahedra, cusps.len()))?;
    if let Some((index, equation)) = equations
        .iter()
        .enumerate()
        .find(|(_, equation)| equation.len() != width)
    {
        return Err(HvError::Structure(
            ErrorInfo::new(
                "equation-width-mismatch",
                format!(
                    "equation {index} has {} coefficients, expected {width}",
                    equation.len()
                ),
            )
            .with_context("equation", index)
            .with_context("expected", width)
            .with_context("found", equation.len()),
        ));
    }
    Ok(())
}

impl Triangulation {
    /// Validates the structural invariants of the triangulation.
    pub fn validate(&self) -> Result<(), HvError> {
        check_structure(self.num_tetrahedra, &self.cusps, &self.equations)
    }

    /// Number of cusps.
    pub fn num_cusps(&self) -> usize {
        self.cusps.len()
    }

    /// The edge equations.
    pub fn edge_equations(&self) -> &[GluingEquation] {
        let end = self.num_tetrahedra.min(self.equations.len());
        &self.equations[..end]
    }

    /// Hash of the combinatorial data; the name does not participate.
    pub fn canonical_hash(&self) -> Result<String, HvError> {
        stable_hash_string(&(&self.num_tetrahedra, &self.cusps, &self.equations))
    }

    /// Decodes and validates a triangulation from JSON bytes.
    pub fn from_json_slice(data: &[u8]) -> Result<Self, HvError> {
        let triangulation: Self = from_json_slice(data)?;
        triangulation.validate()?;
        Ok(triangulation)
    }

    /// Reads, decodes and validates a triangulation from a JSON file.
    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self, HvError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|err| {
            HvError::Serde(
                ErrorInfo::new("fixture-read", err.to_string())
                    .with_context("path", path.display()),
            )
        })?;
        Self::from_json_slice(&bytes)
    }
}
