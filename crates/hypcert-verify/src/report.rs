use hypcert_core::errors::HvError;
use hypcert_core::provenance::CertificateProvenance;
use serde::{Deserialize, Serialize};

use crate::hash::stable_hash_string;
use crate::serde::to_canonical_json_bytes;

/// Which check a [`GluingCheck`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckKind {
    /// Positive orientation of one tetrahedron.
    Orientation {
        /// Tetrahedron index.
        tetrahedron: usize,
    },
    /// Edge equation, indexed like the tetrahedra.
    Edge {
        /// Edge index.
        edge: usize,
    },
    /// One equation of one cusp.
    Cusp {
        /// Cusp index.
        cusp: usize,
        /// Position of the equation within the cusp (0 = meridian or filling curve).
        equation: usize,
    },
}

/// Outcome of a single check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GluingCheck {
    /// What was checked.
    pub kind: CheckKind,
    /// Whether the check passed.
    pub pass: bool,
    /// Lower end of the imaginary part for orientation checks, worst-case
    /// distance from the target for equation checks. `None` when unbounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<f64>,
    /// Row of the equation matrix consumed by an equation check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equation_row: Option<usize>,
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

impl GluingCheck {
    pub(crate) fn orientation(tetrahedron: usize, im_lower: f64, pass: bool) -> Self {
        Self {
            kind: CheckKind::Orientation { tetrahedron },
            pass,
            metric: finite(im_lower),
            equation_row: None,
        }
    }

    pub(crate) fn equation(kind: CheckKind, row: usize, distance: f64, pass: bool) -> Self {
        Self {
            kind,
            pass,
            metric: finite(distance),
            equation_row: Some(row),
        }
    }

    /// Diagnostic line emitted for a failed check.
    pub fn failure_message(&self) -> String {
        match self.kind {
            CheckKind::Orientation { .. } => "shape with non-positive imaginary part".to_string(),
            CheckKind::Edge { edge } => format!("edge equation {edge} failed"),
            CheckKind::Cusp { cusp, equation } => {
                format!("equation {equation} for cusp {cusp} failed")
            }
        }
    }
}

/// Record of a gluing verification, stopping at the first failed check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GluingReport {
    /// Content hash over checks and provenance.
    pub analysis_hash: String,
    /// Whether every check passed.
    pub certified: bool,
    /// Executed checks in order.
    pub checks: Vec<GluingCheck>,
    /// Inputs and settings of the run.
    pub provenance: CertificateProvenance,
}

impl GluingReport {
    /// Assembles a report and computes its hash.
    pub fn new(
        certified: bool,
        checks: Vec<GluingCheck>,
        provenance: CertificateProvenance,
    ) -> Result<Self, HvError> {
        let analysis_hash = stable_hash_string(&(certified, &checks, &provenance))?;
        Ok(Self {
            analysis_hash,
            certified,
            checks,
            provenance,
        })
    }

    /// The check that ended an uncertified run.
    pub fn first_failure(&self) -> Option<&GluingCheck> {
        self.checks.iter().find(|check| !check.pass)
    }

    /// Canonical JSON bytes of the report.
    pub fn to_bytes(&self) -> Result<Vec<u8>, HvError> {
        to_canonical_json_bytes(self)
    }
}
