use hypcert_core::errors::{ErrorInfo, HvError};
use hypcert_interval::{ComplexInterval, Interval, Precision};
use serde::{Deserialize, Serialize};

use crate::triangulation::Triangulation;

/// Source of certified shape enclosures for the rectangular gluing equations.
///
/// Implementations return one enclosure per tetrahedron, each guaranteed to
/// contain a common solution of the rectangular equations, or an
/// [`HvError::Solver`] when no solution can be certified at the requested
/// precision. The orchestrator treats that failure as an uncertified result
/// that may succeed at a higher precision.
pub trait ShapeSolver: Send + Sync {
    /// Certified enclosures of the shapes at `precision`.
    fn certified_shapes(
        &self,
        triangulation: &Triangulation,
        precision: Precision,
    ) -> Result<Vec<ComplexInterval>, HvError>;
}

/// Rectangular enclosure as stored in an [`EnclosureTable`].
///
/// Bounds are decimal strings so that boxes certified beyond binary64 keep
/// their width; each bound is rounded outward when the box is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeBox {
    /// `[lo, hi]` of the real part.
    pub re: [String; 2],
    /// `[lo, hi]` of the imaginary part.
    pub im: [String; 2],
}

impl ShapeBox {
    /// Box with the given decimal bounds.
    pub fn new(re: [&str; 2], im: [&str; 2]) -> Self {
        Self {
            re: re.map(str::to_string),
            im: im.map(str::to_string),
        }
    }

    /// Converts the box into an interval of the given precision.
    pub fn to_interval(&self, precision: Precision) -> Result<ComplexInterval, HvError> {
        Ok(ComplexInterval::new(
            Interval::parse(&self.re[0], &self.re[1], precision)?,
            Interval::parse(&self.im[0], &self.im[1], precision)?,
        ))
    }
}

/// Shape solver backed by enclosures certified ahead of time.
///
/// Requests at or below the certified precision are answered by rounding the
/// stored boxes outward; anything finer cannot be certified from the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnclosureTable {
    /// Precision at which the boxes were certified.
    pub certified_precision: Precision,
    /// One box per tetrahedron.
    pub shapes: Vec<ShapeBox>,
}

impl EnclosureTable {
    /// Table of boxes certified at `certified_precision`.
    pub fn new(certified_precision: Precision, shapes: Vec<ShapeBox>) -> Self {
        Self {
            certified_precision,
            shapes,
        }
    }
}

impl ShapeSolver for EnclosureTable {
    fn certified_shapes(
        &self,
        triangulation: &Triangulation,
        precision: Precision,
    ) -> Result<Vec<ComplexInterval>, HvError> {
        if precision > self.certified_precision {
            return Err(HvError::Solver(
                ErrorInfo::new(
                    "precision-unavailable",
                    format!(
                        "enclosures were certified at {} bits, {} requested",
                        self.certified_precision.bits(),
                        precision.bits()
                    ),
                )
                .with_context("certified_bits", self.certified_precision.bits())
                .with_context("requested_bits", precision.bits())
                .with_hint("recertify the shapes at a higher precision"),
            ));
        }
        if self.shapes.len() != triangulation.num_tetrahedra {
            return Err(HvError::Structure(
                ErrorInfo::new(
                    "shape-count-mismatch",
                    "enclosure table does not match the triangulation",
                )
                .with_context("expected", triangulation.num_tetrahedra)
                .with_context("found", self.shapes.len()),
            ));
        }
        self.shapes
            .iter()
            .map(|shape| shape.to_interval(precision))
            .collect()
    }
}
