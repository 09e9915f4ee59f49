#![deny(missing_docs)]
#![doc = "Certification of logarithmic gluing equations and hyperbolicity for ideal triangulations."]

/// Logarithmic gluing-equation verifier.
pub mod gluing;
/// Canonical hashing helpers.
pub mod hash;
/// Orchestration of solver and gluing verifier.
pub mod hyperbolicity;
/// Tolerance policy.
pub mod policy;
/// Check records and certificate reports.
pub mod report;
/// Canonical JSON helpers.
pub mod serde;
/// Shape solver seam and the enclosure-table adapter.
pub mod solver;
/// Triangulation data model.
pub mod triangulation;

pub use gluing::{shape_logarithms, LogarithmicGluingVerifier};
pub use hash::stable_hash_string;
pub use hyperbolicity::{verify_hyperbolicity, HyperbolicityVerifier, VerificationResult};
pub use policy::GluingPolicy;
pub use report::{CheckKind, GluingCheck, GluingReport};
pub use crate::serde::{from_json_slice, to_canonical_json_bytes};
pub use solver::{EnclosureTable, ShapeBox, ShapeSolver};
pub use triangulation::{CuspRecord, CuspStatus, GluingEquation, Triangulation};

/// `tracing` target for the advisory diagnostic channel.
pub const LOG_TARGET: &str = "hypcert::verify";
