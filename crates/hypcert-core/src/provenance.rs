//! Provenance and schema descriptors attached to verification reports.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Semantic version describing the schema of serialized payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Major version incremented for breaking changes.
    pub major: u32,
    /// Minor version incremented for additive changes.
    pub minor: u32,
    /// Patch version incremented for bug fixes.
    pub patch: u32,
}

impl SchemaVersion {
    /// Creates a new schema version descriptor.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

/// Provenance recorded alongside a gluing certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CertificateProvenance {
    /// Schema of the enclosing report.
    pub schema_version: SchemaVersion,
    /// Name of the triangulation as supplied by the caller.
    pub triangulation: String,
    /// Canonical hash of the triangulation's combinatorial data.
    pub triangulation_hash: String,
    /// Working precision, in significand bits, of the shape enclosures.
    pub precision_bits: u32,
    /// Absolute tolerance applied to every logarithmic equation.
    pub tolerance: f64,
    /// Version map for the crates involved in the run.
    pub tool_versions: BTreeMap<String, String>,
}
