#![allow(dead_code)]

use std::path::PathBuf;

use hypcert_interval::{ComplexInterval, Precision};
use hypcert_verify::{from_json_slice, CuspRecord, EnclosureTable, GluingEquation, Triangulation};

pub fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .canonicalize()
        .unwrap()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn load_triangulation(name: &str) -> Triangulation {
    let path = workspace_root()
        .join("fixtures/triangulations")
        .join(format!("{name}.json"));
    Triangulation::from_json_path(path).unwrap()
}

pub fn load_enclosures(name: &str) -> EnclosureTable {
    let path = workspace_root()
        .join("fixtures/enclosures")
        .join(format!("{name}.json"));
    from_json_slice(&std::fs::read(path).unwrap()).unwrap()
}

/// Shape of the regular ideal tetrahedron, `e^{iπ/3}`; its three shape
/// parameters coincide, so every logarithm is `iπ/3`.
pub fn regular_shape(precision: Precision) -> ComplexInterval {
    ComplexInterval::from_bounds(
        (0.49999999999999, 0.50000000000001),
        (0.86602540378443, 0.86602540378444),
        precision,
    )
    .unwrap()
}

pub fn rows(rows: &[&[i64]]) -> Vec<GluingEquation> {
    rows.iter().map(|row| GluingEquation::new(row.to_vec())).collect()
}

/// One tetrahedron, one complete cusp: the edge sums to `6·iπ/3 = 2πi` and
/// both cusp equations cancel.
pub fn single_complete() -> Triangulation {
    Triangulation {
        name: "synthetic-complete".into(),
        num_tetrahedra: 1,
        cusps: vec![CuspRecord::complete()],
        equations: rows(&[&[2, 2, 2], &[1, -1, 0], &[0, 1, -1]]),
    }
}

/// One tetrahedron with a complete and a filled cusp; the filling curve sums
/// to `2πi`.
pub fn complete_then_filled() -> Triangulation {
    Triangulation {
        name: "synthetic-two-cusps".into(),
        num_tetrahedra: 1,
        cusps: vec![CuspRecord::complete(), CuspRecord::filled(1, 1)],
        equations: rows(&[&[2, 2, 2], &[1, -1, 0], &[0, 1, -1], &[3, 3, 0]]),
    }
}
