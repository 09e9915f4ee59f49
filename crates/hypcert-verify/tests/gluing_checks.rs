mod common;

use hypcert_core::errors::HvError;
use hypcert_interval::{ComplexInterval, Precision};
use hypcert_verify::{
    shape_logarithms, CheckKind, CuspRecord, GluingPolicy, LogarithmicGluingVerifier,
};

use common::{complete_then_filled, init_tracing, regular_shape, rows, single_complete};

fn double() -> Precision {
    Precision::double()
}

#[test]
fn single_tetrahedron_with_complete_cusp_is_certified() -> Result<(), HvError> {
    init_tracing();
    let tri = single_complete();
    let verifier = LogarithmicGluingVerifier::default();
    let shapes = [regular_shape(double())];
    assert!(verifier.verify(tri.num_tetrahedra, &tri.cusps, &tri.equations, &shapes)?);
    Ok(())
}

#[test]
fn logarithms_are_interleaved_per_tetrahedron() {
    let first = regular_shape(double());
    let second = ComplexInterval::point(0.0, 1.0, double());
    let logs = shape_logarithms(&[first, second]);
    assert_eq!(logs.len(), 6);
    let third_of_pi = std::f64::consts::FRAC_PI_3;
    for log in &logs[..3] {
        assert!(log.im().contains(third_of_pi));
    }
    // z = i: log z = iπ/2, z' = (1 + i)/2, z'' = 1 + i
    assert!(logs[3].im().contains(std::f64::consts::FRAC_PI_2));
    assert!(logs[4].im().contains(std::f64::consts::FRAC_PI_4));
    assert!(logs[5].contains(0.5 * 2f64.ln(), std::f64::consts::FRAC_PI_4));
}

#[test]
fn negatively_oriented_shape_fails_before_any_equation() -> Result<(), HvError> {
    init_tracing();
    let tri = single_complete();
    let verifier = LogarithmicGluingVerifier::default();
    let mirrored = ComplexInterval::point(0.5, -3f64.sqrt() / 2.0, double());
    assert!(!verifier.verify_triangulation(&tri, &[mirrored.clone()])?);

    let report = verifier.verify_with_report(&tri, &[mirrored])?;
    assert!(!report.certified);
    assert_eq!(report.checks.len(), 1);
    assert_eq!(
        report.checks[0].kind,
        CheckKind::Orientation { tetrahedron: 0 }
    );
    Ok(())
}

#[test]
fn imaginary_part_must_be_strictly_positive() -> Result<(), HvError> {
    let tri = single_complete();
    let verifier = LogarithmicGluingVerifier::default();
    let straddling = ComplexInterval::from_bounds((0.5, 0.5), (-1e-9, 0.8), double())?;
    assert!(!verifier.verify_triangulation(&tri, &[straddling])?);
    let flat = ComplexInterval::from_bounds((0.5, 0.5), (0.0, 0.0), double())?;
    assert!(!verifier.verify_triangulation(&tri, &[flat])?);
    Ok(())
}

#[test]
fn edge_sum_off_by_a_full_turn_fails() -> Result<(), HvError> {
    init_tracing();
    let mut tri = single_complete();
    tri.equations[0] = vec![4, 4, 4].into();
    let verifier = LogarithmicGluingVerifier::default();
    let shapes = [regular_shape(double())];
    assert!(!verifier.verify_triangulation(&tri, &shapes)?);

    let report = verifier.verify_with_report(&tri, &shapes)?;
    let failure = report.first_failure().expect("edge failure recorded");
    assert_eq!(failure.kind, CheckKind::Edge { edge: 0 });
    assert_eq!(failure.equation_row, Some(0));
    let distance = failure.metric.expect("bounded distance");
    assert!((distance - 2.0 * std::f64::consts::PI).abs() < 1e-9);
    assert_eq!(failure.failure_message(), "edge equation 0 failed");
    Ok(())
}

#[test]
fn edge_sum_of_zero_is_the_wrong_multiple() -> Result<(), HvError> {
    let mut tri = single_complete();
    tri.equations[0] = vec![1, -1, 0].into();
    let verifier = LogarithmicGluingVerifier::default();
    assert!(!verifier.verify_triangulation(&tri, &[regular_shape(double())])?);
    Ok(())
}

#[test]
fn filled_cusp_targets_two_pi_i() -> Result<(), HvError> {
    let tri = complete_then_filled();
    let verifier = LogarithmicGluingVerifier::default();
    let shapes = [regular_shape(double())];
    assert!(verifier.verify_triangulation(&tri, &shapes)?);

    let report = verifier.verify_with_report(&tri, &shapes)?;
    assert!(report.certified);
    // one orientation, one edge, two complete-cusp and one filled-cusp check
    assert_eq!(report.checks.len(), 5);
    assert_eq!(
        report.checks[4].kind,
        CheckKind::Cusp {
            cusp: 1,
            equation: 0
        }
    );
    assert_eq!(report.checks[4].equation_row, Some(3));
    Ok(())
}

#[test]
fn swapping_completion_flags_breaks_a_passing_case() -> Result<(), HvError> {
    init_tracing();
    let mut tri = complete_then_filled();
    tri.cusps = vec![CuspRecord::filled(1, 1), CuspRecord::complete()];
    let verifier = LogarithmicGluingVerifier::default();
    let shapes = [regular_shape(double())];
    assert!(!verifier.verify_triangulation(&tri, &shapes)?);

    let report = verifier.verify_with_report(&tri, &shapes)?;
    let failure = report.first_failure().expect("cusp failure recorded");
    assert_eq!(
        failure.kind,
        CheckKind::Cusp {
            cusp: 0,
            equation: 0
        }
    );
    assert_eq!(failure.failure_message(), "equation 0 for cusp 0 failed");
    Ok(())
}

#[test]
fn equation_count_mismatch_is_a_structural_error() {
    let mut tri = single_complete();
    tri.cusps = vec![CuspRecord::filled(1, 0)];
    let verifier = LogarithmicGluingVerifier::default();
    let err = verifier
        .verify_triangulation(&tri, &[regular_shape(double())])
        .unwrap_err();
    assert!(matches!(err, HvError::Structure(_)));
    assert_eq!(err.info().code, "equation-count-mismatch");
    assert_eq!(err.info().context.get("expected").map(String::as_str), Some("2"));
    assert_eq!(err.info().context.get("found").map(String::as_str), Some("3"));
}

#[test]
fn row_width_and_shape_count_are_checked() {
    let verifier = LogarithmicGluingVerifier::default();
    let mut tri = single_complete();
    tri.equations = rows(&[&[2, 2, 2], &[1, -1], &[0, 1, -1]]);
    let err = verifier
        .verify_triangulation(&tri, &[regular_shape(double())])
        .unwrap_err();
    assert_eq!(err.info().code, "equation-width-mismatch");

    let tri = single_complete();
    let shapes = [regular_shape(double()), regular_shape(double())];
    let err = verifier.verify_triangulation(&tri, &shapes).unwrap_err();
    assert_eq!(err.info().code, "shape-count-mismatch");
}

#[test]
fn tolerance_uses_the_worst_case_of_the_enclosure() -> Result<(), HvError> {
    let tri = single_complete();
    // centred on e^{iπ/3}, but wide enough that the edge sum spreads past 0.1
    let wide = ComplexInterval::from_bounds((0.49, 0.51), (0.85, 0.88), double())?;
    let verifier = LogarithmicGluingVerifier::default();
    assert!(!verifier.verify_triangulation(&tri, &[wide.clone()])?);

    let loose = LogarithmicGluingVerifier::new(GluingPolicy::with_tolerance(1.0)?)?;
    assert!(loose.verify_triangulation(&tri, &[wide])?);
    Ok(())
}

#[test]
fn policy_rejects_tolerances_that_cannot_separate_turns() {
    assert!(GluingPolicy::with_tolerance(0.0).is_err());
    assert!(GluingPolicy::with_tolerance(3.5).is_err());
    assert!(GluingPolicy::with_tolerance(f64::NAN).is_err());
    let err = LogarithmicGluingVerifier::new(GluingPolicy { tolerance: -1.0 }).unwrap_err();
    assert_eq!(err.info().code, "tolerance-out-of-range");
    assert_eq!(GluingPolicy::default().tolerance, 0.1);
}

#[test]
fn verification_is_idempotent() -> Result<(), HvError> {
    let tri = complete_then_filled();
    let verifier = LogarithmicGluingVerifier::default();
    let shapes = [regular_shape(double())];
    let first = verifier.verify_with_report(&tri, &shapes)?;
    let second = verifier.verify_with_report(&tri, &shapes)?;
    assert_eq!(first, second);
    assert_eq!(first.to_bytes()?, second.to_bytes()?);
    Ok(())
}
