use hypcert_core::errors::{ErrorInfo, HvError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("expected", 4)
        .with_context("found", 3)
}

#[test]
fn structure_error_surface() {
    let err = HvError::Structure(sample_info("equation-count-mismatch", "wrong count"));
    assert_eq!(err.info().code, "equation-count-mismatch");
    assert_eq!(err.info().context.get("expected").map(String::as_str), Some("4"));
    assert!(!err.is_solver_failure());
}

#[test]
fn solver_error_is_recoverable_signal() {
    let err = HvError::Solver(sample_info("not-certified", "no contraction"));
    assert!(err.is_solver_failure());
}

#[test]
fn display_lists_context_and_hint() {
    let err = HvError::Precision(
        ErrorInfo::new("precision-out-of-range", "bad bits")
            .with_context("bits", 80)
            .with_hint("use at most 53 bits"),
    );
    let rendered = err.to_string();
    assert!(rendered.starts_with("precision error: bad bits (code: precision-out-of-range)"));
    assert!(rendered.contains("bits=80"));
    assert!(rendered.contains("hint: use at most 53 bits"));
}

#[test]
fn errors_round_trip_json() {
    let err = HvError::Policy(sample_info("tolerance-out-of-range", "tolerance too large"));
    let json = serde_json::to_string(&err).expect("serialize");
    assert!(json.contains("\"family\":\"Policy\""));
    let decoded: HvError = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, err);
}
