use super::*;

#[test]
fn minimum_passes_at_boundary() {
    assert!(satisfies(0.3, 0.3, LimitType::Minimum));
    assert!(satisfies(0.31, 0.3, LimitType::Minimum));
    assert!(!satisfies(0.29, 0.3, LimitType::Minimum));
}

#[test]
fn maximum_passes_at_boundary() {
    assert!(satisfies(10.0, 10.0, LimitType::Maximum));
    assert!(satisfies(9.0, 10.0, LimitType::Maximum));
    assert!(!satisfies(10.5, 10.0, LimitType::Maximum));
}

#[test]
fn exact_uses_tolerance() {
    assert!(satisfies(1.0005, 1.0, LimitType::Exact));
    assert!(!satisfies(1.002, 1.0, LimitType::Exact));
}

#[test]
fn measure_computes_margin_and_percent() {
    let m = measure(0.5, 0.24);
    assert!((m.margin - 0.26).abs() < 1e-9);
    assert!((m.margin_percent - 108.333_333).abs() < 1e-3);
}

#[test]
fn measure_percent_uses_absolute_requirement() {
    let m = measure(-1.0, -2.0);
    assert!((m.margin - 1.0).abs() < 1e-9);
    assert!((m.margin_percent - 50.0).abs() < 1e-9);
}

#[test]
fn measure_zero_requirement() {
    assert!(measure(0.0, 0.0).margin_percent.abs() < f64::EPSILON);
    assert!(measure(0.1, 0.0).margin_percent.is_infinite());
    assert!(measure(-0.1, 0.0).margin_percent.is_sign_positive());
}

#[test]
fn check_limit_reports_failure_with_negative_margin() {
    let check = check_limit(0.2, 0.3, LimitType::Minimum);
    assert!(!check.passed);
    assert!(check.measurement.margin < 0.0);
}

#[test]
fn comparison_message_formats_three_decimals() {
    let m = measure(0.5, 0.24);
    assert_eq!(
        comparison_message("GM", &m, true),
        "GM: 0.500 meets requirement of 0.240"
    );
    assert_eq!(
        comparison_message("GM", &measure(0.1, 0.24), false),
        "GM: 0.100 does not meet requirement of 0.240"
    );
}
