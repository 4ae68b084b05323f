use super::*;
use crate::engine::{ComplianceEngine, VesselProfile};
use crate::rules::Framework;
use crate::state::StateManager;

fn sample_report() -> ComplianceReport {
    let mut state = StateManager::new();
    state.write("stability.gm_m", 0.123_456_789, "test").unwrap();
    state.write("stability.gz_max_m", 0.3, "test").unwrap();
    ComplianceEngine::default().evaluate_single_framework(
        &state,
        Framework::Hsc2000,
        &VesselProfile::new("MV Test", "ferry", 25.0),
    )
}

#[test]
fn output_is_valid_json_with_digest() {
    let report = sample_report();

    let output = JsonFormatter::default().format(&report).unwrap();
    let parsed: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(parsed["vessel"]["name"], "MV Test");
    assert_eq!(parsed["summary"]["total_rules"], 6);
    assert_eq!(parsed["summary"]["overall_status"], "non_compliant");
    assert_eq!(
        parsed["digest"],
        report_digest(&report, DEFAULT_PRECISION).unwrap()
    );
}

#[test]
fn keys_are_sorted() {
    let output = JsonFormatter::default().format(&sample_report()).unwrap();

    let digest = output.find("\"digest\"").unwrap();
    let findings = output.find("\"findings\"").unwrap();
    let vessel = output.find("\"vessel\"").unwrap();
    assert!(digest < findings);
    assert!(findings < vessel);
}

#[test]
fn precision_applies_to_margin_percent() {
    let output = JsonFormatter::new(1).format(&sample_report()).unwrap();
    let parsed: Value = serde_json::from_str(&output).unwrap();

    let gm = parsed["findings"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["rule_id"] == "HSC-2000-A7-1.6")
        .unwrap();
    assert_eq!(gm["status"], "fail");
    assert_eq!(gm["margin_percent"], serde_json::json!(-17.7));
}
