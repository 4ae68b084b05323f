use super::*;
use crate::checker::measure;
use crate::error::EvaluationError;
use crate::rules::RuleRequirement;

fn rule(id: &str, category: RuleCategory, framework: Framework) -> RuleRequirement {
    RuleRequirement::new(id, format!("Rule {id}"), category, framework).inputs(["stability.gm_m"])
}

fn report() -> ComplianceReport {
    ComplianceReport::new(
        VesselProfile::new("Test Craft", "patrol", 20.0),
        vec![Framework::AbsHsnc, Framework::Hsc2000],
    )
}

fn pass(id: &str) -> Finding {
    let rule = rule(id, RuleCategory::Stability, Framework::AbsHsnc);
    Finding::pass(&rule, measure(1.0, 0.5), format!("{id} ok"))
}

fn fail(id: &str, severity: Severity) -> Finding {
    let rule = rule(id, RuleCategory::Stability, Framework::AbsHsnc);
    Finding::fail_with_severity(&rule, severity, measure(0.4, 0.5), format!("{id} low"), "fix")
}

fn record_all(report: &mut ComplianceReport, findings: Vec<(Finding, RuleCategory, Framework)>) {
    report.set_total_rules(findings.len());
    for (finding, category, framework) in findings {
        report.record(finding, category, framework);
    }
    report.finalize();
}

#[test]
fn empty_report_is_compliant() {
    let mut report = report();
    record_all(&mut report, Vec::new());

    assert_eq!(report.overall_status(), OverallStatus::Compliant);
    assert!(report.get_pass_rate().abs() < f64::EPSILON);
    assert!(report.first_blocking_finding().is_none());
}

#[test]
fn counts_follow_status() {
    let rule = rule("R-3", RuleCategory::Stability, Framework::AbsHsnc);
    let mut report = report();
    record_all(
        &mut report,
        vec![
            (pass("R-1"), RuleCategory::Stability, Framework::AbsHsnc),
            (fail("R-2", Severity::Warning), RuleCategory::Stability, Framework::AbsHsnc),
            (
                Finding::incomplete(&rule, &["stability.gm_m".to_string()]),
                RuleCategory::Stability,
                Framework::AbsHsnc,
            ),
            (
                Finding::error(&rule, &EvaluationError::NoInputs { rule_id: "R-3".into() }),
                RuleCategory::Stability,
                Framework::AbsHsnc,
            ),
            (
                Finding::review_required(&rule, "review".to_string()),
                RuleCategory::Structural,
                Framework::Hsc2000,
            ),
        ],
    );

    assert_eq!(report.pass_count(), 1);
    assert_eq!(report.fail_count(), 1);
    assert_eq!(report.incomplete_count(), 2);
    assert_eq!(report.review_count(), 1);
    assert_eq!(report.findings().len(), report.total_rules());
    assert!((report.get_pass_rate() - 50.0).abs() < 1e-9);
}

#[test]
fn critical_failure_dominates() {
    let mut report = report();
    record_all(
        &mut report,
        vec![
            (pass("R-1"), RuleCategory::Stability, Framework::AbsHsnc),
            (fail("R-2", Severity::Critical), RuleCategory::Stability, Framework::AbsHsnc),
            (fail("R-3", Severity::NonConformance), RuleCategory::Stability, Framework::AbsHsnc),
        ],
    );

    assert_eq!(report.overall_status(), OverallStatus::NonCompliant);
    let critical: Vec<_> = report.critical_findings().map(|f| f.rule_id.as_str()).collect();
    let nc: Vec<_> = report.non_conformances().map(|f| f.rule_id.as_str()).collect();
    assert_eq!(critical, vec!["R-2"]);
    assert_eq!(nc, vec!["R-3"]);
    assert_eq!(report.first_blocking_finding().unwrap().rule_id, "R-2");
}

#[test]
fn review_outranks_pass() {
    let rule = rule("R-2", RuleCategory::Structural, Framework::AbsHsnc);
    let mut report = report();
    record_all(
        &mut report,
        vec![
            (pass("R-1"), RuleCategory::Stability, Framework::AbsHsnc),
            (
                Finding::review_required(&rule, "review".to_string()),
                RuleCategory::Structural,
                Framework::AbsHsnc,
            ),
        ],
    );

    assert_eq!(report.overall_status(), OverallStatus::ReviewRequired);
}

#[test]
fn fewer_findings_than_rules_is_conditional() {
    let mut report = report();
    report.set_total_rules(3);
    report.record(pass("R-1"), RuleCategory::Stability, Framework::AbsHsnc);
    report.record(pass("R-2"), RuleCategory::Stability, Framework::AbsHsnc);
    report.finalize();

    assert_eq!(report.overall_status(), OverallStatus::ConditionallyCompliant);
}

#[test]
fn groupings_keep_first_seen_order() {
    let mut report = report();
    record_all(
        &mut report,
        vec![
            (pass("R-1"), RuleCategory::Stability, Framework::Hsc2000),
            (pass("R-2"), RuleCategory::Freeboard, Framework::AbsHsnc),
            (pass("R-3"), RuleCategory::Stability, Framework::AbsHsnc),
        ],
    );

    assert_eq!(report.categories().collect::<Vec<_>>(), vec!["stability", "freeboard"]);
    let stability: Vec<_> = report
        .findings_for_category(RuleCategory::Stability)
        .map(|f| f.rule_id.as_str())
        .collect();
    assert_eq!(stability, vec!["R-1", "R-3"]);
    assert_eq!(report.findings_for_category(RuleCategory::Tonnage).count(), 0);
    assert_eq!(report.findings_for_framework(Framework::AbsHsnc).count(), 2);
}

#[test]
fn framework_summary_counts_only_its_findings() {
    let mut report = report();
    record_all(
        &mut report,
        vec![
            (pass("R-1"), RuleCategory::Stability, Framework::AbsHsnc),
            (fail("R-2", Severity::Warning), RuleCategory::Stability, Framework::AbsHsnc),
            (pass("R-3"), RuleCategory::Stability, Framework::Hsc2000),
        ],
    );

    let abs = report.framework_summary(Framework::AbsHsnc);
    assert_eq!((abs.total, abs.pass_count, abs.fail_count), (2, 1, 1));
    assert_eq!(abs.status, OverallStatus::NonCompliant);
    assert!((abs.pass_rate - 50.0).abs() < 1e-9);

    let hsc = report.framework_summary(Framework::Hsc2000);
    assert_eq!(hsc.status, OverallStatus::Compliant);

    let summaries = report.framework_summaries();
    assert_eq!(summaries[0].framework, Framework::AbsHsnc);
    assert_eq!(summaries[1].framework, Framework::Hsc2000);
}

#[test]
fn value_lists_rule_ids_in_views() {
    let mut report = report();
    record_all(
        &mut report,
        vec![
            (pass("R-1"), RuleCategory::Stability, Framework::AbsHsnc),
            (fail("R-2", Severity::NonConformance), RuleCategory::Freeboard, Framework::AbsHsnc),
        ],
    );

    let value = report.to_value().unwrap();

    assert_eq!(value["vessel"]["name"], "Test Craft");
    assert_eq!(value["frameworks_checked"], serde_json::json!(["abs_hsnc", "hsc_2000"]));
    assert_eq!(value["summary"]["overall_status"], "non_compliant");
    assert_eq!(value["summary"]["total_rules"], 2);
    assert_eq!(value["findings"].as_array().unwrap().len(), 2);
    assert_eq!(value["findings_by_category"]["freeboard"], serde_json::json!(["R-2"]));
    assert_eq!(value["findings_by_framework"]["abs_hsnc"], serde_json::json!(["R-1", "R-2"]));
    assert_eq!(value["non_conformances"], serde_json::json!(["R-2"]));
    assert_eq!(value["report_id"], report.report_id().to_string());
}

#[test]
fn canonical_value_drops_volatile_fields() {
    let mut report = report();
    record_all(
        &mut report,
        vec![(pass("R-1"), RuleCategory::Stability, Framework::AbsHsnc)],
    );

    let value = report.canonical_value().unwrap();

    assert!(value.get("report_id").is_none());
    assert!(value.get("timestamp").is_none());
    assert!(value["findings"][0].get("finding_id").is_none());
    assert_eq!(value["findings"][0]["rule_id"], "R-1");
}

#[test]
fn framework_summaries_collapse_repeated_frameworks() {
    let mut report = ComplianceReport::new(
        VesselProfile::new("Test Craft", "patrol", 20.0),
        vec![Framework::AbsHsnc, Framework::Hsc2000, Framework::AbsHsnc],
    );
    record_all(
        &mut report,
        vec![
            (pass("R-1"), RuleCategory::Stability, Framework::AbsHsnc),
            (pass("R-2"), RuleCategory::Stability, Framework::Hsc2000),
            (pass("R-1"), RuleCategory::Stability, Framework::AbsHsnc),
        ],
    );

    let summaries = report.framework_summaries();

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].framework, Framework::AbsHsnc);
    assert_eq!(summaries[0].total, 2);
    assert_eq!(summaries[1].framework, Framework::Hsc2000);
    assert_eq!(report.frameworks_checked().len(), 3);
}
