use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::checker::{Finding, FindingStatus, Severity};
use crate::rules::{Framework, RuleCategory};

/// Vessel metadata echoed into the report and used for rule applicability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VesselProfile {
    pub name: String,
    pub vessel_type: String,
    pub length_m: f64,
}

impl VesselProfile {
    #[must_use]
    pub fn new(name: impl Into<String>, vessel_type: impl Into<String>, length_m: f64) -> Self {
        Self {
            name: name.into(),
            vessel_type: vessel_type.into(),
            length_m,
        }
    }
}

/// Aggregate verdict of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    Compliant,
    ConditionallyCompliant,
    ReviewRequired,
    NonCompliant,
}

impl OverallStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compliant => "compliant",
            Self::ConditionallyCompliant => "conditionally_compliant",
            Self::ReviewRequired => "review_required",
            Self::NonCompliant => "non_compliant",
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pass/fail view of one framework within a report.
///
/// `status` is `Compliant` whenever nothing failed; incomplete and review findings
/// are ignored here, unlike the report's overall status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameworkSummary {
    pub framework: Framework,
    pub total: usize,
    pub pass_count: usize,
    pub fail_count: usize,
    pub pass_rate: f64,
    pub status: OverallStatus,
}

/// Outcome of one `evaluate()` call.
///
/// Findings are stored once; the category, framework, critical and non-conformance
/// views index into `findings` and keep evaluation order.
#[derive(Debug, Clone)]
pub struct ComplianceReport {
    report_id: Uuid,
    vessel: VesselProfile,
    frameworks_checked: Vec<Framework>,
    timestamp: DateTime<Utc>,

    total_rules: usize,
    pass_count: usize,
    fail_count: usize,
    incomplete_count: usize,
    review_count: usize,

    findings: Vec<Finding>,
    findings_by_category: IndexMap<String, Vec<usize>>,
    findings_by_framework: IndexMap<String, Vec<usize>>,
    critical_findings: Vec<usize>,
    non_conformances: Vec<usize>,

    overall_status: OverallStatus,
}

impl ComplianceReport {
    pub(crate) fn new(vessel: VesselProfile, frameworks_checked: Vec<Framework>) -> Self {
        Self {
            report_id: Uuid::new_v4(),
            vessel,
            frameworks_checked,
            timestamp: Utc::now(),
            total_rules: 0,
            pass_count: 0,
            fail_count: 0,
            incomplete_count: 0,
            review_count: 0,
            findings: Vec::new(),
            findings_by_category: IndexMap::new(),
            findings_by_framework: IndexMap::new(),
            critical_findings: Vec::new(),
            non_conformances: Vec::new(),
            overall_status: OverallStatus::Compliant,
        }
    }

    pub(crate) const fn set_total_rules(&mut self, total: usize) {
        self.total_rules = total;
    }

    /// Append a finding and update counters and views. Error findings count as incomplete.
    pub(crate) fn record(&mut self, finding: Finding, category: RuleCategory, framework: Framework) {
        match finding.status {
            FindingStatus::Pass => self.pass_count += 1,
            FindingStatus::Fail => self.fail_count += 1,
            FindingStatus::Incomplete | FindingStatus::Error => self.incomplete_count += 1,
            FindingStatus::ReviewRequired => self.review_count += 1,
        }

        let index = self.findings.len();
        self.findings_by_category
            .entry(category.as_str().to_string())
            .or_default()
            .push(index);
        self.findings_by_framework
            .entry(framework.as_str().to_string())
            .or_default()
            .push(index);

        if finding.is_fail() {
            match finding.severity {
                Severity::Critical => self.critical_findings.push(index),
                Severity::NonConformance => self.non_conformances.push(index),
                _ => {}
            }
        }
        self.findings.push(finding);
    }

    /// Derive the overall status once every rule has been recorded.
    pub(crate) fn finalize(&mut self) {
        self.overall_status = self.compute_overall_status();
    }

    fn compute_overall_status(&self) -> OverallStatus {
        if !self.critical_findings.is_empty()
            || !self.non_conformances.is_empty()
            || self.fail_count > 0
        {
            OverallStatus::NonCompliant
        } else if self.incomplete_count > 0 || self.review_count > 0 {
            OverallStatus::ReviewRequired
        } else if self.pass_count == self.total_rules {
            OverallStatus::Compliant
        } else {
            OverallStatus::ConditionallyCompliant
        }
    }

    #[must_use]
    pub const fn report_id(&self) -> Uuid {
        self.report_id
    }

    #[must_use]
    pub const fn vessel(&self) -> &VesselProfile {
        &self.vessel
    }

    #[must_use]
    pub fn frameworks_checked(&self) -> &[Framework] {
        &self.frameworks_checked
    }

    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    #[must_use]
    pub const fn total_rules(&self) -> usize {
        self.total_rules
    }

    #[must_use]
    pub const fn pass_count(&self) -> usize {
        self.pass_count
    }

    #[must_use]
    pub const fn fail_count(&self) -> usize {
        self.fail_count
    }

    #[must_use]
    pub const fn incomplete_count(&self) -> usize {
        self.incomplete_count
    }

    #[must_use]
    pub const fn review_count(&self) -> usize {
        self.review_count
    }

    #[must_use]
    pub const fn overall_status(&self) -> OverallStatus {
        self.overall_status
    }

    /// All findings in evaluation order.
    #[must_use]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Category labels in first-seen order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.findings_by_category.keys().map(String::as_str)
    }

    pub fn findings_for_category(&self, category: RuleCategory) -> impl Iterator<Item = &Finding> {
        self.view(self.findings_by_category.get(category.as_str()))
    }

    pub fn findings_for_framework(&self, framework: Framework) -> impl Iterator<Item = &Finding> {
        self.view(self.findings_by_framework.get(framework.as_str()))
    }

    pub fn critical_findings(&self) -> impl Iterator<Item = &Finding> {
        self.critical_findings.iter().map(|&i| &self.findings[i])
    }

    pub fn non_conformances(&self) -> impl Iterator<Item = &Finding> {
        self.non_conformances.iter().map(|&i| &self.findings[i])
    }

    /// First failure that blocks compliance, in evaluation order.
    #[must_use]
    pub fn first_blocking_finding(&self) -> Option<&Finding> {
        self.findings.iter().find(|finding| finding.is_blocking())
    }

    /// `pass / (pass + fail) * 100`, or 0 when nothing was decided.
    #[must_use]
    pub fn get_pass_rate(&self) -> f64 {
        pass_rate(self.pass_count, self.fail_count)
    }

    /// Summary of one framework's findings.
    #[must_use]
    pub fn framework_summary(&self, framework: Framework) -> FrameworkSummary {
        let findings: Vec<&Finding> = self.findings_for_framework(framework).collect();
        let pass_count = findings.iter().filter(|f| f.is_pass()).count();
        let fail_count = findings.iter().filter(|f| f.is_fail()).count();
        FrameworkSummary {
            framework,
            total: findings.len(),
            pass_count,
            fail_count,
            pass_rate: pass_rate(pass_count, fail_count),
            status: if fail_count == 0 {
                OverallStatus::Compliant
            } else {
                OverallStatus::NonCompliant
            },
        }
    }

    /// Summaries for every framework checked, in first-request order. A framework
    /// requested more than once gets a single summary.
    #[must_use]
    pub fn framework_summaries(&self) -> Vec<FrameworkSummary> {
        let mut seen = IndexSet::new();
        self.frameworks_checked
            .iter()
            .filter(|&&framework| seen.insert(framework))
            .map(|&framework| self.framework_summary(framework))
            .collect()
    }

    /// JSON form of the report. Enums become their string values and finding values
    /// are rounded to three decimals; views list rule ids.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(ReportDocument::from(self))
    }

    /// [`Self::to_value`] without the fields that differ between identical evaluations:
    /// `report_id`, `timestamp` and each finding's `finding_id`.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn canonical_value(&self) -> serde_json::Result<Value> {
        let mut value = self.to_value()?;
        if let Value::Object(map) = &mut value {
            map.remove("report_id");
            map.remove("timestamp");
            if let Some(Value::Array(findings)) = map.get_mut("findings") {
                for finding in findings {
                    if let Value::Object(finding) = finding {
                        finding.remove("finding_id");
                    }
                }
            }
        }
        Ok(value)
    }

    fn view<'a>(&'a self, indices: Option<&'a Vec<usize>>) -> impl Iterator<Item = &'a Finding> {
        indices
            .into_iter()
            .flatten()
            .map(move |&i| &self.findings[i])
    }

    fn rule_ids(&self, indices: &[usize]) -> Vec<&str> {
        indices
            .iter()
            .map(|&i| self.findings[i].rule_id.as_str())
            .collect()
    }
}

#[allow(clippy::cast_precision_loss)]
fn pass_rate(pass_count: usize, fail_count: usize) -> f64 {
    let decided = pass_count + fail_count;
    if decided == 0 {
        return 0.0;
    }
    pass_count as f64 / decided as f64 * 100.0
}

#[derive(Serialize)]
struct ReportDocument<'a> {
    report_id: String,
    timestamp: String,
    vessel: &'a VesselProfile,
    frameworks_checked: &'a [Framework],
    summary: ReportSummary,
    findings: &'a [Finding],
    findings_by_category: IndexMap<&'a str, Vec<&'a str>>,
    findings_by_framework: IndexMap<&'a str, Vec<&'a str>>,
    critical_findings: Vec<&'a str>,
    non_conformances: Vec<&'a str>,
}

#[derive(Serialize)]
struct ReportSummary {
    total_rules: usize,
    pass_count: usize,
    fail_count: usize,
    incomplete_count: usize,
    review_count: usize,
    pass_rate: f64,
    overall_status: OverallStatus,
}

impl<'a> From<&'a ComplianceReport> for ReportDocument<'a> {
    fn from(report: &'a ComplianceReport) -> Self {
        let group = |map: &'a IndexMap<String, Vec<usize>>| -> IndexMap<&'a str, Vec<&'a str>> {
            map.iter()
                .map(|(label, indices)| (label.as_str(), report.rule_ids(indices)))
                .collect()
        };
        Self {
            report_id: report.report_id.to_string(),
            timestamp: report.timestamp.to_rfc3339(),
            vessel: &report.vessel,
            frameworks_checked: &report.frameworks_checked,
            summary: ReportSummary {
                total_rules: report.total_rules,
                pass_count: report.pass_count,
                fail_count: report.fail_count,
                incomplete_count: report.incomplete_count,
                review_count: report.review_count,
                pass_rate: report.get_pass_rate(),
                overall_status: report.overall_status,
            },
            findings: &report.findings,
            findings_by_category: group(&report.findings_by_category),
            findings_by_framework: group(&report.findings_by_framework),
            critical_findings: report.rule_ids(&report.critical_findings),
            non_conformances: report.rule_ids(&report.non_conformances),
        }
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
