mod report;

pub use report::{ComplianceReport, FrameworkSummary, OverallStatus, VesselProfile};

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::checker::{Checker, CheckerRegistry, Finding};
use crate::rules::{Framework, RuleCategory, RuleLibrary, RuleRequirement, default_library};
use crate::state::DesignState;

/// Runs library rules through category checkers and aggregates the findings.
///
/// Evaluation is a sequential fold: frameworks in the order requested, rules in
/// library registration order within each framework. The engine never fails; every
/// rule yields a finding.
#[derive(Debug, Clone)]
pub struct ComplianceEngine {
    library: Arc<RuleLibrary>,
    defaults: CheckerRegistry,
    custom: CheckerRegistry,
}

impl Default for ComplianceEngine {
    fn default() -> Self {
        Self::new(default_library())
    }
}

impl ComplianceEngine {
    #[must_use]
    pub fn new(library: Arc<RuleLibrary>) -> Self {
        Self {
            library,
            defaults: CheckerRegistry::with_defaults(),
            custom: CheckerRegistry::empty(),
        }
    }

    #[must_use]
    pub fn library(&self) -> &RuleLibrary {
        &self.library
    }

    /// Add a checker consulted before the built-in ones for `category`.
    pub fn register_checker(&mut self, category: RuleCategory, checker: Arc<dyn Checker>) {
        self.custom.register(category, checker);
    }

    /// Custom checker for `category` if registered, otherwise the built-in one.
    #[must_use]
    pub fn get_checker(&self, category: RuleCategory) -> Option<&Arc<dyn Checker>> {
        self.custom
            .get(category)
            .or_else(|| self.defaults.get(category))
    }

    /// Evaluate every applicable rule of `frameworks` against `state`.
    ///
    /// Rule sets are concatenated per framework without de-duplication.
    #[must_use]
    pub fn evaluate(
        &self,
        state: &dyn DesignState,
        frameworks: &[Framework],
        vessel: &VesselProfile,
    ) -> ComplianceReport {
        let mut report = ComplianceReport::new(vessel.clone(), frameworks.to_vec());

        let rules: Vec<&RuleRequirement> = frameworks
            .iter()
            .flat_map(|&framework| {
                self.library
                    .get_applicable_rules(framework, &vessel.vessel_type, vessel.length_m)
            })
            .collect();
        report.set_total_rules(rules.len());

        for rule in rules {
            let finding = self.check_rule(rule, state);
            debug!(
                rule_id = %rule.rule_id,
                status = finding.status.as_str(),
                severity = finding.severity.as_str(),
                "rule evaluated"
            );
            report.record(finding, rule.category, rule.framework);
        }
        report.finalize();

        info!(
            vessel = %vessel.name,
            total = report.total_rules(),
            passed = report.pass_count(),
            failed = report.fail_count(),
            incomplete = report.incomplete_count(),
            review = report.review_count(),
            status = %report.overall_status(),
            "compliance evaluation complete"
        );
        report
    }

    /// [`Self::evaluate`] for one framework.
    #[must_use]
    pub fn evaluate_single_framework(
        &self,
        state: &dyn DesignState,
        framework: Framework,
        vessel: &VesselProfile,
    ) -> ComplianceReport {
        self.evaluate(state, &[framework], vessel)
    }

    /// Evaluate every library rule of one category, optionally limited to `frameworks`.
    ///
    /// No applicability filtering and no aggregation. Returns nothing when the
    /// category has no checker.
    #[must_use]
    pub fn evaluate_category(
        &self,
        state: &dyn DesignState,
        category: RuleCategory,
        frameworks: Option<&[Framework]>,
    ) -> Vec<Finding> {
        let Some(checker) = self.get_checker(category) else {
            warn!(category = category.as_str(), "no checker registered for category");
            return Vec::new();
        };

        self.library
            .get_by_category(category)
            .into_iter()
            .filter(|rule| frameworks.is_none_or(|wanted| wanted.contains(&rule.framework)))
            .map(|rule| checker.check(rule, state))
            .collect()
    }

    /// Pass/fail summary of one framework from an existing report.
    #[must_use]
    pub fn get_framework_summary(report: &ComplianceReport, framework: Framework) -> FrameworkSummary {
        report.framework_summary(framework)
    }

    fn check_rule(&self, rule: &RuleRequirement, state: &dyn DesignState) -> Finding {
        if let Some(checker) = self.get_checker(rule.category) {
            return checker.check(rule, state);
        }
        warn!(
            rule_id = %rule.rule_id,
            category = rule.category.as_str(),
            "no automated checker, deferring to review"
        );
        Finding::review_required(
            rule,
            format!(
                "{}: no automated checker for {} rules, manual review required",
                rule.name, rule.category
            ),
        )
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
