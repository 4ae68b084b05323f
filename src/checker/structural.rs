use crate::rules::RuleRequirement;
use crate::state::DesignState;

use super::Checker;
use super::inputs::evaluate_with_inputs;
use super::result::Finding;

/// Scantling and hull-girder rules.
///
/// Once the inputs are present the rule is always handed to a reviewer: structural
/// scantlings are not calculated automatically.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralRuleChecker;

impl Checker for StructuralRuleChecker {
    fn name(&self) -> &'static str {
        "structural"
    }

    fn check(&self, rule: &RuleRequirement, state: &dyn DesignState) -> Finding {
        evaluate_with_inputs(rule, state, |_| {
            let mut message = format!("{}: structural review required", rule.name);
            if !rule.acceptance_criteria.is_empty() {
                message.push_str(" (");
                message.push_str(&rule.acceptance_criteria);
                message.push(')');
            }
            Ok(Finding::review_required(rule, message))
        })
    }
}

#[cfg(test)]
#[path = "structural_tests.rs"]
mod tests;
