use std::fmt::Write;

use serde::Serialize;

use crate::error::Result;
use crate::rules::{LimitType, RuleRequirement};

/// Renders a rule listing (the `rules` command).
pub trait RulesFormatter {
    /// Format the rules in the order given.
    ///
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format_rules(&self, rules: &[&RuleRequirement]) -> Result<String>;
}

pub struct RulesTextFormatter;

impl RulesTextFormatter {
    fn requirement(rule: &RuleRequirement) -> Option<String> {
        let op = match rule.limit_type {
            LimitType::Minimum => ">=",
            LimitType::Maximum => "<=",
            LimitType::Exact => "==",
        };
        rule.formula
            .as_deref()
            .map(|formula| format!("{op} {formula}"))
            .or_else(|| rule.limit_value.map(|limit| format!("{op} {limit}")))
    }
}

impl RulesFormatter for RulesTextFormatter {
    fn format_rules(&self, rules: &[&RuleRequirement]) -> Result<String> {
        let mut output = String::new();
        for rule in rules {
            let advisory = if rule.mandatory { "" } else { " (advisory)" };
            let _ = writeln!(
                output,
                "{} [{}/{}] {}{advisory}",
                rule.rule_id, rule.framework, rule.category, rule.name
            );
            if !rule.acceptance_criteria.is_empty() {
                let _ = writeln!(output, "   Criteria: {}", rule.acceptance_criteria);
            }
            match Self::requirement(rule) {
                Some(requirement) => {
                    let _ = writeln!(output, "   Requirement: {requirement}");
                }
                None => output.push_str("   Requirement: manual review\n"),
            }
            let _ = writeln!(output, "   Inputs: {}", rule.required_inputs.join(", "));
            for reference in &rule.references {
                let _ = writeln!(output, "   Reference: {}", reference.citation());
            }
        }
        let _ = writeln!(output, "{} rules", rules.len());
        Ok(output)
    }
}

pub struct RulesJsonFormatter;

#[derive(Serialize)]
struct RulesOutput<'a> {
    total: usize,
    rules: &'a [&'a RuleRequirement],
}

impl RulesFormatter for RulesJsonFormatter {
    fn format_rules(&self, rules: &[&RuleRequirement]) -> Result<String> {
        let output = RulesOutput {
            total: rules.len(),
            rules,
        };
        Ok(serde_json::to_string_pretty(&output)?)
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
