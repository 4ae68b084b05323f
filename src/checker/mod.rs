mod formula;
mod freeboard;
mod inputs;
mod result;
mod stability;
mod structural;
mod threshold;

pub use formula::{BEAM_PATH, evaluate_formula};
pub use freeboard::{FreeboardRuleChecker, minimum_freeboard};
pub use inputs::{RuleInputs, as_number, evaluate_with_inputs};
pub use result::{
    Finding, FindingStatus, INCOMPLETE_GUIDANCE, Measurement, Severity, VALUE_PRECISION, round_to,
};
pub use stability::{StabilityRuleChecker, remediation_for};
pub use structural::StructuralRuleChecker;
pub use threshold::{EXACT_TOLERANCE, LimitCheck, check_limit, comparison_message, measure};

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::rules::{RuleCategory, RuleRequirement};
use crate::state::DesignState;

pub trait Checker: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Evaluate one rule against the design state.
    ///
    /// Always produces exactly one finding: missing inputs, bad formulas and type
    /// errors are reported as `incomplete` or `error` findings rather than returned.
    fn check(&self, rule: &RuleRequirement, state: &dyn DesignState) -> Finding;
}

/// Category to checker mapping.
///
/// Categories without an entry have no automated checker.
#[derive(Clone, Default)]
pub struct CheckerRegistry {
    checkers: IndexMap<RuleCategory, Arc<dyn Checker>>,
}

impl CheckerRegistry {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Stability, structural and freeboard checkers.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(RuleCategory::Stability, Arc::new(StabilityRuleChecker));
        registry.register(RuleCategory::Structural, Arc::new(StructuralRuleChecker));
        registry.register(RuleCategory::Freeboard, Arc::new(FreeboardRuleChecker));
        registry
    }

    /// Add or replace the checker for `category`.
    pub fn register(&mut self, category: RuleCategory, checker: Arc<dyn Checker>) {
        self.checkers.insert(category, checker);
    }

    #[must_use]
    pub fn get(&self, category: RuleCategory) -> Option<&Arc<dyn Checker>> {
        self.checkers.get(&category)
    }

    #[must_use]
    pub fn contains(&self, category: RuleCategory) -> bool {
        self.checkers.contains_key(&category)
    }

    /// Categories with a registered checker, in registration order.
    #[must_use]
    pub fn categories(&self) -> Vec<RuleCategory> {
        self.checkers.keys().copied().collect()
    }
}

impl fmt::Debug for CheckerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.checkers
                    .iter()
                    .map(|(category, checker)| (category.as_str(), checker.name())),
            )
            .finish()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
