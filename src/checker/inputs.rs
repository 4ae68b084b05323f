use indexmap::IndexMap;
use serde_json::Value;

use crate::error::EvaluationError;
use crate::rules::RuleRequirement;
use crate::state::DesignState;

use super::result::Finding;

/// Values of a rule's required inputs, in `required_inputs` order.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleInputs {
    values: IndexMap<String, Value>,
}

impl RuleInputs {
    /// Read every required input. Returns the missing paths if any are absent.
    ///
    /// # Errors
    /// Returns the list of paths that resolved to nothing, in `required_inputs` order.
    pub fn gather(rule: &RuleRequirement, state: &dyn DesignState) -> Result<Self, Vec<String>> {
        let mut values = IndexMap::new();
        let mut missing = Vec::new();
        for path in &rule.required_inputs {
            match state.read_path(path) {
                Some(value) => {
                    values.insert(path.clone(), value);
                }
                None => missing.push(path.clone()),
            }
        }
        if missing.is_empty() {
            Ok(Self { values })
        } else {
            Err(missing)
        }
    }

    #[must_use]
    pub fn value(&self, path: &str) -> Option<&Value> {
        self.values.get(path)
    }

    /// Numeric value at `path`.
    ///
    /// # Errors
    /// Fails if the path was not gathered or its value is not a number.
    pub fn number(&self, path: &str) -> Result<f64, EvaluationError> {
        let value = self.value(path).ok_or_else(|| EvaluationError::MissingValue {
            path: path.to_string(),
        })?;
        as_number(path, value)
    }

    /// Numeric value of the first required input.
    ///
    /// # Errors
    /// Fails if the rule has no inputs or the primary value is not a number.
    pub fn primary(&self, rule: &RuleRequirement) -> Result<f64, EvaluationError> {
        let path = rule
            .required_inputs
            .first()
            .ok_or_else(|| EvaluationError::NoInputs {
                rule_id: rule.rule_id.clone(),
            })?;
        self.number(path)
    }
}

/// Interpret a state value as a number. Numeric strings are accepted.
///
/// # Errors
/// Returns `NonNumeric` for any other value.
pub fn as_number(path: &str, value: &Value) -> Result<f64, EvaluationError> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.ok_or_else(|| EvaluationError::NonNumeric {
        path: path.to_string(),
        found: value.to_string(),
    })
}

/// Input check shared by every checker, followed by category-specific evaluation.
///
/// Missing inputs yield an `incomplete` finding; an evaluation error yields an `error`
/// finding. Neither is propagated.
pub fn evaluate_with_inputs<F>(rule: &RuleRequirement, state: &dyn DesignState, evaluate: F) -> Finding
where
    F: FnOnce(&RuleInputs) -> Result<Finding, EvaluationError>,
{
    match RuleInputs::gather(rule, state) {
        Err(missing) => Finding::incomplete(rule, &missing),
        Ok(inputs) => evaluate(&inputs).unwrap_or_else(|error| Finding::error(rule, &error)),
    }
}

#[cfg(test)]
#[path = "inputs_tests.rs"]
mod tests;
