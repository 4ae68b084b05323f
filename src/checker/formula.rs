//! Required-value formulas.
//!
//! Only two shapes are understood: the ABS GM criterion `max(0.15, 0.04 * beam)`,
//! evaluated against `hull.beam`, and a bare numeric constant. Anything else is
//! unresolvable and the rule is reported as an evaluation error. Formula text is
//! never executed.

use std::sync::LazyLock;

use regex::Regex;

use crate::state::DesignState;

use super::inputs::as_number;

/// State path substituted for `beam`.
pub const BEAM_PATH: &str = "hull.beam";

const GM_FLOOR_M: f64 = 0.15;
const GM_BEAM_FACTOR: f64 = 0.04;

static GM_BEAM_FORMULA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*max\(\s*0\.15\s*,\s*0\.04\s*\*\s*beam\s*\)\s*$").expect("Invalid regex")
});

/// Evaluate a rule formula to a required value.
///
/// Returns `None` when the formula is not a recognized shape, or when it needs
/// `hull.beam` and the state has no finite numeric beam.
#[must_use]
pub fn evaluate_formula(formula: &str, state: &dyn DesignState) -> Option<f64> {
    if GM_BEAM_FORMULA.is_match(formula) {
        let beam = state.get(BEAM_PATH)?;
        let beam = as_number(BEAM_PATH, &beam).ok().filter(|b| b.is_finite())?;
        return Some(GM_FLOOR_M.max(GM_BEAM_FACTOR * beam));
    }
    formula
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
#[path = "formula_tests.rs"]
mod tests;
