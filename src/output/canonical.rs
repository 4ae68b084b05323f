//! Canonical report form for caching and hashing.
//!
//! `determinize` sorts object keys, rounds floats and recurses through arrays, so
//! re-serializing an unchanged evaluation yields byte-identical JSON.

use serde_json::{Map, Number, Value};
use sha2::{Digest, Sha256};

use crate::checker::round_to;
use crate::engine::ComplianceReport;
use crate::error::Result;

/// Default number of decimal places kept by [`determinize`].
pub const DEFAULT_PRECISION: u32 = 6;

/// Beyond this, rounding no longer changes an `f64`.
const MAX_PRECISION: u32 = 15;

/// Sort every object's keys and round every float to `precision` decimals.
///
/// Integers, strings, booleans and nulls pass through unchanged.
#[must_use]
pub fn determinize(value: &Value, precision: u32) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::new();
            for key in keys {
                sorted.insert(key.clone(), determinize(&map[key], precision));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| determinize(item, precision))
                .collect(),
        ),
        Value::Number(number) if number.is_f64() => round_number(number, precision),
        other => other.clone(),
    }
}

fn round_number(number: &Number, precision: u32) -> Value {
    let places = i32::try_from(precision.min(MAX_PRECISION)).unwrap_or(0);
    number
        .as_f64()
        .map(|v| round_to(v, places))
        .and_then(Number::from_f64)
        .map_or(Value::Null, Value::Number)
}

/// SHA-256 hex digest of the report's determinized canonical form.
///
/// Identity fields (`report_id`, `timestamp`, `finding_id`) are excluded, so two
/// evaluations of the same state share a digest.
///
/// # Errors
/// Returns an error if the report cannot be serialized.
pub fn report_digest(report: &ComplianceReport, precision: u32) -> Result<String> {
    let canonical = determinize(&report.canonical_value()?, precision);
    let bytes = serde_json::to_vec(&canonical)?;
    Ok(format!("{:x}", Sha256::digest(&bytes)))
}

#[cfg(test)]
#[path = "canonical_tests.rs"]
mod tests;
