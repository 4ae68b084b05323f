//! Design-state access.
//!
//! Checkers read design values through [`DesignState`]. [`StateManager`] is the
//! in-memory hierarchical store used by the CLI and tests: values live under
//! `namespace.key` paths and each write records which analysis produced it.
//! JSON `null` is treated the same as an absent key.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::{ComplianceError, Result};

/// Source recorded for values loaded from a state file.
pub const FILE_SOURCE: &str = "file";

/// Read-only view of the design state.
///
/// Implementations return `None` for absent keys and never fail on missing paths.
pub trait DesignState {
    /// Read `key` within `namespace`.
    fn read(&self, namespace: &str, key: &str) -> Option<Value>;

    /// Resolve a dot path of any depth (`hull.beam`, `stability.curve.points`).
    fn get(&self, path: &str) -> Option<Value>;

    /// Read with a fallback value.
    fn read_or(&self, namespace: &str, key: &str, default: Value) -> Value {
        self.read(namespace, key).unwrap_or(default)
    }

    /// Read a `namespace.key` path. Paths without exactly two segments resolve to `None`.
    fn read_path(&self, path: &str) -> Option<Value> {
        let (namespace, key) = split_path(path)?;
        self.read(namespace, key)
    }
}

/// Split `namespace.key` into its two segments.
#[must_use]
pub fn split_path(path: &str) -> Option<(&str, &str)> {
    let mut segments = path.split('.');
    let namespace = segments.next()?;
    let key = segments.next()?;
    if segments.next().is_some() || namespace.is_empty() || key.is_empty() {
        return None;
    }
    Some((namespace, key))
}

#[derive(Debug, Clone, PartialEq)]
struct StateEntry {
    value: Value,
    source: String,
}

/// Hierarchical `namespace -> key -> value` store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateManager {
    namespaces: BTreeMap<String, BTreeMap<String, StateEntry>>,
}

impl StateManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` at a `namespace.key` path, recording `source` as its producer.
    ///
    /// # Errors
    /// Returns `InvalidState` if the path is not exactly two non-empty segments.
    pub fn write(&mut self, path: &str, value: impl Into<Value>, source: &str) -> Result<()> {
        let (namespace, key) = split_path(path)
            .ok_or_else(|| ComplianceError::InvalidState(format!("malformed path '{path}'")))?;
        self.namespaces
            .entry(namespace.to_string())
            .or_default()
            .insert(
                key.to_string(),
                StateEntry {
                    value: value.into(),
                    source: source.to_string(),
                },
            );
        Ok(())
    }

    /// Name of the analysis that last wrote `path`.
    #[must_use]
    pub fn source_of(&self, path: &str) -> Option<&str> {
        let (namespace, key) = split_path(path)?;
        self.namespaces
            .get(namespace)?
            .get(key)
            .map(|entry| entry.source.as_str())
    }

    /// Number of stored keys across all namespaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.namespaces.values().map(BTreeMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build a store from a JSON object of namespace objects.
    ///
    /// # Errors
    /// Returns an error if the text is not JSON or not shaped as namespaces of keys.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(text)?;
        Self::from_value(root)
    }

    /// Build a store from TOML tables, one table per namespace.
    ///
    /// # Errors
    /// Returns an error if the text is not TOML or not shaped as namespaces of keys.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(text)?;
        Self::from_value(serde_json::to_value(table)?)
    }

    /// Load a state file; the format is chosen by extension (`.json`, otherwise TOML).
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| ComplianceError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_toml_str(&text)
        }
    }

    fn from_value(root: Value) -> Result<Self> {
        let Value::Object(namespaces) = root else {
            return Err(ComplianceError::InvalidState(
                "state root must be a table of namespaces".to_string(),
            ));
        };

        let mut state = Self::new();
        for (namespace, keys) in namespaces {
            let Value::Object(keys) = keys else {
                return Err(ComplianceError::InvalidState(format!(
                    "namespace '{namespace}' must be a table"
                )));
            };
            for (key, value) in keys {
                state.write(&format!("{namespace}.{key}"), value, FILE_SOURCE)?;
            }
        }
        Ok(state)
    }

    fn lookup(&self, namespace: &str, key: &str) -> Option<&Value> {
        self.namespaces
            .get(namespace)?
            .get(key)
            .map(|entry| &entry.value)
            .filter(|value| !value.is_null())
    }
}

impl DesignState for StateManager {
    fn read(&self, namespace: &str, key: &str) -> Option<Value> {
        self.lookup(namespace, key).cloned()
    }

    fn get(&self, path: &str) -> Option<Value> {
        let mut segments = path.split('.');
        let namespace = segments.next()?;
        let key = segments.next()?;
        let mut current = self.lookup(namespace, key)?;
        for segment in segments {
            current = current.get(segment)?;
        }
        (!current.is_null()).then(|| current.clone())
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
