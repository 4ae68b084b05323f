use std::sync::{Arc, LazyLock};

use indexmap::IndexMap;

use super::corpus;
use super::model::{Framework, RuleCategory, RuleRequirement};

static DEFAULT_LIBRARY: LazyLock<Arc<RuleLibrary>> =
    LazyLock::new(|| Arc::new(RuleLibrary::with_builtin_rules()));

/// Shared instance populated with the built-in corpus.
///
/// Convenience only; engines take their library explicitly.
#[must_use]
pub fn default_library() -> Arc<RuleLibrary> {
    Arc::clone(&DEFAULT_LIBRARY)
}

/// Registry of rule requirements indexed by id, framework and category.
///
/// Index order is registration order, which fixes the evaluation order within a framework.
#[derive(Debug, Clone, Default)]
pub struct RuleLibrary {
    rules: IndexMap<String, RuleRequirement>,
    by_framework: IndexMap<Framework, Vec<String>>,
    by_category: IndexMap<RuleCategory, Vec<String>>,
}

impl RuleLibrary {
    /// Library with no rules.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Library populated with the ABS HSNC, HSC Code 2000 and USCG Subchapter T rule sets.
    #[must_use]
    pub fn with_builtin_rules() -> Self {
        let mut library = Self::empty();
        for rule in corpus::builtin_rules() {
            library.register(rule);
        }
        library
    }

    /// Insert a rule into the primary map and both secondary indexes.
    ///
    /// Registering an id again replaces the stored rule. Its index position is kept
    /// unless the framework or category changed, in which case it moves to the end
    /// of the new index list.
    pub fn register(&mut self, rule: RuleRequirement) {
        let id = rule.rule_id.clone();
        let (framework, category) = (rule.framework, rule.category);

        if let Some(previous) = self.rules.insert(id.clone(), rule) {
            if previous.framework == framework && previous.category == category {
                return;
            }
            remove_id(&mut self.by_framework, previous.framework, &id);
            remove_id(&mut self.by_category, previous.category, &id);
        }

        self.by_framework.entry(framework).or_default().push(id.clone());
        self.by_category.entry(category).or_default().push(id);
    }

    #[must_use]
    pub fn get(&self, rule_id: &str) -> Option<&RuleRequirement> {
        self.rules.get(rule_id)
    }

    #[must_use]
    pub fn get_by_framework(&self, framework: Framework) -> Vec<&RuleRequirement> {
        self.resolve(self.by_framework.get(&framework))
    }

    #[must_use]
    pub fn get_by_category(&self, category: RuleCategory) -> Vec<&RuleRequirement> {
        self.resolve(self.by_category.get(&category))
    }

    /// Rules of `framework` whose vessel-type and length constraints admit the vessel.
    #[must_use]
    pub fn get_applicable_rules(
        &self,
        framework: Framework,
        vessel_type: &str,
        length_m: f64,
    ) -> Vec<&RuleRequirement> {
        self.get_by_framework(framework)
            .into_iter()
            .filter(|rule| rule.applies_to(vessel_type, length_m))
            .collect()
    }

    /// Frameworks that have at least one rule, in order of first registration.
    #[must_use]
    pub fn frameworks(&self) -> Vec<Framework> {
        self.by_framework
            .iter()
            .filter(|(_, ids)| !ids.is_empty())
            .map(|(framework, _)| *framework)
            .collect()
    }

    /// All rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RuleRequirement> {
        self.rules.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn resolve(&self, ids: Option<&Vec<String>>) -> Vec<&RuleRequirement> {
        ids.map(|ids| ids.iter().filter_map(|id| self.rules.get(id)).collect())
            .unwrap_or_default()
    }
}

fn remove_id<K: std::hash::Hash + Eq>(index: &mut IndexMap<K, Vec<String>>, key: K, id: &str) {
    if let Some(ids) = index.get_mut(&key) {
        ids.retain(|existing| existing != id);
    }
}

#[cfg(test)]
#[path = "library_tests.rs"]
mod tests;
