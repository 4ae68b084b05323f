use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ComplianceError;

/// Regulatory discipline a rule belongs to. Checkers are dispatched by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    Structural,
    Stability,
    Freeboard,
    FireSafety,
    Lifesaving,
    Machinery,
    Electrical,
    Navigation,
    Pollution,
    Tonnage,
}

impl RuleCategory {
    pub const ALL: [Self; 10] = [
        Self::Structural,
        Self::Stability,
        Self::Freeboard,
        Self::FireSafety,
        Self::Lifesaving,
        Self::Machinery,
        Self::Electrical,
        Self::Navigation,
        Self::Pollution,
        Self::Tonnage,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Structural => "structural",
            Self::Stability => "stability",
            Self::Freeboard => "freeboard",
            Self::FireSafety => "fire_safety",
            Self::Lifesaving => "lifesaving",
            Self::Machinery => "machinery",
            Self::Electrical => "electrical",
            Self::Navigation => "navigation",
            Self::Pollution => "pollution",
            Self::Tonnage => "tonnage",
        }
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleCategory {
    type Err = ComplianceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == wanted)
            .ok_or_else(|| ComplianceError::UnknownCategory(s.to_string()))
    }
}

/// Regulatory body or code that publishes a rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Framework {
    AbsHsnc,
    AbsHsc,
    DnvHslc,
    LrSsc,
    BvHsc,
    #[serde(rename = "hsc_2000")]
    Hsc2000,
    ImoIsCode,
    Solas,
    Marpol,
    UscgSubchapterT,
    UscgSubchapterK,
    NavalShipCode,
}

impl Framework {
    pub const ALL: [Self; 12] = [
        Self::AbsHsnc,
        Self::AbsHsc,
        Self::DnvHslc,
        Self::LrSsc,
        Self::BvHsc,
        Self::Hsc2000,
        Self::ImoIsCode,
        Self::Solas,
        Self::Marpol,
        Self::UscgSubchapterT,
        Self::UscgSubchapterK,
        Self::NavalShipCode,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AbsHsnc => "abs_hsnc",
            Self::AbsHsc => "abs_hsc",
            Self::DnvHslc => "dnv_hslc",
            Self::LrSsc => "lr_ssc",
            Self::BvHsc => "bv_hsc",
            Self::Hsc2000 => "hsc_2000",
            Self::ImoIsCode => "imo_is_code",
            Self::Solas => "solas",
            Self::Marpol => "marpol",
            Self::UscgSubchapterT => "uscg_subchapter_t",
            Self::UscgSubchapterK => "uscg_subchapter_k",
            Self::NavalShipCode => "naval_ship_code",
        }
    }

    /// Name used in citations and text reports.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::AbsHsnc => "ABS HSNC",
            Self::AbsHsc => "ABS HSC",
            Self::DnvHslc => "DNV HSLC",
            Self::LrSsc => "LR SSC",
            Self::BvHsc => "BV HSC",
            Self::Hsc2000 => "HSC Code 2000",
            Self::ImoIsCode => "IMO IS Code 2008",
            Self::Solas => "SOLAS",
            Self::Marpol => "MARPOL",
            Self::UscgSubchapterT => "USCG Subchapter T",
            Self::UscgSubchapterK => "USCG Subchapter K",
            Self::NavalShipCode => "NATO Naval Ship Code",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = ComplianceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|framework| framework.as_str() == wanted)
            .ok_or_else(|| ComplianceError::UnknownFramework(s.to_string()))
    }
}

/// How the actual value is compared to the required value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitType {
    #[default]
    Minimum,
    Maximum,
    Exact,
}

impl LimitType {
    /// Parse a limit type; unrecognized text falls back to `Minimum`.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "maximum" | "max" => Self::Maximum,
            "exact" | "equal" => Self::Exact,
            _ => Self::Minimum,
        }
    }
}

/// Citation metadata for a rule. Display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleReference {
    pub framework: Framework,
    pub section: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraph: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub figure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edition_year: Option<u16>,
}

impl RuleReference {
    #[must_use]
    pub fn new(framework: Framework, section: impl Into<String>) -> Self {
        Self {
            framework,
            section: section.into(),
            paragraph: None,
            table: None,
            figure: None,
            edition_year: None,
        }
    }

    #[must_use]
    pub fn paragraph(mut self, paragraph: impl Into<String>) -> Self {
        self.paragraph = Some(paragraph.into());
        self
    }

    #[must_use]
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    #[must_use]
    pub fn figure(mut self, figure: impl Into<String>) -> Self {
        self.figure = Some(figure.into());
        self
    }

    #[must_use]
    pub const fn edition(mut self, year: u16) -> Self {
        self.edition_year = Some(year);
        self
    }

    /// Human-readable citation, e.g. `ABS HSNC (2023) Pt 3 Ch 2 Sec 1, Para 1`.
    #[must_use]
    pub fn citation(&self) -> String {
        let mut out = self.framework.display_name().to_string();
        if let Some(year) = self.edition_year {
            out.push_str(&format!(" ({year})"));
        }
        out.push(' ');
        out.push_str(&self.section);
        if let Some(paragraph) = &self.paragraph {
            out.push_str(&format!(", Para {paragraph}"));
        }
        if let Some(table) = &self.table {
            out.push_str(&format!(", Table {table}"));
        }
        if let Some(figure) = &self.figure {
            out.push_str(&format!(", Figure {figure}"));
        }
        out
    }
}

impl fmt::Display for RuleReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.citation())
    }
}

/// A regulatory requirement together with its applicability and evaluation recipe.
///
/// Rules are built once when the library is populated and are only read afterwards.
/// A rule without `formula` carries a `limit_value` unless it is a manual-review rule;
/// checkers report such rules as `review_required`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleRequirement {
    pub rule_id: String,
    pub name: String,
    pub description: String,

    pub category: RuleCategory,
    pub framework: Framework,

    /// Applicable vessel types; empty means every type.
    pub vessel_types: BTreeSet<String>,
    pub min_length_m: Option<f64>,
    pub max_length_m: Option<f64>,
    pub service_restrictions: Vec<String>,

    /// State paths (`namespace.key`) the checker needs, primary value first.
    pub required_inputs: Vec<String>,
    pub acceptance_criteria: String,
    pub formula: Option<String>,
    pub limit_value: Option<f64>,
    pub limit_type: LimitType,

    pub mandatory: bool,
    pub references: Vec<RuleReference>,
    pub notes: String,
}

impl RuleRequirement {
    /// Start a mandatory rule with no inputs, limit or applicability constraints.
    #[must_use]
    pub fn new(
        rule_id: impl Into<String>,
        name: impl Into<String>,
        category: RuleCategory,
        framework: Framework,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            name: name.into(),
            description: String::new(),
            category,
            framework,
            vessel_types: BTreeSet::new(),
            min_length_m: None,
            max_length_m: None,
            service_restrictions: Vec::new(),
            required_inputs: Vec::new(),
            acceptance_criteria: String::new(),
            formula: None,
            limit_value: None,
            limit_type: LimitType::Minimum,
            mandatory: true,
            references: Vec::new(),
            notes: String::new(),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn vessel_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vessel_types = types.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn min_length(mut self, length_m: f64) -> Self {
        self.min_length_m = Some(length_m);
        self
    }

    #[must_use]
    pub const fn max_length(mut self, length_m: f64) -> Self {
        self.max_length_m = Some(length_m);
        self
    }

    #[must_use]
    pub fn service_restrictions<I, S>(mut self, restrictions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.service_restrictions = restrictions.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn inputs<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_inputs = paths.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn criteria(mut self, text: impl Into<String>) -> Self {
        self.acceptance_criteria = text.into();
        self
    }

    #[must_use]
    pub fn formula(mut self, formula: impl Into<String>, limit_type: LimitType) -> Self {
        self.formula = Some(formula.into());
        self.limit_type = limit_type;
        self
    }

    #[must_use]
    pub const fn limit(mut self, value: f64, limit_type: LimitType) -> Self {
        self.limit_value = Some(value);
        self.limit_type = limit_type;
        self
    }

    /// Mark the rule as recommended practice: failures are warnings, not non-conformances.
    #[must_use]
    pub const fn advisory(mut self) -> Self {
        self.mandatory = false;
        self
    }

    #[must_use]
    pub fn reference(mut self, reference: RuleReference) -> Self {
        self.references.push(reference);
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Applicability predicate: vessel type membership and inclusive length bounds.
    #[must_use]
    pub fn applies_to(&self, vessel_type: &str, length_m: f64) -> bool {
        if !self.vessel_types.is_empty() && !self.vessel_types.contains(vessel_type) {
            return false;
        }
        if self.min_length_m.is_some_and(|min| length_m < min) {
            return false;
        }
        if self.max_length_m.is_some_and(|max| length_m > max) {
            return false;
        }
        true
    }

    /// True when the rule has neither a formula nor a numeric limit.
    #[must_use]
    pub const fn is_manual_review(&self) -> bool {
        self.formula.is_none() && self.limit_value.is_none()
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
