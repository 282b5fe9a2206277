use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for vendors under evaluation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VendorId(pub String);

impl fmt::Display for VendorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for scorecard criteria, unique across the scorecard.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CriterionId(pub String);

impl fmt::Display for CriterionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for scorecard categories.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub String);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Inclusive numeric bounds a criterion is scored on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreScale {
    pub min: f64,
    pub max: f64,
}

impl Default for ScoreScale {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
        }
    }
}

impl ScoreScale {
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Linear rescale of a raw value into [0, 100].
    pub fn normalize(&self, raw: f64) -> f64 {
        let clamped = self.clamp(raw);
        ((clamped - self.min) / (self.max - self.min) * 100.0).clamp(0.0, 100.0)
    }
}

/// Structured value the extraction collaborator attaches to evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeValue {
    Numeric(f64),
    Flag(bool),
    Text(String),
}

/// Immutable extracted fact tied to one vendor and one criterion.
///
/// Absence of an `Evidence` entry means "no evidence found", which scoring
/// treats differently from evidence carrying zero extraction confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub raw_text: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,
    pub extraction_confidence: f64,
}

impl Evidence {
    pub fn new(raw_text: impl Into<String>, extraction_confidence: f64) -> Self {
        Self {
            raw_text: raw_text.into(),
            attributes: BTreeMap::new(),
            extraction_confidence: unit_interval(extraction_confidence),
        }
    }

    /// Extraction confidence forced into [0, 1]. Non-finite values, which a
    /// permissive float parser can let through, read as 0.
    pub fn confidence(&self) -> f64 {
        unit_interval(self.extraction_confidence)
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: AttributeValue) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// First numeric attribute in key order, if any.
    pub fn numeric_signal(&self) -> Option<f64> {
        self.attributes.values().find_map(|value| match value {
            AttributeValue::Numeric(number) => Some(*number),
            _ => None,
        })
    }

    /// First boolean attribute in key order, used by compliance criteria.
    pub fn compliance_signal(&self) -> Option<bool> {
        self.attributes.values().find_map(|value| match value {
            AttributeValue::Flag(flag) => Some(*flag),
            _ => None,
        })
    }
}

fn unit_interval(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Score for one (vendor, criterion) pair, never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub criterion_id: CriterionId,
    /// Raw score on the criterion's declared scale.
    pub raw: f64,
    /// Raw score rescaled into [0, 100].
    pub normalized: f64,
    pub confidence: f64,
    pub rationale: String,
    /// Set when a compliance criterion evaluated to a failing result.
    pub veto: bool,
}

/// Weighted rollup of one category's criterion scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category_id: CategoryId,
    pub score: f64,
    pub confidence: f64,
    pub compliance_failures: Vec<CriterionId>,
    pub criteria: Vec<CriterionScore>,
}

impl CategoryScore {
    pub fn vetoed(&self) -> bool {
        !self.compliance_failures.is_empty()
    }
}

/// Complete scoring result for one vendor, immutable once returned.
///
/// `disqualified` is explicit because a legitimately low score and a
/// compliance disqualification are different user-facing conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorScoreSummary {
    pub vendor_id: VendorId,
    pub categories: Vec<CategoryScore>,
    pub overall_score: f64,
    pub overall_confidence: f64,
    pub disqualified: bool,
    pub compliance_failures: Vec<CriterionId>,
}
