use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{CategoryId, CriterionId, ScoreScale};

/// Weights must reach 1.0 within this tolerance before a scorecard builds.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Single evaluable requirement inside a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: CriterionId,
    #[serde(default)]
    pub description: String,
    /// Fraction of the enclosing category's weight.
    pub weight: f64,
    #[serde(default)]
    pub scale: ScoreScale,
    /// Pass/fail criteria bypass weighted scoring and can veto the vendor.
    #[serde(default)]
    pub compliance: bool,
}

/// Named group of criteria carrying a fraction of the total weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    #[serde(default)]
    pub name: String,
    pub weight: f64,
    pub criteria: Vec<Criterion>,
}

/// Construction-time violations. Never silently repaired.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidScorecard {
    #[error("scorecard declares no categories")]
    Empty,
    #[error("category '{0}' declares no criteria")]
    EmptyCategory(CategoryId),
    #[error("negative weight {weight} on '{id}'")]
    NegativeWeight { id: String, weight: f64 },
    #[error("non-finite weight {weight} on '{id}'")]
    NonFiniteWeight { id: String, weight: f64 },
    #[error("category weights sum to {sum:.6}, expected 1.0 within {WEIGHT_TOLERANCE}")]
    CategoryWeightSum { sum: f64 },
    #[error("criterion weights in category '{category}' sum to {sum:.6}, expected 1.0")]
    CriterionWeightSum { category: CategoryId, sum: f64 },
    #[error("criterion id '{0}' appears more than once")]
    DuplicateCriterion(CriterionId),
    #[error("criterion '{id}' has an inverted scale ({min} >= {max})")]
    InvertedScale { id: CriterionId, min: f64, max: f64 },
    #[error("criterion '{id}' has non-finite scale bounds ({min}, {max})")]
    NonFiniteScale { id: CriterionId, min: f64, max: f64 },
}

/// Lookup failures raised while scoring against a built scorecard.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("unknown criterion '{0}'")]
    UnknownCriterion(CriterionId),
}

/// Validated, immutable evaluation rubric. Any edit builds a new instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scorecard {
    categories: Vec<Category>,
    #[serde(skip)]
    index: BTreeMap<CriterionId, (usize, usize)>,
}

impl Scorecard {
    /// Validate weight normalization and referential consistency, then build.
    pub fn build(categories: Vec<Category>) -> Result<Self, InvalidScorecard> {
        if categories.is_empty() {
            return Err(InvalidScorecard::Empty);
        }

        let mut index = BTreeMap::new();
        let mut category_weight_sum = 0.0;

        for (category_pos, category) in categories.iter().enumerate() {
            // NaN satisfies neither the sign check nor the sum tolerance, so
            // it has to be rejected before it poisons the running sums.
            if !category.weight.is_finite() {
                return Err(InvalidScorecard::NonFiniteWeight {
                    id: category.id.0.clone(),
                    weight: category.weight,
                });
            }
            if category.weight < 0.0 {
                return Err(InvalidScorecard::NegativeWeight {
                    id: category.id.0.clone(),
                    weight: category.weight,
                });
            }
            category_weight_sum += category.weight;

            if category.criteria.is_empty() {
                return Err(InvalidScorecard::EmptyCategory(category.id.clone()));
            }

            let mut criterion_weight_sum = 0.0;
            for (criterion_pos, criterion) in category.criteria.iter().enumerate() {
                if !criterion.weight.is_finite() {
                    return Err(InvalidScorecard::NonFiniteWeight {
                        id: criterion.id.0.clone(),
                        weight: criterion.weight,
                    });
                }
                if criterion.weight < 0.0 {
                    return Err(InvalidScorecard::NegativeWeight {
                        id: criterion.id.0.clone(),
                        weight: criterion.weight,
                    });
                }
                if !criterion.scale.min.is_finite() || !criterion.scale.max.is_finite() {
                    return Err(InvalidScorecard::NonFiniteScale {
                        id: criterion.id.clone(),
                        min: criterion.scale.min,
                        max: criterion.scale.max,
                    });
                }
                if criterion.scale.min >= criterion.scale.max {
                    return Err(InvalidScorecard::InvertedScale {
                        id: criterion.id.clone(),
                        min: criterion.scale.min,
                        max: criterion.scale.max,
                    });
                }
                criterion_weight_sum += criterion.weight;

                if index
                    .insert(criterion.id.clone(), (category_pos, criterion_pos))
                    .is_some()
                {
                    return Err(InvalidScorecard::DuplicateCriterion(criterion.id.clone()));
                }
            }

            if (criterion_weight_sum - 1.0).abs() > WEIGHT_TOLERANCE {
                return Err(InvalidScorecard::CriterionWeightSum {
                    category: category.id.clone(),
                    sum: criterion_weight_sum,
                });
            }
        }

        if (category_weight_sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(InvalidScorecard::CategoryWeightSum {
                sum: category_weight_sum,
            });
        }

        Ok(Self { categories, index })
    }

    /// Parse a JSON scorecard descriptor produced by the scorecard-builder
    /// collaborator, then validate it.
    pub fn from_descriptor(json: &str) -> Result<Self, DescriptorError> {
        let categories: Vec<Category> = serde_json::from_str(json)?;
        Ok(Self::build(categories)?)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn contains(&self, id: &CriterionId) -> bool {
        self.index.contains_key(id)
    }

    pub fn criterion(&self, id: &CriterionId) -> Result<&Criterion, ScoringError> {
        let (category_pos, criterion_pos) = self
            .index
            .get(id)
            .ok_or_else(|| ScoringError::UnknownCriterion(id.clone()))?;
        Ok(&self.categories[*category_pos].criteria[*criterion_pos])
    }
}

/// Failures loading a scorecard descriptor from JSON.
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    #[error("scorecard descriptor is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] InvalidScorecard),
}
