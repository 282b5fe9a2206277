use super::super::domain::{CategoryScore, CriterionScore};
use super::super::scorecard::Category;

/// Roll criterion scores up into one category score.
///
/// `scores` is parallel to `category.criteria`; defaulted scores for absent
/// evidence contribute like any other so the weighted mean stays unbiased.
/// A vetoed compliance criterion forces the category to 0 regardless of the
/// other criteria.
pub(crate) fn aggregate_category(category: &Category, scores: Vec<CriterionScore>) -> CategoryScore {
    debug_assert_eq!(category.criteria.len(), scores.len());

    let mut weighted_score = 0.0;
    let mut weighted_confidence = 0.0;
    let mut compliance_failures = Vec::new();

    for (criterion, score) in category.criteria.iter().zip(&scores) {
        weighted_score += score.normalized * criterion.weight;
        weighted_confidence += score.confidence * criterion.weight;
        if score.veto {
            compliance_failures.push(criterion.id.clone());
        }
    }

    let score = if compliance_failures.is_empty() {
        weighted_score.clamp(0.0, 100.0)
    } else {
        0.0
    };

    CategoryScore {
        category_id: category.id.clone(),
        score,
        confidence: weighted_confidence.clamp(0.0, 1.0),
        compliance_failures,
        criteria: scores,
    }
}
