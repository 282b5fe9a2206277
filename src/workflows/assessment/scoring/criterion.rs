use super::super::domain::{CriterionScore, Evidence};
use super::super::scorecard::Criterion;
use super::config::ScoringPolicy;

/// Capability seam for scoring one (criterion, evidence) pair.
///
/// Alternate strategies (ML ranking, LLM judgment) can replace the rule
/// engine without touching aggregation or ranking.
pub trait CriterionScorer: Send + Sync {
    fn score(&self, criterion: &Criterion, evidence: Option<&Evidence>) -> CriterionScore;
}

/// Default scorer deriving scores from structured evidence attributes.
#[derive(Debug, Clone)]
pub struct RuleBasedScorer {
    policy: ScoringPolicy,
}

impl RuleBasedScorer {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    fn absent(criterion: &Criterion, rationale: String) -> CriterionScore {
        CriterionScore {
            criterion_id: criterion.id.clone(),
            raw: criterion.scale.min,
            normalized: 0.0,
            confidence: 0.0,
            rationale,
            veto: false,
        }
    }

    fn score_compliance(criterion: &Criterion, evidence: &Evidence) -> CriterionScore {
        let confidence = evidence.confidence();
        match evidence.compliance_signal() {
            Some(true) => CriterionScore {
                criterion_id: criterion.id.clone(),
                raw: criterion.scale.max,
                normalized: 100.0,
                confidence,
                rationale: "compliance requirement met".to_string(),
                veto: false,
            },
            Some(false) => CriterionScore {
                criterion_id: criterion.id.clone(),
                raw: criterion.scale.min,
                normalized: 0.0,
                confidence,
                rationale: "compliance requirement failed".to_string(),
                veto: true,
            },
            // Malformed extraction, not a vendor failure: no veto.
            None => Self::absent(
                criterion,
                "compliance evidence lacks a boolean attribute".to_string(),
            ),
        }
    }

    fn score_numeric(criterion: &Criterion, evidence: &Evidence, value: f64) -> CriterionScore {
        let sanitized = if value.is_finite() {
            value
        } else {
            criterion.scale.min
        };
        let raw = criterion.scale.clamp(sanitized);
        let rationale = if !value.is_finite() {
            format!("non-finite numeric attribute replaced with scale minimum {raw}")
        } else if raw != value {
            format!(
                "numeric value {value} outside scale [{}, {}], clamped to {raw}",
                criterion.scale.min, criterion.scale.max
            )
        } else {
            format!("scored from numeric attribute {value}")
        };

        CriterionScore {
            criterion_id: criterion.id.clone(),
            raw,
            normalized: criterion.scale.normalize(raw),
            confidence: evidence.confidence(),
            rationale,
            veto: false,
        }
    }

    fn score_freetext(&self, criterion: &Criterion, evidence: &Evidence) -> CriterionScore {
        let raw = criterion.scale.midpoint();
        let confidence =
            (evidence.confidence() * self.policy.freetext_fallback_multiplier).clamp(0.0, 1.0);

        CriterionScore {
            criterion_id: criterion.id.clone(),
            raw,
            normalized: criterion.scale.normalize(raw),
            confidence,
            rationale: "no numeric signal in evidence; defaulted to scale midpoint".to_string(),
            veto: false,
        }
    }
}

impl CriterionScorer for RuleBasedScorer {
    fn score(&self, criterion: &Criterion, evidence: Option<&Evidence>) -> CriterionScore {
        let Some(evidence) = evidence else {
            return Self::absent(criterion, "no evidence found".to_string());
        };

        if criterion.compliance {
            return Self::score_compliance(criterion, evidence);
        }

        match evidence.numeric_signal() {
            Some(value) => Self::score_numeric(criterion, evidence, value),
            None => self.score_freetext(criterion, evidence),
        }
    }
}
