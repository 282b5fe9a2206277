mod aggregate;
mod config;
mod criterion;

pub use config::ScoringPolicy;
pub use criterion::{CriterionScorer, RuleBasedScorer};

use aggregate::aggregate_category;

use super::domain::{VendorId, VendorScoreSummary};
use super::evidence::EvidenceStore;
use super::scorecard::Scorecard;

/// Stateless engine scoring one vendor at a time against a scorecard.
///
/// `score_vendor` is a pure function of its immutable inputs, so callers may
/// fan vendors out across threads without coordination.
pub struct VendorScoringEngine {
    scorer: Box<dyn CriterionScorer>,
}

impl VendorScoringEngine {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self::with_scorer(Box::new(RuleBasedScorer::new(policy)))
    }

    /// Swap in an alternate scoring strategy behind the capability trait.
    pub fn with_scorer(scorer: Box<dyn CriterionScorer>) -> Self {
        Self { scorer }
    }

    pub fn score_vendor(
        &self,
        vendor: &VendorId,
        scorecard: &Scorecard,
        store: &EvidenceStore,
    ) -> VendorScoreSummary {
        let mut categories = Vec::with_capacity(scorecard.categories().len());
        let mut overall_score = 0.0;
        let mut overall_confidence = 0.0;
        let mut compliance_failures = Vec::new();

        for category in scorecard.categories() {
            let scores = category
                .criteria
                .iter()
                .map(|criterion| {
                    self.scorer
                        .score(criterion, store.get(vendor, &criterion.id))
                })
                .collect();

            let rollup = aggregate_category(category, scores);
            overall_score += rollup.score * category.weight;
            overall_confidence += rollup.confidence * category.weight;
            compliance_failures.extend(rollup.compliance_failures.iter().cloned());
            categories.push(rollup);
        }

        let disqualified = !compliance_failures.is_empty();
        let overall_score = if disqualified {
            0.0
        } else {
            overall_score.clamp(0.0, 100.0)
        };

        VendorScoreSummary {
            vendor_id: vendor.clone(),
            categories,
            overall_score,
            overall_confidence: overall_confidence.clamp(0.0, 1.0),
            disqualified,
            compliance_failures,
        }
    }
}
