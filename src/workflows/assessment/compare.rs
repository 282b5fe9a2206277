use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::confidence::{ConfidenceBand, Grade};
use super::domain::{CategoryId, VendorId, VendorScoreSummary};
use super::scorecard::Scorecard;
use super::scoring::ScoringPolicy;

/// One row of the final ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedVendor {
    pub rank: usize,
    pub vendor_id: VendorId,
    pub overall_score: f64,
    pub overall_confidence: f64,
    pub confidence_band: ConfidenceBand,
    pub disqualified: bool,
    pub compliance_failures: usize,
}

/// Per-category scores across vendors, columns in ranking order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMatrixRow {
    pub category_id: CategoryId,
    pub name: String,
    pub scores: Vec<f64>,
}

/// A (vendor, category) pair whose confidence fell below the review threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowConfidenceFlag {
    pub vendor_id: VendorId,
    pub category_id: CategoryId,
    pub confidence: f64,
}

/// Vendor whose scoring failed; the rest of the comparison proceeds without it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringFailure {
    pub vendor_id: VendorId,
    pub reason: String,
}

/// Notable categories for one vendor, mined for the executive summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorHighlights {
    pub vendor_id: VendorId,
    pub strengths: Vec<CategoryId>,
    pub weaknesses: Vec<CategoryId>,
}

/// Executive-level rollup: recommended vendor plus grading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    pub recommended_vendor: Option<VendorId>,
    pub winning_score: f64,
    pub grade: Grade,
    pub confidence: ConfidenceBand,
    pub highlights: Vec<VendorHighlights>,
}

/// Full comparison output. Constructed fresh per run; no mutable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub ranking: Vec<RankedVendor>,
    pub category_matrix: Vec<CategoryMatrixRow>,
    pub review_flags: Vec<LowConfidenceFlag>,
    pub failures: Vec<ScoringFailure>,
    pub executive_summary: Option<ExecutiveSummary>,
    pub summaries: Vec<VendorScoreSummary>,
}

/// Rank vendor summaries and assemble the comparison report.
///
/// Ordering is descending by overall score with deterministic tie-breaks:
/// fewer compliance failures, then higher overall confidence, then insertion
/// order (stable sort). Disqualified vendors rank last as a block but are
/// never omitted.
///
/// Every summary must have been scored against `scorecard`: the category
/// matrix pairs each summary's categories with `scorecard.categories()` by
/// position, so summaries from a different scorecard are a caller error.
pub fn compare(
    scorecard: &Scorecard,
    summaries: &[VendorScoreSummary],
    failures: Vec<ScoringFailure>,
    policy: &ScoringPolicy,
) -> ComparisonReport {
    let mut ordered: Vec<&VendorScoreSummary> = summaries.iter().collect();
    ordered.sort_by(|a, b| rank_ordering(a, b));

    let ranking = ordered
        .iter()
        .enumerate()
        .map(|(position, summary)| RankedVendor {
            rank: position + 1,
            vendor_id: summary.vendor_id.clone(),
            overall_score: summary.overall_score,
            overall_confidence: summary.overall_confidence,
            confidence_band: ConfidenceBand::classify(summary.overall_confidence, policy),
            disqualified: summary.disqualified,
            compliance_failures: summary.compliance_failures.len(),
        })
        .collect();

    let category_matrix = scorecard
        .categories()
        .iter()
        .enumerate()
        .map(|(row, category)| CategoryMatrixRow {
            category_id: category.id.clone(),
            name: category.name.clone(),
            scores: ordered
                .iter()
                .map(|summary| summary.categories[row].score)
                .collect(),
        })
        .collect();

    let mut review_flags = Vec::new();
    for summary in &ordered {
        for category in &summary.categories {
            if category.confidence < policy.low_confidence_threshold {
                review_flags.push(LowConfidenceFlag {
                    vendor_id: summary.vendor_id.clone(),
                    category_id: category.category_id.clone(),
                    confidence: category.confidence,
                });
            }
        }
    }

    let executive_summary = build_executive_summary(&ordered, policy);

    ComparisonReport {
        ranking,
        category_matrix,
        review_flags,
        failures,
        executive_summary,
        summaries: ordered.into_iter().cloned().collect(),
    }
}

fn rank_ordering(a: &VendorScoreSummary, b: &VendorScoreSummary) -> Ordering {
    a.disqualified
        .cmp(&b.disqualified)
        .then_with(|| b.overall_score.total_cmp(&a.overall_score))
        .then_with(|| {
            a.compliance_failures
                .len()
                .cmp(&b.compliance_failures.len())
        })
        .then_with(|| b.overall_confidence.total_cmp(&a.overall_confidence))
}

fn build_executive_summary(
    ordered: &[&VendorScoreSummary],
    policy: &ScoringPolicy,
) -> Option<ExecutiveSummary> {
    if ordered.is_empty() {
        return None;
    }

    let winner = ordered.iter().find(|summary| !summary.disqualified);

    let highlights = ordered
        .iter()
        .map(|summary| VendorHighlights {
            vendor_id: summary.vendor_id.clone(),
            strengths: summary
                .categories
                .iter()
                .filter(|category| category.score >= policy.strength_floor)
                .map(|category| category.category_id.clone())
                .collect(),
            weaknesses: summary
                .categories
                .iter()
                .filter(|category| category.score < policy.weakness_ceiling)
                .map(|category| category.category_id.clone())
                .collect(),
        })
        .collect();

    let winning_score = winner.map(|summary| summary.overall_score).unwrap_or(0.0);
    let confidence = winner
        .map(|summary| ConfidenceBand::classify(summary.overall_confidence, policy))
        .unwrap_or(ConfidenceBand::Low);

    Some(ExecutiveSummary {
        recommended_vendor: winner.map(|summary| summary.vendor_id.clone()),
        winning_score,
        grade: Grade::from_score(winning_score),
        confidence,
        highlights,
    })
}
