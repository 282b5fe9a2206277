use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info};

use super::cache::{assessment_key, AssessmentCache};
use super::compare::{compare, ComparisonReport, ScoringFailure};
use super::domain::VendorId;
use super::evidence::EvidenceStore;
use super::ingest::EvidenceRecord;
use super::scorecard::Scorecard;
use super::scoring::{ScoringPolicy, VendorScoringEngine};

/// Orchestrates a full comparison run: evidence loading, per-vendor scoring,
/// ranking, and report caching.
///
/// A record referencing an unknown criterion fails scoring for that vendor
/// only; the run proceeds with the remaining vendors and reports the failed
/// vendor ids alongside the ranking.
pub struct AssessmentService<C> {
    policy: ScoringPolicy,
    cache: Arc<C>,
}

impl<C> AssessmentService<C>
where
    C: AssessmentCache,
{
    pub fn new(policy: ScoringPolicy, cache: Arc<C>) -> Self {
        Self { policy, cache }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    pub fn invalidate_cache(&self) {
        self.cache.invalidate();
    }

    pub fn run(&self, scorecard: &Scorecard, records: &[EvidenceRecord]) -> ComparisonReport {
        self.run_with(&self.policy.clone(), scorecard, records)
    }

    /// Run with a caller-supplied policy override.
    pub fn run_with(
        &self,
        policy: &ScoringPolicy,
        scorecard: &Scorecard,
        records: &[EvidenceRecord],
    ) -> ComparisonReport {
        let key = assessment_key(scorecard, policy, records);
        if let Some(report) = self.cache.get(key) {
            debug!(key, "assessment cache hit");
            return report;
        }

        let mut store = EvidenceStore::new(scorecard);
        let mut failed: BTreeSet<VendorId> = BTreeSet::new();
        let mut failures: Vec<ScoringFailure> = Vec::new();

        for record in records {
            let (vendor, criterion, evidence) = record.clone().into_evidence();
            if failed.contains(&vendor) {
                continue;
            }
            if let Err(error) = store.put(vendor.clone(), criterion, evidence) {
                failures.push(ScoringFailure {
                    vendor_id: vendor.clone(),
                    reason: error.to_string(),
                });
                failed.insert(vendor);
            }
        }

        let engine = VendorScoringEngine::new(policy.clone());
        let summaries: Vec<_> = store
            .vendors()
            .iter()
            .filter(|vendor| !failed.contains(vendor))
            .map(|vendor| engine.score_vendor(vendor, scorecard, &store))
            .collect();

        let report = compare(scorecard, &summaries, failures, policy);

        info!(
            vendors = report.ranking.len(),
            failures = report.failures.len(),
            review_flags = report.review_flags.len(),
            "assessment complete"
        );

        self.cache.put(key, report.clone());
        report
    }
}
