use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;

use super::compare::ComparisonReport;
use super::ingest::EvidenceRecord;
use super::scorecard::Scorecard;
use super::scoring::ScoringPolicy;

/// Content-addressed key over everything that influences a report. A policy
/// change or any evidence edit yields a new key, so stale reports are never
/// served.
pub fn assessment_key(
    scorecard: &Scorecard,
    policy: &ScoringPolicy,
    records: &[EvidenceRecord],
) -> u64 {
    let mut hasher = DefaultHasher::new();
    // Serialized form keeps the hash stable across f64 fields. Serialization
    // is infallible for these inputs: plain structs with string map keys, and
    // serde_json writes non-finite floats as null.
    let payload = serde_json::to_string(&(scorecard, policy, records))
        .expect("assessment key inputs serialize to JSON");
    payload.hash(&mut hasher);
    hasher.finish()
}

/// Injected cache collaborator for completed comparison runs.
pub trait AssessmentCache: Send + Sync {
    fn get(&self, key: u64) -> Option<ComparisonReport>;
    fn put(&self, key: u64, report: ComparisonReport);
    fn invalidate(&self);
}

/// Process-local cache; suitable for a single service instance.
#[derive(Debug, Default)]
pub struct InMemoryAssessmentCache {
    entries: Mutex<HashMap<u64, ComparisonReport>>,
}

impl AssessmentCache for InMemoryAssessmentCache {
    fn get(&self, key: u64) -> Option<ComparisonReport> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(&key).cloned())
    }

    fn put(&self, key: u64, report: ComparisonReport) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key, report);
        }
    }

    fn invalidate(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

/// Cache that never stores anything, for callers that want every run fresh.
#[derive(Debug, Default)]
pub struct NoopAssessmentCache;

impl AssessmentCache for NoopAssessmentCache {
    fn get(&self, _key: u64) -> Option<ComparisonReport> {
        None
    }

    fn put(&self, _key: u64, _report: ComparisonReport) {}

    fn invalidate(&self) {}
}
