use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::assessment::cache::{AssessmentCache, InMemoryAssessmentCache};
use crate::workflows::assessment::compare::ComparisonReport;
use crate::workflows::assessment::domain::{
    AttributeValue, CategoryId, CriterionId, Evidence, ScoreScale, VendorId,
};
use crate::workflows::assessment::evidence::EvidenceStore;
use crate::workflows::assessment::ingest::EvidenceRecord;
use crate::workflows::assessment::scorecard::{Category, Criterion, Scorecard};
use crate::workflows::assessment::scoring::{ScoringPolicy, VendorScoringEngine};
use crate::workflows::assessment::service::AssessmentService;

pub(super) fn vendor(id: &str) -> VendorId {
    VendorId(id.to_string())
}

pub(super) fn criterion_id(id: &str) -> CriterionId {
    CriterionId(id.to_string())
}

pub(super) fn category_id(id: &str) -> CategoryId {
    CategoryId(id.to_string())
}

pub(super) fn criterion(id: &str, weight: f64) -> Criterion {
    Criterion {
        id: criterion_id(id),
        description: String::new(),
        weight,
        scale: ScoreScale::default(),
        compliance: false,
    }
}

pub(super) fn compliance_criterion(id: &str, weight: f64) -> Criterion {
    Criterion {
        compliance: true,
        ..criterion(id, weight)
    }
}

/// Three-category scorecard with one compliance criterion, mirroring the
/// technical/cost/experience split common to RFP rubrics.
pub(super) fn sample_scorecard() -> Scorecard {
    Scorecard::build(vec![
        Category {
            id: category_id("technical"),
            name: "Technical Capability".to_string(),
            weight: 0.4,
            criteria: vec![
                criterion("architecture", 0.5),
                compliance_criterion("security_compliance", 0.25),
                criterion("performance_sla", 0.25),
            ],
        },
        Category {
            id: category_id("cost"),
            name: "Cost Effectiveness".to_string(),
            weight: 0.35,
            criteria: vec![criterion("tco", 0.6), criterion("pricing_model", 0.4)],
        },
        Category {
            id: category_id("experience"),
            name: "Vendor Experience".to_string(),
            weight: 0.25,
            criteria: vec![criterion("references", 1.0)],
        },
    ])
    .expect("sample scorecard is valid")
}

pub(super) fn numeric_evidence(value: f64, confidence: f64) -> Evidence {
    Evidence::new("extracted numeric claim", confidence)
        .with_attribute("numeric", AttributeValue::Numeric(value))
}

pub(super) fn compliance_evidence(compliant: bool, confidence: f64) -> Evidence {
    Evidence::new("extracted compliance claim", confidence)
        .with_attribute("compliant", AttributeValue::Flag(compliant))
}

pub(super) fn text_evidence(confidence: f64) -> Evidence {
    Evidence::new("narrative answer without figures", confidence)
}

pub(super) fn record(
    vendor_id: &str,
    criterion: &str,
    numeric: Option<f64>,
    compliant: Option<bool>,
    confidence: f64,
) -> EvidenceRecord {
    EvidenceRecord {
        vendor_id: vendor(vendor_id),
        criterion_id: criterion_id(criterion),
        raw_text: "extracted claim".to_string(),
        numeric,
        compliant,
        extraction_confidence: confidence,
    }
}

/// Every criterion backed by strong numeric evidence at the given score.
pub(super) fn full_records(vendor_id: &str, score: f64, confidence: f64) -> Vec<EvidenceRecord> {
    vec![
        record(vendor_id, "architecture", Some(score), None, confidence),
        record(
            vendor_id,
            "security_compliance",
            None,
            Some(true),
            confidence,
        ),
        record(vendor_id, "performance_sla", Some(score), None, confidence),
        record(vendor_id, "tco", Some(score), None, confidence),
        record(vendor_id, "pricing_model", Some(score), None, confidence),
        record(vendor_id, "references", Some(score), None, confidence),
    ]
}

pub(super) fn populated_store(
    scorecard: &Scorecard,
    records: &[EvidenceRecord],
) -> EvidenceStore {
    let mut store = EvidenceStore::new(scorecard);
    for record in records {
        let (vendor, criterion, evidence) = record.clone().into_evidence();
        store
            .put(vendor, criterion, evidence)
            .expect("fixture criterion ids are known");
    }
    store
}

pub(super) fn engine() -> VendorScoringEngine {
    VendorScoringEngine::new(ScoringPolicy::default())
}

pub(super) fn build_service() -> AssessmentService<InMemoryAssessmentCache> {
    AssessmentService::new(
        ScoringPolicy::default(),
        Arc::new(InMemoryAssessmentCache::default()),
    )
}

/// Cache wrapper counting hits so tests can assert a second run was served
/// from cache.
#[derive(Default)]
pub(super) struct CountingCache {
    inner: InMemoryAssessmentCache,
    pub(super) hits: AtomicUsize,
    pub(super) puts: AtomicUsize,
}

impl AssessmentCache for CountingCache {
    fn get(&self, key: u64) -> Option<ComparisonReport> {
        let found = self.inner.get(key);
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::SeqCst);
        }
        found
    }

    fn put(&self, key: u64, report: ComparisonReport) {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.inner.put(key, report);
    }

    fn invalidate(&self) {
        self.inner.invalidate();
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
