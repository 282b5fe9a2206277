use std::sync::Arc;

use rfx_assessor::workflows::assessment::{
    AssessmentService, CriterionId, EvidenceRecord, InMemoryAssessmentCache, Scorecard,
    ScoringPolicy, VendorId,
};

const SCORECARD_DESCRIPTOR: &str = r#"[
    {
        "id": "technical",
        "name": "Technical Capability",
        "weight": 0.35,
        "criteria": [
            {"id": "solution_architecture", "weight": 0.4},
            {"id": "security_compliance", "weight": 0.3, "compliance": true},
            {"id": "performance_sla", "weight": 0.3}
        ]
    },
    {
        "id": "cost",
        "name": "Cost Effectiveness",
        "weight": 0.25,
        "criteria": [
            {"id": "total_cost_ownership", "weight": 0.6},
            {"id": "payment_terms", "weight": 0.4}
        ]
    },
    {
        "id": "experience",
        "name": "Vendor Experience",
        "weight": 0.2,
        "criteria": [
            {"id": "company_experience", "weight": 0.5},
            {"id": "project_references", "weight": 0.5}
        ]
    },
    {
        "id": "implementation",
        "name": "Implementation Approach",
        "weight": 0.2,
        "criteria": [
            {"id": "methodology", "weight": 1.0}
        ]
    }
]"#;

fn record(
    vendor: &str,
    criterion: &str,
    numeric: Option<f64>,
    compliant: Option<bool>,
    confidence: f64,
) -> EvidenceRecord {
    EvidenceRecord {
        vendor_id: VendorId(vendor.to_string()),
        criterion_id: CriterionId(criterion.to_string()),
        raw_text: "extracted from proposal".to_string(),
        numeric,
        compliant,
        extraction_confidence: confidence,
    }
}

fn vendor_records(vendor: &str, base: f64, confidence: f64) -> Vec<EvidenceRecord> {
    vec![
        record(vendor, "solution_architecture", Some(base), None, confidence),
        record(vendor, "security_compliance", None, Some(true), confidence),
        record(vendor, "performance_sla", Some(base), None, confidence),
        record(vendor, "total_cost_ownership", Some(base), None, confidence),
        record(vendor, "payment_terms", Some(base), None, confidence),
        record(vendor, "company_experience", Some(base), None, confidence),
        record(vendor, "project_references", Some(base), None, confidence),
        record(vendor, "methodology", Some(base), None, confidence),
    ]
}

fn service() -> AssessmentService<InMemoryAssessmentCache> {
    AssessmentService::new(
        ScoringPolicy::default(),
        Arc::new(InMemoryAssessmentCache::default()),
    )
}

#[test]
fn full_assessment_ranks_vendors_and_recommends_a_winner() {
    let scorecard = Scorecard::from_descriptor(SCORECARD_DESCRIPTOR).expect("descriptor is valid");

    let mut records = vendor_records("cyberguard", 88.0, 0.9);
    records.extend(vendor_records("securenet", 74.0, 0.85));

    let report = service().run(&scorecard, &records);

    assert_eq!(report.ranking.len(), 2);
    assert_eq!(report.ranking[0].vendor_id.0, "cyberguard");
    assert_eq!(report.ranking[0].rank, 1);
    assert!(report.ranking[0].overall_score > report.ranking[1].overall_score);

    assert_eq!(report.category_matrix.len(), 4);
    for row in &report.category_matrix {
        assert_eq!(row.scores.len(), 2);
    }

    let exec = report.executive_summary.expect("summary present");
    assert_eq!(exec.recommended_vendor.map(|v| v.0), Some("cyberguard".to_string()));
}

#[test]
fn one_failed_compliance_criterion_disqualifies_a_high_scorer() {
    let scorecard = Scorecard::from_descriptor(SCORECARD_DESCRIPTOR).expect("descriptor is valid");

    // 9 of 10 signals excellent, one failed compliance check.
    let mut records = vendor_records("cyberguard", 95.0, 0.95);
    records[1] = record("cyberguard", "security_compliance", None, Some(false), 0.95);
    records.extend(vendor_records("securenet", 70.0, 0.8));

    let report = service().run(&scorecard, &records);

    assert_eq!(report.ranking[0].vendor_id.0, "securenet");
    let disqualified = &report.ranking[1];
    assert_eq!(disqualified.vendor_id.0, "cyberguard");
    assert!(disqualified.disqualified);
    assert_eq!(disqualified.overall_score, 0.0);
    assert_eq!(disqualified.compliance_failures, 1);

    let summary = report
        .summaries
        .iter()
        .find(|summary| summary.vendor_id.0 == "cyberguard")
        .expect("disqualified vendor still reported");
    assert!(summary.disqualified);
}

#[test]
fn unknown_criterion_evidence_isolates_the_failing_vendor() {
    let scorecard = Scorecard::from_descriptor(SCORECARD_DESCRIPTOR).expect("descriptor is valid");

    let mut records = vendor_records("vendor-y", 80.0, 0.9);
    records.extend(vendor_records("vendor-z", 60.0, 0.9));
    records.push(record("vendor-x", "not_in_scorecard", Some(50.0), None, 0.9));

    let report = service().run(&scorecard, &records);

    assert_eq!(report.ranking.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].vendor_id.0, "vendor-x");
    assert!(report.failures[0].reason.contains("unknown criterion"));
}

#[test]
fn missing_evidence_lowers_score_and_raises_review_flags() {
    let scorecard = Scorecard::from_descriptor(SCORECARD_DESCRIPTOR).expect("descriptor is valid");

    // Only one criterion backed by evidence; everything else defaults to 0
    // with zero confidence, which must surface as review flags.
    let records = vec![record(
        "sparse",
        "solution_architecture",
        Some(90.0),
        None,
        0.9,
    )];

    let report = service().run(&scorecard, &records);

    let entry = &report.ranking[0];
    assert!(entry.overall_score < 20.0);
    assert!(!report.review_flags.is_empty());
    assert!(report
        .review_flags
        .iter()
        .all(|flag| flag.vendor_id.0 == "sparse"));
}

#[test]
fn repeated_runs_return_identical_reports() {
    let scorecard = Scorecard::from_descriptor(SCORECARD_DESCRIPTOR).expect("descriptor is valid");
    let records = vendor_records("cyberguard", 81.0, 0.75);
    let service = service();

    let first = service.run(&scorecard, &records);
    let second = service.run(&scorecard, &records);

    let first_json = serde_json::to_string(&first).expect("report serializes");
    let second_json = serde_json::to_string(&second).expect("report serializes");
    assert_eq!(first_json, second_json);
}
