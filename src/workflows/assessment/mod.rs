//! Scoring and comparison engine for vendor RFP assessments.
//!
//! The modules here consume an already-validated scorecard plus extracted
//! evidence and produce deterministic scores, rankings, and confidence
//! annotations. Everything is a value object owned by the caller; the engine
//! holds no mutable state across runs beyond the injected report cache.

pub mod cache;
pub mod compare;
pub mod confidence;
pub mod domain;
pub mod evidence;
pub mod ingest;
pub mod router;
pub mod scorecard;
mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use cache::{AssessmentCache, InMemoryAssessmentCache, NoopAssessmentCache};
pub use compare::{
    compare, CategoryMatrixRow, ComparisonReport, ExecutiveSummary, LowConfidenceFlag,
    RankedVendor, ScoringFailure, VendorHighlights,
};
pub use confidence::{ConfidenceBand, Grade};
pub use domain::{
    AttributeValue, CategoryId, CategoryScore, CriterionId, CriterionScore, Evidence, ScoreScale,
    VendorId, VendorScoreSummary,
};
pub use evidence::EvidenceStore;
pub use ingest::{records_from_csv, records_from_json, records_from_path, EvidenceRecord, IngestError};
pub use router::assessment_router;
pub use scorecard::{
    Category, Criterion, DescriptorError, InvalidScorecard, Scorecard, ScoringError,
    WEIGHT_TOLERANCE,
};
pub use scoring::{CriterionScorer, RuleBasedScorer, ScoringPolicy, VendorScoringEngine};
pub use service::AssessmentService;
