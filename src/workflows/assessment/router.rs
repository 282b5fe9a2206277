use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::cache::AssessmentCache;
use super::compare::{
    CategoryMatrixRow, ExecutiveSummary, LowConfidenceFlag, RankedVendor, ScoringFailure,
};
use super::domain::VendorScoreSummary;
use super::ingest::EvidenceRecord;
use super::scorecard::{Category, Scorecard};
use super::scoring::ScoringPolicy;
use super::service::AssessmentService;

/// Router builder exposing the comparison endpoint and cache control.
pub fn assessment_router<C>(service: Arc<AssessmentService<C>>) -> Router
where
    C: AssessmentCache + 'static,
{
    Router::new()
        .route("/api/v1/assessment/compare", post(compare_handler::<C>))
        .route(
            "/api/v1/assessment/cache/invalidate",
            post(invalidate_handler::<C>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompareRequest {
    pub scorecard: Vec<Category>,
    pub evidence: Vec<EvidenceRecord>,
    #[serde(default)]
    pub policy: Option<ScoringPolicy>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CompareResponse {
    pub evaluated_at: DateTime<Utc>,
    pub ranking: Vec<RankedVendor>,
    pub category_matrix: Vec<CategoryMatrixRow>,
    pub review_flags: Vec<LowConfidenceFlag>,
    pub failures: Vec<ScoringFailure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executive_summary: Option<ExecutiveSummary>,
    pub summaries: Vec<VendorScoreSummary>,
}

pub(crate) async fn compare_handler<C>(
    State(service): State<Arc<AssessmentService<C>>>,
    Json(payload): Json<CompareRequest>,
) -> Response
where
    C: AssessmentCache + 'static,
{
    let scorecard = match Scorecard::build(payload.scorecard) {
        Ok(scorecard) => scorecard,
        Err(error) => {
            let body = json!({ "error": error.to_string() });
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response();
        }
    };

    let policy = payload
        .policy
        .unwrap_or_else(|| service.policy().clone());
    let report = service.run_with(&policy, &scorecard, &payload.evidence);

    let response = CompareResponse {
        evaluated_at: Utc::now(),
        ranking: report.ranking,
        category_matrix: report.category_matrix,
        review_flags: report.review_flags,
        failures: report.failures,
        executive_summary: report.executive_summary,
        summaries: report.summaries,
    };

    (StatusCode::OK, Json(response)).into_response()
}

pub(crate) async fn invalidate_handler<C>(
    State(service): State<Arc<AssessmentService<C>>>,
) -> StatusCode
where
    C: AssessmentCache + 'static,
{
    service.invalidate_cache();
    StatusCode::NO_CONTENT
}
