//! Report submission endpoint: extract, classify, render, persist.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::report::pdf::render_pdf;
use crate::report::{analyze_report, AnalysisResults};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Free-text lab report. Missing field behaves like an empty report.
    #[serde(default)]
    pub report: String,
}

/// `POST /api/analyze` — analyze raw report text.
///
/// Returns the classification results keyed by test label, in discovery
/// order. Persists the rendered PDF as a side effect, overwriting the
/// previous one. Unrecognized or out-of-range values simply shrink the
/// result set; only rendering/persistence faults surface as errors. A body
/// that is not valid JSON is rejected with a 400 rather than axum's default.
pub async fn analyze(
    State(ctx): State<ApiContext>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResults>, ApiError> {
    let Json(request) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    tracing::debug!(chars = request.report.len(), "report received");

    let results = analyze_report(&request.report, ctx.state.reference());

    let pdf = render_pdf(&results)?;
    let stored = ctx.state.store_document(&pdf, results.len())?;

    tracing::info!(
        tests = results.len(),
        path = %stored.path.display(),
        "analysis complete, report persisted"
    );

    Ok(Json(AnalysisResults(results)))
}
