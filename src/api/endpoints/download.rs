//! Report download endpoint.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;

/// `GET /api/download` — the most recently persisted report PDF as an
/// attachment. Distinct 404 before any successful submission.
pub async fn download(State(ctx): State<ApiContext>) -> Result<Response, ApiError> {
    let Some(document) = ctx.state.latest_document()? else {
        return Err(ApiError::NotFound(
            "No report generated yet. Submit a report to /api/analyze first.".into(),
        ));
    };

    let bytes = tokio::fs::read(&document.path)
        .await
        .map_err(|e| ApiError::Internal(format!("failed to read persisted report: {e}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"lab_report.pdf\"",
            ),
        ],
        bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use axum::http::StatusCode;
    use std::sync::Arc;

    fn test_ctx() -> (tempfile::TempDir, ApiContext) {
        let dir = tempfile::TempDir::new().unwrap();
        let state = AppState::new(dir.path().join("report.pdf")).unwrap();
        (dir, ApiContext::new(Arc::new(state)))
    }

    #[tokio::test]
    async fn download_before_any_submission_is_not_found() {
        let (_dir, ctx) = test_ctx();
        let err = download(State(ctx)).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn download_serves_persisted_pdf() {
        let (_dir, ctx) = test_ctx();
        ctx.state.store_document(b"%PDF-fake", 1).unwrap();

        let response = download(State(ctx)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/pdf"
        );
        assert!(response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("attachment"));
    }

    #[tokio::test]
    async fn download_missing_file_is_internal_error() {
        let (_dir, ctx) = test_ctx();
        let stored = ctx.state.store_document(b"%PDF-fake", 1).unwrap();
        std::fs::remove_file(&stored.path).unwrap();

        let err = download(State(ctx)).await.unwrap_err();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
