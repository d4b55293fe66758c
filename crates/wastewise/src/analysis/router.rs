use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::payload::AnalysisPayload;
use super::pipeline::{AnalysisError, WasteAnalyzer};
use crate::report::{render_dashboard, BrandConfig};

#[derive(Clone)]
pub(crate) struct AnalysisState {
    analyzer: Arc<WasteAnalyzer>,
    brand: Arc<BrandConfig>,
}

/// Router builder exposing the analysis and dashboard endpoints.
pub fn analysis_router(analyzer: Arc<WasteAnalyzer>, brand: Arc<BrandConfig>) -> Router {
    Router::new()
        .route("/api/v1/analysis", post(analyze_handler))
        .route("/api/v1/analysis/dashboard", post(dashboard_handler))
        .with_state(AnalysisState { analyzer, brand })
}

pub(crate) async fn analyze_handler(
    State(state): State<AnalysisState>,
    payload: Result<axum::Json<AnalysisPayload>, JsonRejection>,
) -> Response {
    let axum::Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };

    match state.analyzer.analyze(&payload) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => validation_response(error),
    }
}

pub(crate) async fn dashboard_handler(
    State(state): State<AnalysisState>,
    payload: Result<axum::Json<AnalysisPayload>, JsonRejection>,
) -> Response {
    let axum::Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };

    let result = match state.analyzer.analyze(&payload) {
        Ok(result) => result,
        Err(error) => return validation_response(error),
    };

    match render_dashboard(&result, &state.brand) {
        Ok(html) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, mime::TEXT_HTML_UTF_8.as_ref())],
            html,
        )
            .into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

fn rejection_response(rejection: JsonRejection) -> Response {
    let payload = json!({
        "error": rejection.body_text(),
    });
    (rejection.status(), axum::Json(payload)).into_response()
}

fn validation_response(error: AnalysisError) -> Response {
    let payload = json!({
        "error": error.to_string(),
        "errors": error.errors(),
    });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}
