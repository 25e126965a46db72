use crate::processing::analyzer::AnalysisResult;
use crate::request::AnalyzeRequest;
use crate::server::error::ApiError;
use crate::server::state::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::{json, Value};

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let mut body = json!({
        "ok": true,
        "extractor": state.analyzer.extractor_kind().as_str(),
    });
    if let Some(model) = state.analyzer.model_name() {
        body["model"] = json!(model);
    }
    Json(body)
}

/// POST /analyze
///
/// Validation happens before any analysis. The analysis itself runs on the
/// blocking pool since embedding calls do not yield.
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;
    let role = request.validate()?;

    let analyzer = state.analyzer.clone();
    let result = tokio::task::spawn_blocking(move || {
        analyzer.analyze(&request.resume_text, &request.job_text, role)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Analysis task failed: {}", e)))??;

    log::debug!(
        "Analysis for {}: {} matched, {} missing",
        role,
        result.summary.matched_count,
        result.summary.missing_count
    );

    Ok(Json(result))
}
