//! Report handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::handlers::extract::ApiJson;
use crate::AppState;

/// Request body for POST /api/generate-accessibility-report
#[derive(Debug, Deserialize)]
pub struct AccessibilityReportRequest {
    #[serde(default)]
    pub story_content: Value,
    pub model: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AccessibilityReportResponse {
    pub report: String,
}

/// POST /api/generate-accessibility-report
///
/// Review story content and return a Markdown report.
pub async fn accessibility_report(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<AccessibilityReportRequest>,
) -> Result<Json<AccessibilityReportResponse>, AppError> {
    let report = state
        .report_service
        .accessibility_report(&body.story_content, body.model.as_deref())
        .await?;

    Ok(Json(AccessibilityReportResponse { report }))
}
