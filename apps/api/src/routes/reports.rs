use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

const REPORT_FILE_NAME: &str = "resume_analysis_report.json";

/// GET /api/v1/reports/:id/download
pub async fn download_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let report = state
        .reports
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Report {id} not found")))?;
    let body = serde_json::to_vec_pretty(report.as_ref()).map_err(anyhow::Error::from)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{REPORT_FILE_NAME}\""),
            ),
        ],
        body,
    ))
}
