use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{process_upload, DocumentMetadata, ExtractionError, MEGABYTE};
use crate::report::{build_report, evaluate, Evaluation};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub text: String,
    pub job_title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    /// Id for `GET /api/v1/reports/:id/download`.
    pub report_id: Uuid,
    pub metadata: Option<DocumentMetadata>,
    #[serde(flatten)]
    pub evaluation: Evaluation,
}

#[derive(Debug, Serialize)]
pub struct JobTitlesResponse {
    pub job_titles: Vec<String>,
}

/// GET /api/v1/jobs
pub async fn list_jobs(State(state): State<AppState>) -> Json<JobTitlesResponse> {
    Json(JobTitlesResponse {
        job_titles: state.reference.job_titles(),
    })
}

/// POST /api/v1/analyze
/// Multipart form with a `file` part (PDF) and an optional `job_title` part.
pub async fn analyze_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let max_bytes = state.config.max_upload_bytes;
    let mut upload: Option<(String, Bytes)> = None;
    let mut job_title: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_bytes))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(e, max_bytes))?;
                upload = Some((file_name, data));
            }
            Some("job_title") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(e, max_bytes))?;
                job_title = Some(value);
            }
            _ => {}
        }
    }

    let (file_name, data) = upload.ok_or(ExtractionError::MissingFile)?;
    info!("Received upload {file_name} ({} bytes)", data.len());

    let extracted =
        tokio::task::spawn_blocking(move || process_upload(&file_name, &data, max_bytes))
            .await
            .map_err(anyhow::Error::from)??;

    respond(&state, &extracted.text, job_title.as_deref(), Some(extracted.metadata)).await
}

/// POST /api/v1/analyze/text
/// Same pipeline as the upload route, starting from plain text.
pub async fn analyze_text(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeTextRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    respond(&state, &req.text, req.job_title.as_deref(), None).await
}

async fn respond(
    state: &AppState,
    text: &str,
    job_title: Option<&str>,
    metadata: Option<DocumentMetadata>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let evaluation = evaluate(
        &state.analyzer,
        &state.rater,
        &state.reference,
        text,
        job_title,
    )?;
    let report = build_report(&evaluation, metadata.as_ref());
    let report_id = state.reports.insert(report).await;

    Ok(Json(AnalyzeResponse {
        report_id,
        metadata,
        evaluation,
    }))
}

fn multipart_error(err: MultipartError, max_bytes: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ExtractionError::TooLarge {
            limit_mb: max_bytes.div_ceil(MEGABYTE),
        }
        .into()
    } else {
        AppError::Validation(err.body_text())
    }
}
