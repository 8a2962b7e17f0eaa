//! Axum route handlers for the Report API.

use std::path::Path;

use axum::{
    extract::{Multipart, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::report::composer::compose_report;
use crate::report::prompts::build_analysis_prompt;
use crate::report::render::render_pdf;
use crate::report::staging::StagedReport;
use crate::report::submission::{FormSubmission, ATTACHMENT_EXTENSIONS, INDUSTRIES, STATES};
use crate::report::validation::validate_submission;
use crate::state::AppState;

/// Number of completion lines that went through classification.
pub const ANALYSIS_LINES_HEADER: &str = "x-report-analysis-lines";

/// Request body cap for the multipart form route, attachments included.
pub const MAX_FORM_BYTES: usize = 200 * 1024 * 1024;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub industries: &'static [&'static str],
    pub states: &'static [&'static str],
    pub attachment_types: &'static [&'static str],
}

/// Report plus the analysis text it was built from, for clients that show a
/// preview next to the download.
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub file_name: String,
    pub analysis: String,
    pub analysis_lines: usize,
    /// PDF content as base64-encoded bytes
    pub pdf_base64: String,
}

/// How the generated report is delivered, picked from the `Accept` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Raw PDF attachment. The default.
    Pdf,
    /// [`ReportResponse`] as JSON.
    Json,
}

impl ReportFormat {
    /// JSON when any media range in `Accept` is `application/json`.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let wants_json = headers
            .get_all(header::ACCEPT)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(','))
            .filter_map(|range| range.split(';').next())
            .any(|media| media.trim().eq_ignore_ascii_case("application/json"));

        if wants_json {
            ReportFormat::Json
        } else {
            ReportFormat::Pdf
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/reports/options
///
/// Values for the industry and state selection controls.
pub async fn handle_options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        industries: &INDUSTRIES,
        states: &STATES,
        attachment_types: &ATTACHMENT_EXTENSIONS,
    })
}

/// POST /api/v1/reports
///
/// JSON form submission in, PDF attachment (or [`ReportResponse`]) out.
pub async fn handle_generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(submission): Json<FormSubmission>,
) -> Result<Response, AppError> {
    generate_report(&state, submission, ReportFormat::from_headers(&headers)).await
}

/// POST /api/v1/reports/form
///
/// Same as `handle_generate`, for `multipart/form-data` posts from an HTML form.
/// Bodies up to [`MAX_FORM_BYTES`] are accepted.
pub async fn handle_generate_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let submission = read_form_submission(multipart).await?;
    generate_report(&state, submission, ReportFormat::from_headers(&headers)).await
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// validate → prompt → completion → compose + render → stage → deliver.
///
/// Nothing is shared between submissions except the staging directory, where
/// each report gets its own file that is removed before the response leaves.
pub async fn generate_report(
    state: &AppState,
    submission: FormSubmission,
    format: ReportFormat,
) -> Result<Response, AppError> {
    validate_submission(&submission)?;

    info!(
        industry = %submission.industry,
        state = %submission.state,
        attachments = submission.attachments.len(),
        pitch_deck = submission.include_pitch_deck,
        "Generating business report"
    );

    let prompt = build_analysis_prompt(&submission);
    let analysis = state.completer.complete(&prompt).await?;
    let analysis_lines = analysis.split('\n').count();

    let generated_at = Local::now().naive_local();
    let styles = state.styles.clone();
    let staging_dir = state.config.staging_dir.clone();

    // Layout and serialization are CPU-bound; keep them off the async workers.
    let (download_name, bytes, analysis) = tokio::task::spawn_blocking(move || {
        let doc = compose_report(&submission, &analysis, generated_at.date());
        let pdf = render_pdf(&doc, &styles).map_err(|e| AppError::Composition(e.to_string()))?;
        let (download_name, bytes) = stage_and_collect(&staging_dir, &pdf, generated_at)?;
        Ok::<_, AppError>((download_name, bytes, analysis))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in report generation: {e}")))??;

    info!(bytes = bytes.len(), file = %download_name, ?format, "Business report generated");

    if format == ReportFormat::Json {
        let pdf_base64 =
            base64::Engine::encode(&base64::engine::general_purpose::STANDARD, &bytes);
        return Ok(Json(ReportResponse {
            file_name: download_name,
            analysis,
            analysis_lines,
            pdf_base64,
        })
        .into_response());
    }

    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{download_name}\""))
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
            (
                HeaderName::from_static(ANALYSIS_LINES_HEADER),
                HeaderValue::from(analysis_lines),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// Writes the PDF to its staging path, reads it back, and removes the file
/// before returning, whatever the outcome of the read.
fn stage_and_collect(
    dir: &Path,
    pdf: &[u8],
    generated_at: NaiveDateTime,
) -> Result<(String, Vec<u8>), AppError> {
    let staged =
        StagedReport::stage(dir, pdf, generated_at).map_err(|e| AppError::Internal(e.into()))?;
    let download_name = staged.download_name().to_string();
    let read = staged.read();

    if let Err(e) = staged.remove() {
        warn!("Staged report cleanup failed: {e}");
    }

    let bytes = read.map_err(|e| AppError::Internal(e.into()))?;
    Ok((download_name, bytes))
}

/// Collects a multipart form into a submission.
///
/// File parts named `attachments` contribute their file name only; the
/// content is never read into memory.
pub async fn read_form_submission(mut multipart: Multipart) -> Result<FormSubmission, AppError> {
    let mut submission = FormSubmission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid form data: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "attachments" {
            if let Some(file_name) = field.file_name().filter(|n| !n.is_empty()) {
                submission.attachments.push(file_name.to_string());
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid form field '{name}': {e}")))?;

        match name.as_str() {
            "full_name" => submission.full_name = value,
            "email" => submission.email = value,
            "phone" => submission.phone = value,
            "business_name" => submission.business_name = Some(value),
            "registration_number" => submission.registration_number = Some(value),
            "industry" => submission.industry = value,
            "state" => submission.state = value,
            "business_goals" => submission.business_goals = value,
            "additional_info" => submission.additional_info = Some(value),
            "include_pitch_deck" => submission.include_pitch_deck = is_checked(&value),
            other => debug!(field = other, "Ignoring unknown form field"),
        }
    }

    Ok(submission)
}

/// HTML checkboxes post `on`; API clients tend to send `true`.
fn is_checked(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "on" | "yes" | "1"
    )
}
