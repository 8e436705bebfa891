//! Axum route handlers for evaluation submissions.
//!
//! Both routes take the same multipart form. `/evaluate` answers with the HTML
//! page, `/api/v1/evaluations` with JSON.

use axum::{
    extract::{Multipart, State},
    response::{Html, IntoResponse, Response},
    Json,
};
use tracing::warn;

use crate::errors::AppError;
use crate::models::evaluation::{CaseInput, EvaluationReport, UploadedFile};
use crate::render::{render_page, FormValues, Outcome};
use crate::state::AppState;

/// Multipart field carrying the uploaded document.
const DOCUMENT_FIELD: &str = "document";

/// Collects the form fields into a `CaseInput`. Presence is not checked
/// here; the evaluator owns that rule.
pub async fn read_case_input(mut multipart: Multipart) -> Result<CaseInput, AppError> {
    let mut input = CaseInput::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            DOCUMENT_FIELD => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                // An empty file input is still sent, with no file name.
                if !file_name.is_empty() {
                    input.document = Some(UploadedFile::new(file_name, bytes));
                }
            }
            "case_id" => input.case_id = field.text().await?,
            "client" => input.client = field.text().await?,
            "project" => input.project = field.text().await?,
            "partner" => input.partner = field.text().await?,
            "candidate_info" => input.candidate_info = field.text().await?,
            other => warn!("Ignoring unknown form field '{other}'"),
        }
    }

    Ok(input)
}

/// GET /
pub async fn handle_form_page() -> Html<String> {
    Html(render_page(&FormValues::default(), None))
}

/// POST /evaluate
///
/// Runs the evaluation and re-renders the page with either the result panel
/// or an error message, never both.
pub async fn handle_evaluate_form(State(state): State<AppState>, multipart: Multipart) -> Response {
    let input = match read_case_input(multipart).await {
        Ok(input) => input,
        Err(e) => return error_page(&FormValues::default(), e),
    };
    let form = FormValues::from(&input);

    match state.evaluator.evaluate(input).await {
        Ok(report) => Html(render_page(&form, Some(&Outcome::Success(report)))).into_response(),
        Err(e) => error_page(&form, e),
    }
}

/// POST /api/v1/evaluations
pub async fn handle_evaluate_api(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<EvaluationReport>, AppError> {
    let input = read_case_input(multipart).await?;
    let report = state.evaluator.evaluate(input).await?;
    Ok(Json(report))
}

fn error_page(form: &FormValues, err: AppError) -> Response {
    let (status, _, message) = err.describe();
    let message = match err {
        AppError::IncompleteInput(_) => "すべての項目を入力・アップロードしてください。".to_string(),
        AppError::UnsupportedFormat(_) => "PDF, DOCX, TXTのみ対応しています。".to_string(),
        _ => message,
    };
    (status, Html(render_page(form, Some(&Outcome::Failure(message))))).into_response()
}
