//! PDF report delivery.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Form;
use serde::Deserialize;

use renalyx_common::RenderError;
use renalyx_report::{ReportDocument, ReportSubject};

use crate::error::AppError;
use crate::state::SharedState;

/// Placeholder used when the label query parameter is absent or blank.
const MISSING_LABEL: &str = "None";

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub prediction_result: Option<String>,
}

/// GET /report?prediction_result=... renders a report for an already-known label.
pub async fn report_for_label(
    State(state): State<SharedState>,
    Query(query): Query<ReportQuery>,
) -> Result<Response, AppError> {
    let label = query
        .prediction_result
        .filter(|label| !label.trim().is_empty())
        .unwrap_or_else(|| MISSING_LABEL.to_string());

    let doc = tokio::task::spawn_blocking(move || {
        state.renderer.render(ReportSubject::Label(&label))
    })
    .await
    .map_err(|e| RenderError::Layout(format!("render task failed: {e}")))??;

    Ok(attachment(doc))
}

/// POST /report re-runs the pipeline on the submitted values so the report
/// can list them next to the reference ranges.
pub async fn report_for_inputs(
    State(state): State<SharedState>,
    Form(raw): Form<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let decision = state.pipeline.evaluate(&raw)?;

    let doc = tokio::task::spawn_blocking(move || {
        state.renderer.render(ReportSubject::Decision(&decision))
    })
    .await
    .map_err(|e| RenderError::Layout(format!("render task failed: {e}")))??;

    Ok(attachment(doc))
}

fn attachment(doc: ReportDocument) -> Response {
    let disposition = format!("attachment; filename={}", doc.filename());
    (
        [
            (header::CONTENT_TYPE, doc.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        doc.into_bytes(),
    )
        .into_response()
}
