//! Form submission → prediction result page.

use std::collections::HashMap;

use axum::extract::State;
use axum::response::Html;
use axum::Form;
use tracing::info;

use renalyx_common::{DecisionResult, REFERENCE_RANGES};

use super::page::{escape, page};
use crate::error::AppError;
use crate::state::SharedState;

pub async fn predict(
    State(state): State<SharedState>,
    Form(raw): Form<HashMap<String, String>>,
) -> Result<Html<String>, AppError> {
    let decision = state.pipeline.evaluate(&raw)?;
    info!("Prediction: {}", decision.label);
    Ok(Html(render_result(&decision)))
}

fn render_result(decision: &DecisionResult) -> String {
    let values = decision.inputs.named_values();
    let rows: String = values
        .iter()
        .zip(REFERENCE_RANGES.iter())
        .map(|((_, value), range)| {
            format!(
                "\n        <tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                range.measurement, value, range.normal_range
            )
        })
        .collect();

    // Re-submitting the values lets the report include them.
    let hidden: String = values
        .iter()
        .map(|(name, value)| format!(r#"<input type="hidden" name="{}" value="{}">"#, name, value))
        .collect();

    let label = escape(&decision.label);
    let body = format!(
        r#"<h2>Prediction Result: {}</h2>
<table>
    <thead><tr><th>Measurement</th><th>Submitted</th><th>Normal Range</th></tr></thead>
    <tbody>{}
    </tbody>
</table>
<form method="POST" action="/report">{}
    <button type="submit">Download full report (PDF)</button>
</form>
<form method="GET" action="/report">
    <input type="hidden" name="prediction_result" value="{}">
    <button type="submit">Download summary report (PDF)</button>
</form>
<p><a href="/">New prediction</a></p>"#,
        label, rows, hidden, label
    );
    page("Prediction Result", &body)
}
