//! Input form.

use axum::response::Html;

use renalyx_common::REFERENCE_RANGES;

use super::page::page;

pub async fn home() -> Html<String> {
    Html(render_form())
}

fn render_form() -> String {
    let fields: String = REFERENCE_RANGES
        .iter()
        .map(|r| {
            format!(
                r#"
    <label>{} <small>(normal: {})</small><br>
        <input type="text" name="{}" required>
    </label><br>"#,
                r.measurement, r.normal_range, r.field
            )
        })
        .collect();

    let body = format!(
        r#"<form method="POST" action="/predict">{}
    <button type="submit">Predict</button>
</form>"#,
        fields
    );
    page("Chronic Kidney Disease Screening", &body)
}
