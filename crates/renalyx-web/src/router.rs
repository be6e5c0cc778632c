//! Axum router: form, prediction, report download and health routes.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{health, home, predict, report};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::home))
        .route("/predict", post(predict::predict))
        .route(
            "/report",
            get(report::report_for_label).post(report::report_for_inputs),
        )
        // Older link name for the label-only report.
        .route("/generate_report_pdf", get(report::report_for_label))
        .route("/health", get(health::health))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}
