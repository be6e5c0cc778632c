use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::state::SharedState;

/// Reports whether the classifier artifact loaded. Always 200 so the
/// process stays reachable while degraded.
pub async fn health(State(state): State<SharedState>) -> Json<Value> {
    let engine = state.pipeline.engine();
    let status = if engine.is_ready() { "ok" } else { "degraded" };
    Json(json!({
        "status": status,
        "classifier": engine.classifier_name(),
        "labels": state.pipeline.labels(),
    }))
}
