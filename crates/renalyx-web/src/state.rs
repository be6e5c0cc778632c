//! Shared application state for the web server.

use std::sync::Arc;

use renalyx_config::Config;
use renalyx_model::{Pipeline, PredictionEngine};
use renalyx_report::ReportRenderer;

/// Shared state injected into every Axum handler. Read-only after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    pub pipeline: Pipeline,
    pub renderer: ReportRenderer,
}

impl AppState {
    pub fn new(pipeline: Pipeline, renderer: ReportRenderer) -> Self {
        Self { pipeline, renderer }
    }

    /// Load the classifier artifact once and build the pipeline around it.
    pub fn from_config(config: &Config) -> Self {
        let engine = PredictionEngine::load(&config.model.path, config.model.format);
        Self::new(
            Pipeline::new(engine, config.labels.policy),
            ReportRenderer::new(config.report.options()),
        )
    }
}

pub type SharedState = Arc<AppState>;
