//! Straight-line inference pipeline: normalise → classify → interpret.

use std::collections::HashMap;

use tracing::debug;

use renalyx_common::{interpret_with, normalize, DecisionResult, LabelPolicy, Result};

use crate::PredictionEngine;

#[derive(Debug, Clone)]
pub struct Pipeline {
    engine: PredictionEngine,
    labels: LabelPolicy,
}

impl Pipeline {
    pub fn new(engine: PredictionEngine, labels: LabelPolicy) -> Self {
        Self { engine, labels }
    }

    pub fn engine(&self) -> &PredictionEngine {
        &self.engine
    }

    pub fn labels(&self) -> LabelPolicy {
        self.labels
    }

    /// Run one submission through all stages. The classifier is not consulted
    /// when the input fails to parse.
    pub fn evaluate(&self, raw: &HashMap<String, String>) -> Result<DecisionResult> {
        let inputs = normalize(raw)?;
        debug!("Normalised inputs: {:?}", inputs);
        let outcome = self.engine.classify(&inputs)?;
        let decision = interpret_with(self.labels, outcome, inputs)?;
        debug!("Decision: {}", decision.label);
        Ok(decision)
    }
}
