use renalyx_common::InferenceError;

/// A loaded binary classifier.
///
/// `row` holds the feature values in artifact column order. Implementations
/// return the predicted class as emitted by the artifact (normally `0.0` or `1.0`).
pub trait Classifier: Send + Sync {
    fn name(&self) -> &str;

    fn predict(&self, row: &[f64]) -> Result<f64, InferenceError>;
}

/// Always predicts the same outcome. Stand-in for a real artifact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantClassifier {
    pub outcome: f64,
}

impl ConstantClassifier {
    pub fn positive() -> Self {
        Self { outcome: 1.0 }
    }

    pub fn negative() -> Self {
        Self { outcome: 0.0 }
    }
}

impl Classifier for ConstantClassifier {
    fn name(&self) -> &str {
        "constant"
    }

    fn predict(&self, _row: &[f64]) -> Result<f64, InferenceError> {
        Ok(self.outcome)
    }
}
