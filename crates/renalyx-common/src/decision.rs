//! Result interpretation: classifier outcome → display-ready decision.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::features::FeatureVector;

/// Raw binary indicator returned by the prediction engine.
///
/// Held as the artifact emitted it; [`interpret`] checks it is integral.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionOutcome {
    pub raw: f64,
}

impl PredictionOutcome {
    pub const POSITIVE: PredictionOutcome = PredictionOutcome { raw: 1.0 };
    pub const NEGATIVE: PredictionOutcome = PredictionOutcome { raw: 0.0 };

    pub fn new(raw: f64) -> Self {
        Self { raw }
    }

    /// Integral indicator value, or `ValidationError` for NaN, infinities and fractions.
    pub fn indicator(&self) -> Result<i64, ValidationError> {
        if !self.raw.is_finite() || self.raw.fract() != 0.0 {
            return Err(ValidationError::MalformedOutcome { raw: self.raw });
        }
        Ok(self.raw as i64)
    }
}

/// Label text applied to the binary outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelPolicy {
    /// "CKD Positive" / "CKD Negative"
    #[default]
    Canonical,
    /// "CKD" / "Not CKD"
    Short,
}

impl LabelPolicy {
    pub fn positive(&self) -> &'static str {
        match self {
            LabelPolicy::Canonical => "CKD Positive",
            LabelPolicy::Short => "CKD",
        }
    }

    pub fn negative(&self) -> &'static str {
        match self {
            LabelPolicy::Canonical => "CKD Negative",
            LabelPolicy::Short => "Not CKD",
        }
    }
}

/// Interpreted decision plus the inputs it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionResult {
    pub label: String,
    pub positive: bool,
    pub inputs: FeatureVector,
}

/// Interpret with the canonical labels.
pub fn interpret(
    outcome: PredictionOutcome,
    inputs: FeatureVector,
) -> Result<DecisionResult, ValidationError> {
    interpret_with(LabelPolicy::Canonical, outcome, inputs)
}

/// Outcome `1` is positive; every other integral value is negative.
pub fn interpret_with(
    policy: LabelPolicy,
    outcome: PredictionOutcome,
    inputs: FeatureVector,
) -> Result<DecisionResult, ValidationError> {
    let positive = outcome.indicator()? == 1;
    let label = if positive {
        policy.positive()
    } else {
        policy.negative()
    };
    Ok(DecisionResult {
        label: label.to_string(),
        positive,
        inputs,
    })
}
