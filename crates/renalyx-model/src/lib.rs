//! CKD risk classification using pre-trained artifacts.
//!
//! The classifier is opaque to the rest of the system: it is loaded once at
//! startup, shared read-only behind an `Arc`, and consulted through the
//! [`Classifier`] trait. Two artifact formats are supported:
//!   - a random forest exported to JSON (`forest_json`)
//!   - a logistic model stored as safetensors and evaluated with Candle (`safetensors`)

mod classifier;
mod forest;
mod logistic;
mod engine;
mod pipeline;

pub use classifier::{Classifier, ConstantClassifier};
pub use forest::{DecisionTree, RandomForest};
pub use logistic::LogisticModel;
pub use engine::{load_classifier, ArtifactFormat, PredictionEngine};
pub use pipeline::Pipeline;

/// Failure to read or validate a classifier artifact.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("artifact not readable: {0}")]
    Io(#[from] std::io::Error),

    #[error("artifact JSON invalid: {0}")]
    Json(#[from] serde_json::Error),

    #[error("tensor error: {0}")]
    Tensor(#[from] candle_core::Error),

    #[error("invalid artifact: {0}")]
    Invalid(String),
}
