//! Prediction engine: the single shared handle to the loaded classifier.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use renalyx_common::{FeatureVector, InferenceError, PredictionOutcome};

use crate::{Classifier, LoadError, LogisticModel, RandomForest};

/// On-disk format of the classifier artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactFormat {
    ForestJson,
    Safetensors,
}

impl ArtifactFormat {
    /// `.safetensors` files are logistic models; anything else is read as a JSON forest.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("safetensors") => ArtifactFormat::Safetensors,
            _ => ArtifactFormat::ForestJson,
        }
    }
}

/// Read and validate a classifier artifact.
pub fn load_classifier(
    path: &Path,
    format: Option<ArtifactFormat>,
) -> Result<Arc<dyn Classifier>, LoadError> {
    let format = format.unwrap_or_else(|| ArtifactFormat::from_path(path));
    debug!("Loading {:?} artifact from {}", format, path.display());
    let classifier: Arc<dyn Classifier> = match format {
        ArtifactFormat::ForestJson => Arc::new(RandomForest::load(path)?),
        ArtifactFormat::Safetensors => Arc::new(LogisticModel::load(path)?),
    };
    Ok(classifier)
}

#[derive(Clone)]
enum EngineState {
    Ready(Arc<dyn Classifier>),
    /// Load failed at startup; replayed on every call.
    Unavailable(String),
}

/// Wraps the process-wide classifier. Cloning shares the same artifact.
#[derive(Clone)]
pub struct PredictionEngine {
    state: EngineState,
}

impl std::fmt::Debug for PredictionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.state {
            EngineState::Ready(c) => f
                .debug_struct("PredictionEngine")
                .field("classifier", &c.name())
                .finish(),
            EngineState::Unavailable(reason) => f
                .debug_struct("PredictionEngine")
                .field("unavailable", reason)
                .finish(),
        }
    }
}

impl PredictionEngine {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            state: EngineState::Ready(classifier),
        }
    }

    /// An engine whose every call fails with [`InferenceError::Unavailable`].
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            state: EngineState::Unavailable(reason.into()),
        }
    }

    /// Load the artifact once at startup.
    ///
    /// A load failure does not abort: the engine is returned in the
    /// unavailable state so requests fail with a structured error.
    pub fn load(path: &Path, format: Option<ArtifactFormat>) -> Self {
        match load_classifier(path, format) {
            Ok(classifier) => {
                info!(
                    "Classifier loaded: {} ({})",
                    classifier.name(),
                    path.display()
                );
                Self::new(classifier)
            }
            Err(e) => {
                warn!("Classifier failed to load from {}: {}", path.display(), e);
                Self::unavailable(format!("{}: {}", path.display(), e))
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, EngineState::Ready(_))
    }

    pub fn classifier_name(&self) -> Option<&str> {
        match &self.state {
            EngineState::Ready(c) => Some(c.name()),
            EngineState::Unavailable(_) => None,
        }
    }

    pub fn classify(&self, vector: &FeatureVector) -> Result<PredictionOutcome, InferenceError> {
        let classifier = match &self.state {
            EngineState::Ready(c) => c,
            EngineState::Unavailable(reason) => {
                return Err(InferenceError::Unavailable {
                    reason: reason.clone(),
                })
            }
        };
        let raw = classifier.predict(&vector.as_array())?;
        debug!("{} predicted {}", classifier.name(), raw);
        Ok(PredictionOutcome::new(raw))
    }
}
