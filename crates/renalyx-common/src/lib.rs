//! renalyx-common: Shared types, errors, and the pure pipeline stages
//! (input normalisation and result interpretation) used across all renalyx crates.

pub mod error;
pub mod features;
pub mod decision;
pub mod reference;

// Re-export commonly used types
pub use error::{
    ErrorKind, InferenceError, ParseError, RenalyxError, RenderError, Result, ValidationError,
};
pub use features::{normalize, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use decision::{interpret, interpret_with, DecisionResult, LabelPolicy, PredictionOutcome};
pub use reference::{ReferenceRange, REFERENCE_RANGES};
