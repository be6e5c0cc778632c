use thiserror::Error;

/// Input field missing from the form, or not convertible to its declared type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("missing required field `{field}`")]
    Missing { field: &'static str },

    #[error("field `{field}` has invalid value {value:?}: {reason}")]
    Invalid {
        field: &'static str,
        value: String,
        reason: String,
    },
}

impl ParseError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ParseError::Missing { field } | ParseError::Invalid { field, .. } => field,
        }
    }
}

/// Classifier unavailable or failed during evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    /// The artifact failed to load at startup. Permanent for the process lifetime.
    #[error("classifier unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("feature shape mismatch: expected {expected}, got {actual}")]
    Shape { expected: usize, actual: usize },

    #[error("classifier evaluation failed: {0}")]
    Evaluation(String),
}

/// Malformed intermediate result between the engine and the interpreter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("classifier produced a malformed outcome: {raw}")]
    MalformedOutcome { raw: f64 },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("report layout error: {0}")]
    Layout(String),

    #[error("PDF emission error: {0}")]
    Pdf(String),

    #[error("report I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a [`RenalyxError`], for callers that branch on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    Inference,
    Validation,
    Render,
    Config,
}

#[derive(Debug, Error)]
pub enum RenalyxError {
    #[error("Input error: {0}")]
    Parse(#[from] ParseError),

    #[error("Prediction error: {0}")]
    Inference(#[from] InferenceError),

    #[error("Interpretation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Report error: {0}")]
    Render(#[from] RenderError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl RenalyxError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RenalyxError::Parse(_) => ErrorKind::Parse,
            RenalyxError::Inference(_) => ErrorKind::Inference,
            RenalyxError::Validation(_) => ErrorKind::Validation,
            RenalyxError::Render(_) => ErrorKind::Render,
            RenalyxError::Config(_) => ErrorKind::Config,
        }
    }
}

pub type Result<T> = std::result::Result<T, RenalyxError>;
