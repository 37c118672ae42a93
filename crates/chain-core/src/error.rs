use std::result;
use thiserror::Error;

/// Failures raised while validating or rewriting a pipeline.
///
/// `step` is the position of the offending node in the flattened pipeline,
/// where the seed is step 0.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("pipeline has no seed argument")]
    EmptySeed,
    #[error("step {step}: broadcast marker must wrap a bare identifier, found `{found}`")]
    MalformedMarker { step: usize, found: String },
    #[error("step {step}: assignment target must be a simple identifier, found `{found}`")]
    AmbiguousAssignmentTarget { step: usize, found: String },
    #[error("step {step}: `{found}` cannot start a pipeline, there is no value to act on")]
    MarkerAsSeed { step: usize, found: String },
    #[error("Generic error: {0}")]
    Generic(String),
}

impl Error {
    /// Index of the step that failed, if the error is tied to one.
    pub fn step(&self) -> Option<usize> {
        match self {
            Error::MalformedMarker { step, .. }
            | Error::AmbiguousAssignmentTarget { step, .. }
            | Error::MarkerAsSeed { step, .. } => Some(*step),
            Error::EmptySeed | Error::Generic(_) => None,
        }
    }

    /// Stable name of the violated rule.
    pub fn rule(&self) -> &'static str {
        match self {
            Error::EmptySeed => "empty-seed",
            Error::MalformedMarker { .. } => "malformed-marker",
            Error::AmbiguousAssignmentTarget { .. } => "ambiguous-assignment-target",
            Error::MarkerAsSeed { .. } => "marker-as-seed",
            Error::Generic(_) => "generic",
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

// Convert from eyre::Report to our Error type
impl From<eyre::Report> for Error {
    fn from(err: eyre::Report) -> Self {
        Error::Generic(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Generic(e.to_string())
    }
}
impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Generic(s)
    }
}
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Generic(e.to_string())
    }
}
