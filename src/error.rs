use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while loading and validating a flowchart into a `GraphStore`.
///
/// All of these are configuration errors: they are raised once, at start-up,
/// and the process should refuse to serve a session with a broken graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Failed to parse flowchart JSON: {0}")]
    JsonParseError(String),

    #[error("Step '{0}' is defined more than once")]
    DuplicateStep(String),

    #[error("Step '{0}' declares both a choice list and a next step")]
    ConflictingTransitions(String),

    #[error("Step '{0}' declares a choice list, but it is empty")]
    EmptyChoices(String),

    #[error("Step '{target_id}' not found, which is required by a transition from step '{step_id}'")]
    DanglingTarget { step_id: String, target_id: String },

    #[error("Entry step '{0}' is not defined in the flowchart")]
    MissingEntryStep(String),
}

/// Errors raised by the navigation controller when a transition is rejected.
///
/// These are recoverable: the controller stays on the step it was on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Flowchart step '{0}' not found")]
    StepNotFound(String),

    #[error("Step '{step_id}' has no {requested} transition")]
    NoSuchTransition { step_id: String, requested: String },
}

/// Errors returned when the external classifier could not produce a usable answer.
///
/// An answer that simply does not name a known step is *not* an error, see
/// `Resolution::NoMatch`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("Resolution failed: no API key configured for the classifier")]
    MissingCredential,

    #[error("Resolution failed: transport error: {0}")]
    Transport(String),

    #[error("Resolution failed: classifier returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Resolution failed: malformed classifier response: {0}")]
    InvalidResponse(String),

    #[error("Resolution failed: classifier did not answer within {0:?}")]
    Timeout(Duration),
}

/// Errors raised by equipment edits and photo handling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EquipmentError {
    #[error("Failed to parse equipment catalogue JSON: {0}")]
    CatalogParseError(String),

    #[error("Equipment record {0} not found")]
    RecordNotFound(u32),

    #[error("Model '{model}' is not available for {category} equipment")]
    UnknownModel { category: String, model: String },

    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),

    #[error("Could not read image file '{path}': {message}")]
    ImageRead { path: String, message: String },
}

/// Any error a `Session` command can report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Equipment(#[from] EquipmentError),

    #[error("The resolver was built over a different flowchart than the session")]
    GraphMismatch,
}
