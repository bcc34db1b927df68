//! Error types for serp-xray.
//!
//! Run-level and collaborator failures use [`Error`]. Per-URL extraction
//! failures use [`ExtractionFailure`]; they are always recoverable by
//! skipping the candidate and never abort a run.

/// Error type for run-level and collaborator operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The search results call failed or returned an unusable payload.
    #[error("Result retrieval failed: {0}")]
    Retrieval(String),

    /// HTTP client construction or transport failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Configuration is invalid or could not be loaded.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type alias for serp-xray operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a single candidate URL produced no page record.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, thiserror::Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ExtractionFailure {
    /// The site answered with a blocking status (403, 429, 503).
    #[error("blocked (HTTP {0})")]
    Blocked(u16),

    /// Main text was shorter than the configured minimum.
    #[error("insufficient content")]
    InsufficientContent,

    /// No `<title>` or one shorter than the configured minimum.
    #[error("title not detected")]
    TitleMissing,

    /// Any other failure (transport error, timeout, unusable body).
    #[error("extraction failed: {0}")]
    Generic(String),
}

/// Why topic clustering could not produce an assignment.
///
/// Never crosses the public API; it is collapsed into `None`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ClusterError {
    #[error("need at least {needed} pages, got {got}")]
    TooFewPages { needed: usize, got: usize },

    #[error("vocabulary is empty after filtering")]
    EmptyVocabulary,

    #[error("degenerate input: {0}")]
    Degenerate(String),
}
