use thiserror::Error;

/// Errors surfaced to callers of the pipeline. Per-post classification and enrichment
/// failures never appear here; they are absorbed into the result mapping.
#[derive(Error, Debug)]
pub enum GuardError {
    #[error("Invalid identity: {0}")]
    MatchInput(#[from] MatchInputError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Social profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Pipeline cancelled after {completed} post(s)")]
    Cancelled { completed: usize },

    #[error("Config error: {0}")]
    Config(String),
}

/// Identity rejected before any store query is issued.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchInputError {
    #[error("handle is empty")]
    EmptyHandle,

    #[error("display name is empty")]
    EmptyDisplayName,
}

pub type Result<T> = std::result::Result<T, GuardError>;
