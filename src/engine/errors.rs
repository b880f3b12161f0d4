use thiserror::Error;

/// Errors that can arise from the progression engine and its storage layer.
#[derive(Debug, Error)]
pub enum QuestlogError {
    /// Wrapper around sled's error type.
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    /// Wrapper around bincode serialization and deserialization errors.
    #[error("serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    /// Wrapper around IO errors (directory creation, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Returned when fetching a record that is not present.
    #[error("record not found: {0}")]
    NotFound(String),

    /// Returned when an operation is invoked against state that does not
    /// satisfy its preconditions (completing a quest with unfinished steps,
    /// re-completing a terminal quest, acting without a character).
    #[error("precondition not met: {0}")]
    PreconditionFailed(String),
}
