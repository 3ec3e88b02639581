// Error kinds surfaced by store operations

/// Every variant is recoverable: the store never leaves the collection
/// half-applied when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    /// Bad input, e.g. an empty title or unknown filter name
    #[error("validation failed: {0}")]
    Validation(String),

    /// The referenced task id is not in the collection
    #[error("task not found: {0}")]
    NotFound(String),

    /// Storage could not be read or written
    #[error("persistence failed: {0}")]
    Persistence(String),
}

impl TaskError {
    /// Convert a backend error, keeping its whole context chain
    pub fn persistence(err: eyre::Report) -> Self {
        TaskError::Persistence(format!("{:#}", err))
    }
}

pub type Result<T> = std::result::Result<T, TaskError>;
