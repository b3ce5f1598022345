use thiserror::Error;

/// Error raised by job code (constructors and entry points).
#[derive(Debug, Error)]
pub enum JobError {
    #[error("{0}")]
    Failed(String),

    #[error("canceled")]
    Canceled,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl JobError {
    /// Shorthand for [`JobError::Failed`].
    pub fn msg(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }
}

pub type JobResult = Result<(), JobError>;
