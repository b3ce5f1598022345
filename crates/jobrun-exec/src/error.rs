use thiserror::Error;

use jobrun_core::JobError;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("invalid command configuration: {0}")]
    InvalidConfig(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Failed(String),

    #[error("canceled")]
    Canceled,
}

impl From<ExecError> for JobError {
    fn from(e: ExecError) -> Self {
        match e {
            ExecError::Io(io) => JobError::Io(io),
            ExecError::Canceled => JobError::Canceled,
            other => JobError::Failed(other.to_string()),
        }
    }
}
