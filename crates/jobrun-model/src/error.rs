use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("property file path is not set")]
    PathUnset,

    #[error("failed to read property file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("required property '{0}' is not set")]
    MissingKey(&'static str),

    #[error("malformed property file at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("failed to write property file {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    #[error("invalid output properties: {0}")]
    InvalidOutput(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
