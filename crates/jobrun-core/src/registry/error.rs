use thiserror::Error;

use crate::job::JobError;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("job type '{0}' was not found")]
    TypeNotFound(String),

    #[error(
        "no matching constructor for job type '{class}': attempted [{}], available [{}]",
        .attempted.join(", "),
        .available.join(", ")
    )]
    NoMatchingConstructor {
        class: String,
        attempted: Vec<String>,
        available: Vec<String>,
    },

    #[error("constructor {signature} of job type '{class}' failed: {source}")]
    Instantiation {
        class: String,
        signature: String,
        #[source]
        source: JobError,
    },

    #[error("job type '{0}' is already registered")]
    DuplicateType(String),

    #[error("'{0}' is not a known legacy wrapper type")]
    UnknownWrapper(String),
}
