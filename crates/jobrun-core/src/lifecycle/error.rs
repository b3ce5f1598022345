use thiserror::Error;

use crate::job::JobError;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("no job handle installed")]
    NoJob,

    #[error("job handle already installed")]
    AlreadyInstalled,

    #[error("job '{job}' does not have {kind} method '{method}'")]
    MethodNotFound {
        job: String,
        kind: &'static str,
        method: String,
    },

    #[error("job '{0}' was already run")]
    AlreadyRan(String),

    #[error("job '{0}' was cancelled before it started")]
    Cancelled(String),

    #[error("job '{job}' failed in '{method}': {source}")]
    Run {
        job: String,
        method: String,
        #[source]
        source: JobError,
    },
}
