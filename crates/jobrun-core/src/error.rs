use thiserror::Error;

use jobrun_model::ModelError;

use crate::{export::ExportError, lifecycle::LifecycleError, registry::ResolveError};

/// Any failure on the primary load → resolve → run → export path.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("config error: {0}")]
    Config(#[from] ModelError),

    #[error("resolution error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("lifecycle error: {0}")]
    Lifecycle(#[from] LifecycleError),

    #[error("output error: {0}")]
    Export(#[from] ExportError),
}
