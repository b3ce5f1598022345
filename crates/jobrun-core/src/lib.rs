pub mod error;
pub mod export;
pub mod job;
pub mod lifecycle;
pub mod registry;

pub use error::CoreError;
pub use export::{ExportError, ExportOutcome, OutputExporter};
pub use job::{Cancel, GeneratedProperties, Job, JobError, JobHandle, JobResult, ToProperties};
pub use lifecycle::{
    CancelOutcome, CompletionState, EntryPoint, LifecycleError, LifecycleRunner, Methods, Phase,
};
pub use registry::{Constructor, JobRegistry, JobType, ResolveError, Resolved, Strategy};

pub mod prelude {
    pub use crate::error::CoreError;
    pub use crate::job::{Cancel, GeneratedProperties, Job, JobError, JobResult, ToProperties};
    pub use crate::lifecycle::{LifecycleRunner, Methods};
    pub use crate::registry::{JobRegistry, JobType};
}
