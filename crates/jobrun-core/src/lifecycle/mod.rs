//! Lifecycle of a single job handle: one run call from the main path, at most
//! one cancel call from the signal path.
//!
//! [`LifecycleRunner`] is created before the job is resolved so the signal path
//! can hold it from process start. The handle is installed once it exists.
mod entry;
pub use entry::{EntryPoint, Methods};

mod error;
pub use error::LifecycleError;

mod state;
pub use state::{CompletionState, Phase};

use std::{fmt, sync::OnceLock};

use tracing::{debug, error, info, instrument, warn};

use crate::job::JobHandle;

struct Installed {
    handle: JobHandle,
    methods: Methods,
}

/// Result of a cancellation request that did not fail outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelOutcome {
    /// No job handle was installed yet.
    NoJob,
    /// The run had already completed.
    AlreadyFinished,
    /// Another cancellation was already claimed.
    AlreadyCancelled,
    /// The cancel entry point was called and returned normally.
    Invoked,
    /// The cancel entry point was called and failed; the error was logged.
    Failed(String),
}

impl CancelOutcome {
    /// Returns `true` if the cancel entry point was actually called.
    pub fn was_invoked(&self) -> bool {
        matches!(self, CancelOutcome::Invoked | CancelOutcome::Failed(_))
    }
}

/// Owner of the job handle and its completion state.
pub struct LifecycleRunner {
    job_name: String,
    installed: OnceLock<Installed>,
    state: CompletionState,
}

impl LifecycleRunner {
    pub fn new(job_name: impl Into<String>) -> Self {
        Self {
            job_name: job_name.into(),
            installed: OnceLock::new(),
            state: CompletionState::new(),
        }
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    /// Install the constructed job handle. Only the first call succeeds.
    pub fn install(&self, handle: JobHandle, methods: Methods) -> Result<(), LifecycleError> {
        debug!(job = %self.job_name, run = %methods.run, cancel = %methods.cancel, "job handle installed");
        self.installed
            .set(Installed { handle, methods })
            .map_err(|_| LifecycleError::AlreadyInstalled)
    }

    pub fn handle(&self) -> Option<&JobHandle> {
        self.installed.get().map(|i| &i.handle)
    }

    pub fn state(&self) -> &CompletionState {
        &self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Invoke the configured run entry point synchronously.
    ///
    /// The completion state is set to finished as soon as the call returns or
    /// fails, before the caller gets to export anything.
    #[instrument(level = "debug", skip(self), fields(job = %self.job_name))]
    pub fn run(&self) -> Result<(), LifecycleError> {
        let installed = self.installed.get().ok_or(LifecycleError::NoJob)?;
        let job = installed.handle.as_ref();

        let Some(entry) = EntryPoint::for_run(job, &installed.methods.run) else {
            self.state.finish();
            return Err(LifecycleError::MethodNotFound {
                job: self.job_name.clone(),
                kind: "run",
                method: installed.methods.run.clone(),
            });
        };

        match self.state.begin() {
            Ok(()) => {}
            Err(Phase::Cancelled) => {
                warn!(job = %self.job_name, "job was cancelled before run started");
                return Err(LifecycleError::Cancelled(self.job_name.clone()));
            }
            Err(_) => return Err(LifecycleError::AlreadyRan(self.job_name.clone())),
        }

        info!(job = %self.job_name, method = %entry, "invoking run method");
        let result = entry.invoke(job);
        self.state.finish();

        result.map_err(|source| {
            error!(job = %self.job_name, method = %entry, error = %source, "job run failed");
            LifecycleError::Run {
                job: self.job_name.clone(),
                method: entry.to_string(),
                source,
            }
        })
    }

    /// Cancel the job from the signal path.
    ///
    /// No-op when there is no handle, the run already finished, or a cancel was
    /// already claimed. A missing cancel entry point is an error; a failing one
    /// is logged and reported as [`CancelOutcome::Failed`].
    pub fn cancel(&self) -> Result<CancelOutcome, LifecycleError> {
        let Some(installed) = self.installed.get() else {
            debug!(job = %self.job_name, "cancel requested before job was constructed");
            return Ok(CancelOutcome::NoJob);
        };

        match self.state.claim_cancel() {
            Ok(_) => {}
            Err(Phase::Finished) => {
                debug!(job = %self.job_name, "cancel requested after job finished");
                return Ok(CancelOutcome::AlreadyFinished);
            }
            Err(_) => return Ok(CancelOutcome::AlreadyCancelled),
        }

        info!(job = %self.job_name, "attempting to call cancel on this job");
        let job = installed.handle.as_ref();
        let Some(entry) = EntryPoint::for_cancel(job, &installed.methods.cancel) else {
            error!(
                job = %self.job_name,
                method = %installed.methods.cancel,
                "job does not support cancellation"
            );
            return Err(LifecycleError::MethodNotFound {
                job: self.job_name.clone(),
                kind: "cancel",
                method: installed.methods.cancel.clone(),
            });
        };

        match entry.invoke(job) {
            Ok(()) => {
                info!(job = %self.job_name, method = %entry, "cancel method returned");
                Ok(CancelOutcome::Invoked)
            }
            Err(e) => {
                error!(job = %self.job_name, method = %entry, error = %e, "cancel method failed");
                Ok(CancelOutcome::Failed(e.to_string()))
            }
        }
    }
}

impl fmt::Debug for LifecycleRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleRunner")
            .field("job_name", &self.job_name)
            .field("installed", &self.installed.get().is_some())
            .field("state", &self.state)
            .finish()
    }
}
