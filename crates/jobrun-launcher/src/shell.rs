use std::{process::ExitCode, sync::Arc};

use jobrun_core::{CoreError, ExportOutcome, JobRegistry, LifecycleRunner, Methods, OutputExporter};
use jobrun_model::{JOB_CLASS_KEY, ModelError, format};
use tracing::{error, info, instrument};

use crate::LaunchEnv;

/// How the launcher process ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    /// Any failure on the primary path.
    Failure,
    /// Terminated by the given signal.
    Signaled(i32),
}

impl ExitStatus {
    pub fn code(&self) -> i32 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::Signaled(signo) => 128 + signo,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(u8::try_from(status.code()).unwrap_or(1))
    }
}

/// Runs one job per process: load → resolve → run → export.
pub struct Launcher {
    registry: JobRegistry,
}

impl Launcher {
    pub fn new(registry: JobRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &JobRegistry {
        &self.registry
    }

    /// Run the primary path once.
    ///
    /// `runner` is shared with the signal path; the handle is installed into it
    /// as soon as it exists so a cancellation can reach the job.
    #[instrument(level = "debug", skip_all, fields(job = %env.job_name))]
    pub fn run(&self, env: &LaunchEnv, runner: &LifecycleRunner) -> Result<ExportOutcome, CoreError> {
        let path = env.prop_file.as_deref().ok_or(ModelError::PathUnset)?;
        info!(job = %env.job_name, path = %path.display(), "loading job properties");
        let props = format::load(path)?;

        let class = props.require(JOB_CLASS_KEY)?;
        info!(job = %env.job_name, class = %class, "resolving job");
        let resolved = self.registry.resolve(&env.job_name, class, &props)?;
        info!(
            job = %env.job_name,
            class = %class,
            strategy = %resolved.strategy,
            signature = %resolved.signature,
            "job constructed"
        );

        runner.install(Arc::clone(&resolved.handle), Methods::from_props(&props))?;
        runner.run()?;

        let exporter = OutputExporter::new(env.output_file.clone());
        Ok(exporter.export(&env.job_name, resolved.handle.as_ref())?)
    }

    /// Run the primary path and map the result to an exit status.
    pub fn launch(&self, env: &LaunchEnv, runner: &LifecycleRunner) -> ExitStatus {
        match self.run(env, runner) {
            Ok(outcome) => {
                info!(job = %env.job_name, outcome = ?outcome, "job finished");
                ExitStatus::Success
            }
            Err(e) => {
                error!(job = %env.job_name, error = %e, "job failed");
                ExitStatus::Failure
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        assert_eq!(ExitStatus::Success.code(), 0);
        assert_eq!(ExitStatus::Failure.code(), 1);
        assert_eq!(ExitStatus::Signaled(libc::SIGTERM).code(), 143);
        assert_eq!(ExitStatus::Signaled(libc::SIGINT).code(), 130);
    }

    #[test]
    fn missing_prop_file_is_config_error() {
        let launcher = Launcher::new(JobRegistry::new());
        let env = LaunchEnv {
            job_name: "nightly".into(),
            prop_file: None,
            output_file: None,
        };
        let runner = LifecycleRunner::new("nightly");

        let err = launcher.run(&env, &runner).unwrap_err();
        assert!(matches!(err, CoreError::Config(ModelError::PathUnset)));
        assert_eq!(launcher.launch(&env, &runner), ExitStatus::Failure);
    }
}
