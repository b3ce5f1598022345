use std::{process::ExitCode, sync::Arc};

use anyhow::Context;
use tracing::{error, info};

use jobrun_core::{JobRegistry, LifecycleRunner};
use jobrun_exec::register_builtin_jobs;
use jobrun_launcher::{ExitStatus, LaunchEnv, Launcher};
use jobrun_observe::{LoggerConfig, init_local_offset, init_logger};

fn main() -> ExitCode {
    // Before any thread exists.
    init_local_offset();

    let cfg = LoggerConfig::from_env();
    if let Err(e) = init_logger(&cfg) {
        eprintln!("jobrun: logger init failed ({e}); falling back to text on stderr");
        let _ = init_logger(&LoggerConfig::default());
    }

    match launch() {
        Ok(status) => status.into(),
        Err(e) => {
            error!("launcher failed: {e:#}");
            ExitStatus::Failure.into()
        }
    }
}

fn launch() -> anyhow::Result<ExitStatus> {
    let env = LaunchEnv::from_env();
    info!(job = %env.job_name, "running job");

    let mut registry = JobRegistry::new();
    register_builtin_jobs(&mut registry).context("registering built-in jobs")?;

    let runner = Arc::new(LifecycleRunner::new(env.job_name.clone()));

    #[cfg(unix)]
    let watcher = jobrun_launcher::SignalWatcher::spawn(Arc::clone(&runner))
        .context("installing signal handlers")?;

    let status = Launcher::new(registry).launch(&env, &runner);

    #[cfg(unix)]
    watcher.finish();

    Ok(status)
}
