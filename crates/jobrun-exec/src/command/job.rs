use std::{process::Stdio, sync::OnceLock};

use jobrun_core::{Cancel, GeneratedProperties, Job, JobResult, ToProperties};
use jobrun_model::Props;
use tokio::{process::Command, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use super::{
    config::CommandConfig,
    output::{LogConfig, Stream, forward_lines},
};
use crate::ExecError;

/// Generated key holding the child exit code (`signal` if it had none).
pub const EXIT_CODE_KEY: &str = "exit.code";

/// Runs an external command to completion.
///
/// `cancel` may be called from another thread while `run` is blocked on the
/// child; the child is killed and `run` returns [`JobError::Canceled`](jobrun_core::JobError::Canceled).
#[derive(Debug)]
pub struct CommandJob {
    config: CommandConfig,
    log: LogConfig,
    cancel: CancellationToken,
    generated: OnceLock<Props>,
}

impl CommandJob {
    pub fn new(config: CommandConfig) -> Self {
        Self {
            config,
            log: LogConfig::default(),
            cancel: CancellationToken::new(),
            generated: OnceLock::new(),
        }
    }

    pub fn from_props(job_name: &str, props: &Props) -> Result<Self, ExecError> {
        CommandConfig::from_props(job_name, props).map(Self::new)
    }

    pub fn with_log_config(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }

    pub fn config(&self) -> &CommandConfig {
        &self.config
    }

    async fn execute(&self) -> Result<Option<i32>, ExecError> {
        let cfg = &self.config;
        trace!(
            job = %cfg.run_id,
            command = %cfg.command,
            args = ?cfg.args,
            cwd = ?cfg.cwd,
            "spawning command",
        );

        let mut cmd = Command::new(&cfg.command);
        cmd.args(&cfg.args);
        if let Some(cwd) = &cfg.cwd {
            cmd.current_dir(cwd);
        }
        for kv in cfg.env.iter() {
            cmd.env(kv.key(), kv.value());
        }
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);

        let mut child = cmd.spawn()?;

        let mut forwarders: Vec<JoinHandle<()>> = Vec::with_capacity(2);
        if let Some(out) = child.stdout.take() {
            forwarders.push(tokio::spawn(forward_lines(
                out,
                Stream::Stdout,
                cfg.run_id.clone(),
                self.log,
            )));
        }
        if let Some(err) = child.stderr.take() {
            forwarders.push(tokio::spawn(forward_lines(
                err,
                Stream::Stderr,
                cfg.run_id.clone(),
                self.log,
            )));
        }

        tokio::select! {
            res = child.wait() => {
                let status = res?;
                for handle in forwarders {
                    let _ = handle.await;
                }
                if !status.success() && cfg.fail_on_non_zero {
                    match status.code() {
                        Some(code) => Err(ExecError::Failed(format!(
                            "process exited with non-zero code: {code}"
                        ))),
                        None => Err(ExecError::Failed("process terminated by signal".into())),
                    }
                } else {
                    debug!(job = %cfg.run_id, code = ?status.code(), "command exited");
                    Ok(status.code())
                }
            }
            _ = self.cancel.cancelled() => {
                debug!(job = %cfg.run_id, "cancellation requested; killing command");
                if let Err(e) = child.kill().await {
                    debug!(job = %cfg.run_id, "failed to kill command: {e}");
                }
                for handle in forwarders {
                    handle.abort();
                }
                Err(ExecError::Canceled)
            }
        }
    }
}

impl Job for CommandJob {
    fn run(&self) -> JobResult {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let code = runtime.block_on(self.execute())?;

        let exit = code.map_or_else(|| "signal".to_string(), |c| c.to_string());
        let _ = self.generated.set([(EXIT_CODE_KEY, exit)].into_iter().collect());
        Ok(())
    }

    fn cancel_capability(&self) -> Option<&dyn Cancel> {
        Some(self)
    }

    fn generated_properties_capability(&self) -> Option<&dyn GeneratedProperties> {
        Some(self)
    }
}

impl Cancel for CommandJob {
    fn cancel(&self) -> JobResult {
        self.cancel.cancel();
        Ok(())
    }
}

impl GeneratedProperties for CommandJob {
    fn generated_properties(&self) -> Option<Box<dyn ToProperties>> {
        self.generated
            .get()
            .map(|p| Box::new(p.clone()) as Box<dyn ToProperties>)
    }
}
